use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::document::PathError;

/// Error taxonomy for the contract core.
///
/// Every operation on a contract resolves to one of these outcomes. The HTTP
/// layer maps them onto status codes; nothing here carries transport detail.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Field- or table-level validation failures, keyed by dotted path
    /// (table rows use `<table>[<idx>].<column>` keys).
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    /// Contract term violates a jurisdiction policy (e.g. the IE cap).
    #[error("term policy violation: {0}")]
    TermPolicy(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Attempted signature transition the state machine does not allow,
    /// or a mutation against a contract in a terminal signature state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Request rejected at the boundary before any state change.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Structurally invalid dotted-path traversal of a document.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A template version shipped with a broken schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// Template rendering failed (HTML stage; PDF exhaustion is not an error).
    #[error("render error: {0}")]
    Render(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Single-entry validation error, for callers outside the validator.
    pub fn validation_one(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(path.into(), message.into());
        CoreError::Validation(errors)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
