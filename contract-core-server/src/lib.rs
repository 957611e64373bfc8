//! Contract Core API Server
//!
//! Provides the REST API for contract drafting, signature tracking,
//! template upgrades, and the audit trail.
//!
//! ## Endpoints
//!
//! ### Wizard
//! - GET /wizard/templates?jurisdiction=IE - List template catalogue
//! - POST /wizard/contracts - Create draft contract from form fields
//!
//! ### Contracts
//! - GET /contracts/:contract_id - Get contract
//! - GET /contracts/:contract_id/preview - Render HTML/PDF artifacts
//! - POST /contracts/:contract_id/data - Inline field edit
//! - POST /contracts/:contract_id/send - Send for signature
//! - POST /contracts/:contract_id/signature - Record signature event
//! - GET /contracts/:contract_id/upgrade - Preview template upgrade
//! - POST /contracts/:contract_id/upgrade - Apply template upgrade
//!
//! ### Signature Provider
//! - POST /webhooks/signature - Provider callback
//!
//! ### Audit Trail
//! - GET /audits - List audit entries, newest first

pub mod artifacts;
pub mod dto;
pub mod error;
pub mod pdf;
pub mod render;
pub mod routes;
pub mod seed;
pub mod server;
pub mod service;
pub mod state;

pub use dto::*;
pub use error::*;
pub use routes::*;
pub use seed::*;
pub use server::*;
pub use service::*;
pub use state::*;
