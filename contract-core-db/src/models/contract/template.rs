use chrono::{DateTime, Utc};
use contract_core_api::domain::term::Jurisdiction;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

/// Database model for a contract template family
///
/// A family groups every version of one kind of agreement (e.g. the PSRA
/// letting agreement). `code` is the natural key; `code_hash` is its stable
/// hash, kept alongside so lookups never compare long strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractTemplateModel {
    pub id: Uuid,

    /// Natural key, e.g. `psra_letting`
    pub code: HeaplessString<50>,

    /// Hash of `code` for indexed lookup
    pub code_hash: i64,

    pub name: HeaplessString<100>,

    pub jurisdiction: Jurisdiction,

    pub created_at: DateTime<Utc>,
}

impl ContractTemplateModel {
    pub fn new(
        code: HeaplessString<50>,
        name: HeaplessString<100>,
        jurisdiction: Jurisdiction,
    ) -> Result<Self, String> {
        let code_hash = Self::hash_code(code.as_str())?;
        Ok(Self {
            id: Uuid::new_v4(),
            code,
            code_hash,
            name,
            jurisdiction,
            created_at: Utc::now(),
        })
    }

    /// Stable hash of a template code, as stored in `code_hash`.
    pub fn hash_code(code: &str) -> Result<i64, String> {
        hash_as_i64(&code)
    }
}

impl Identifiable for ContractTemplateModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
