use contract_core_api::domain::audit::AuditAction;
use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::error::Error;
use std::sync::Arc;

use crate::utils::{get_optional_heapless_string, get_parsed, TryFromRow};

pub struct ContractAuditRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ContractAuditRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ContractAuditModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let changed_keys: serde_json::Value = row.try_get("changed_keys")?;
        Ok(ContractAuditModel {
            id: row.try_get("id")?,
            contract_id: row.try_get("contract_id")?,
            action: get_parsed::<AuditAction>(row, "action")?,
            actor_person_id: row.try_get("actor_person_id")?,
            happened_at: row.try_get("happened_at")?,
            before_data: row.try_get("before_data")?,
            after_data: row.try_get("after_data")?,
            changed_keys: serde_json::from_value(changed_keys)?,
            notes: get_optional_heapless_string(row, "notes")?,
            antecedent_id: row.try_get("antecedent_id")?,
            antecedent_hash: row.try_get("antecedent_hash")?,
            hash: row.try_get("hash")?,
        })
    }
}
