use contract_core_api::domain::term::Jurisdiction;
use contract_core_db::models::contract::template::ContractTemplateModel;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::{get_heapless_string, get_parsed, TryFromRow};

pub struct TemplateRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl TemplateRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ContractTemplateModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM contract_templates WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref()
            .map(ContractTemplateModel::try_from_row)
            .transpose()
    }
}

impl TryFromRow<PgRow> for ContractTemplateModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContractTemplateModel {
            id: row.try_get("id")?,
            code: get_heapless_string(row, "code")?,
            code_hash: row.try_get("code_hash")?,
            name: get_heapless_string(row, "name")?,
            jurisdiction: get_parsed::<Jurisdiction>(row, "jurisdiction")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
