use contract_core_api::domain::signature::SignStatus;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::{get_heapless_string, get_optional_heapless_string, get_parsed, TryFromRow};

pub struct ClientContractRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ClientContractRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ClientContractModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM client_contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref()
            .map(ClientContractModel::try_from_row)
            .transpose()
    }
}

impl TryFromRow<PgRow> for ClientContractModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ClientContractModel {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            template_version_id: row.try_get("template_version_id")?,
            status: get_parsed::<SignStatus>(row, "status")?,
            currency: get_heapless_string(row, "currency")?,
            contract_value: row.try_get("contract_value")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            data_json: row.try_get("data_json")?,
            generated_html_path: get_optional_heapless_string(row, "generated_html_path")?,
            pdf_path: get_optional_heapless_string(row, "pdf_path")?,
            audit_log_id: row.try_get("audit_log_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
