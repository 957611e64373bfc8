use contract_core_api::domain::term::Jurisdiction;
use contract_core_db::models::client::ClientModel;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::{get_heapless_string, get_optional_heapless_string, get_parsed, TryFromRow};

pub struct ClientRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ClientRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ClientModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(ClientModel::try_from_row).transpose()
    }
}

impl TryFromRow<PgRow> for ClientModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ClientModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            jurisdiction: get_parsed::<Jurisdiction>(row, "jurisdiction")?,
            contact_email: get_optional_heapless_string(row, "contact_email")?,
            address: get_optional_heapless_string(row, "address")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
