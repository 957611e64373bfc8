use contract_core_db::models::contract::template_version::TemplateVersionModel;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::{get_heapless_string, TryFromRow};

pub struct TemplateVersionRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl TemplateVersionRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<TemplateVersionModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM contract_template_versions WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref()
            .map(TemplateVersionModel::try_from_row)
            .transpose()
    }
}

impl TryFromRow<PgRow> for TemplateVersionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(TemplateVersionModel {
            id: row.try_get("id")?,
            template_id: row.try_get("template_id")?,
            version_label: get_heapless_string(row, "version_label")?,
            html_template: row.try_get("html_template")?,
            form_schema: row.try_get("form_schema")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
