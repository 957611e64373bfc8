use async_trait::async_trait;
use contract_core_db::models::contract::template_version::TemplateVersionModel;
use contract_core_db::repository::create_batch::CreateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TemplateVersionRepositoryImpl;

impl TemplateVersionRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &TemplateVersionRepositoryImpl,
        items: Vec<TemplateVersionModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<TemplateVersionModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        for item in &items {
            sqlx::query(
                "INSERT INTO contract_template_versions \
                 (id, template_id, version_label, html_template, form_schema, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(item.id)
            .bind(item.template_id)
            .bind(item.version_label.as_str())
            .bind(&item.html_template)
            .bind(&item.form_schema)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<TemplateVersionModel> for TemplateVersionRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<TemplateVersionModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<TemplateVersionModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}
