use async_trait::async_trait;
use contract_core_db::models::contract::template::ContractTemplateModel;
use contract_core_db::repository::create_batch::CreateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TemplateRepositoryImpl;

impl TemplateRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &TemplateRepositoryImpl,
        items: Vec<ContractTemplateModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContractTemplateModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        for item in &items {
            sqlx::query(
                "INSERT INTO contract_templates (id, code, code_hash, name, jurisdiction, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(item.id)
            .bind(item.code.as_str())
            .bind(item.code_hash)
            .bind(item.name.as_str())
            .bind(item.jurisdiction.as_str())
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<ContractTemplateModel> for TemplateRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContractTemplateModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContractTemplateModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}
