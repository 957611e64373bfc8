use async_trait::async_trait;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use contract_core_db::repository::create_batch::CreateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ClientContractRepositoryImpl;

impl ClientContractRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ClientContractRepositoryImpl,
        mut items: Vec<ClientContractModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ClientContractModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        for item in &mut items {
            if audit_log_id.is_some() {
                item.audit_log_id = audit_log_id;
            }
            sqlx::query(
                "INSERT INTO client_contracts \
                 (id, client_id, template_version_id, status, currency, contract_value, \
                  start_date, end_date, data_json, generated_html_path, pdf_path, \
                  audit_log_id, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
            )
            .bind(item.id)
            .bind(item.client_id)
            .bind(item.template_version_id)
            .bind(item.status.as_str())
            .bind(item.currency.as_str())
            .bind(item.contract_value)
            .bind(item.start_date)
            .bind(item.end_date)
            .bind(&item.data_json)
            .bind(item.generated_html_path.as_ref().map(|p| p.as_str()))
            .bind(item.pdf_path.as_ref().map(|p| p.as_str()))
            .bind(item.audit_log_id)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<ClientContractModel> for ClientContractRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ClientContractModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ClientContractModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::document::{DocValue, Document};
    use contract_core_db::repository::load::Load;

    use super::super::test_utils::test_utils::seed_draft_contract;

    #[tokio::test]
    #[ignore]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let contract_repo = &ctx.repos().contracts;

        let contract = seed_draft_contract(&ctx).await?;

        let loaded = contract_repo.load(contract.id).await?;
        assert_eq!(loaded.template_version_id, contract.template_version_id);
        assert!(loaded.audit_log_id.is_none());

        let mut expected = Document::new();
        expected.set("fees.base_ex_vat", DocValue::Float(1000.0))?;
        assert_eq!(loaded.document()?, expected);

        Ok(())
    }
}
