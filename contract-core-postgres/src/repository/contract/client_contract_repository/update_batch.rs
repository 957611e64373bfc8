use async_trait::async_trait;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use contract_core_db::repository::update_batch::UpdateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ClientContractRepositoryImpl;

impl ClientContractRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ClientContractRepositoryImpl,
        mut items: Vec<ClientContractModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ClientContractModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        for item in &mut items {
            if audit_log_id.is_some() {
                item.audit_log_id = audit_log_id;
            }
            let result = sqlx::query(
                "UPDATE client_contracts SET \
                 template_version_id = $2, status = $3, currency = $4, contract_value = $5, \
                 start_date = $6, end_date = $7, data_json = $8, generated_html_path = $9, \
                 pdf_path = $10, audit_log_id = $11, updated_at = $12 \
                 WHERE id = $1",
            )
            .bind(item.id)
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
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("client contract {} not found", item.id).into());
            }
        }

        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<ClientContractModel> for ClientContractRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ClientContractModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ClientContractModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items, audit_log_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::signature::SignStatus;
    use contract_core_db::repository::load::Load;
    use contract_core_db::repository::update_batch::UpdateBatch;
    use uuid::Uuid;

    use super::super::test_utils::test_utils::{create_test_contract, seed_draft_contract};

    #[tokio::test]
    #[ignore]
    async fn test_update_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let contract_repo = &ctx.repos().contracts;

        let mut contract = seed_draft_contract(&ctx).await?;
        contract.status = SignStatus::Sent;

        let audit_id = Uuid::new_v4();
        let updated = contract_repo
            .update_batch(vec![contract], Some(audit_id))
            .await?;
        assert_eq!(updated[0].status, SignStatus::Sent);

        let loaded = contract_repo.load(updated[0].id).await?;
        assert_eq!(loaded.status, SignStatus::Sent);
        assert_eq!(loaded.audit_log_id, Some(audit_id));

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    async fn test_update_batch_missing_row() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let contract_repo = &ctx.repos().contracts;

        let orphan = create_test_contract(Uuid::new_v4(), Uuid::new_v4());
        let result = contract_repo.update_batch(vec![orphan], None).await;
        assert!(result.is_err());

        Ok(())
    }
}
