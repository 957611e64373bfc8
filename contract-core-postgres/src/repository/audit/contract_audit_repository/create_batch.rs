use async_trait::async_trait;
use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use contract_core_db::repository::create_batch::CreateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContractAuditRepositoryImpl;

impl ContractAuditRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ContractAuditRepositoryImpl,
        items: Vec<ContractAuditModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContractAuditModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        for item in &items {
            sqlx::query(
                "INSERT INTO contract_audits \
                 (id, contract_id, action, actor_person_id, happened_at, before_data, \
                  after_data, changed_keys, notes, antecedent_id, antecedent_hash, hash) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            )
            .bind(item.id)
            .bind(item.contract_id)
            .bind(item.action.as_str())
            .bind(item.actor_person_id)
            .bind(item.happened_at)
            .bind(&item.before_data)
            .bind(&item.after_data)
            .bind(serde_json::to_value(&item.changed_keys)?)
            .bind(item.notes.as_ref().map(|n| n.as_str()))
            .bind(item.antecedent_id)
            .bind(item.antecedent_hash)
            .bind(item.hash)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<ContractAuditModel> for ContractAuditRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContractAuditModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContractAuditModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::audit::AuditAction;
    use contract_core_db::repository::create_batch::CreateBatch;

    use super::super::test_utils::test_utils::create_test_audit;
    use crate::repository::contract::client_contract_repository::test_utils::test_utils::seed_draft_contract;

    #[tokio::test]
    #[ignore]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let audit_repo = &ctx.repos().audits;

        let contract = seed_draft_contract(&ctx).await?;
        let entry = create_test_audit(contract.id, AuditAction::CreateDraft, None)?;
        let saved = audit_repo.create_batch(vec![entry], None).await?;

        let trail = audit_repo.find_by_contract_id(contract.id).await?;
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].id, saved[0].id);
        assert!(trail[0].verify());

        Ok(())
    }
}
