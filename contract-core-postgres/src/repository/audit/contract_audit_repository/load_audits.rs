use async_trait::async_trait;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use contract_core_db::repository::load_audits::LoadAudits;
use contract_core_db::repository::pagination::{Page, PageRequest};
use contract_core_db::store::AuditFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContractAuditRepositoryImpl;

#[async_trait]
impl LoadAudits<ClientContractModel> for ContractAuditRepositoryImpl {
    async fn load_audits(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ContractAuditModel>, Box<dyn Error + Send + Sync>> {
        let filter = AuditFilter {
            contract_id: Some(id),
            ..Default::default()
        };
        self.list(&filter, page).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::audit::AuditAction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::load_audits::LoadAudits;
    use contract_core_db::repository::pagination::PageRequest;

    use super::super::test_utils::test_utils::create_test_audit;
    use crate::repository::contract::client_contract_repository::test_utils::test_utils::seed_draft_contract;

    #[tokio::test]
    #[ignore]
    async fn test_load_audits_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let audit_repo = &ctx.repos().audits;

        let contract = seed_draft_contract(&ctx).await?;
        let first = create_test_audit(contract.id, AuditAction::CreateDraft, None)?;
        let second = create_test_audit(contract.id, AuditAction::InlineUpdate, Some(&first))?;
        audit_repo
            .create_batch(vec![first, second.clone()], None)
            .await?;

        let page = audit_repo
            .load_audits(contract.id, PageRequest::default())
            .await?;
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].id, second.id);

        Ok(())
    }
}
