use async_trait::async_trait;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use contract_core_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ClientContractRepositoryImpl;

impl ClientContractRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &ClientContractRepositoryImpl,
        id: Uuid,
    ) -> Result<ClientContractModel, Box<dyn Error + Send + Sync>> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| format!("client contract {id} not found").into())
    }
}

#[async_trait]
impl Load<ClientContractModel> for ClientContractRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ClientContractModel, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::signature::SignStatus;
    use contract_core_db::repository::load::Load;

    use super::super::test_utils::test_utils::seed_draft_contract;

    #[tokio::test]
    #[ignore]
    async fn test_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let contract_repo = &ctx.repos().contracts;

        let contract = seed_draft_contract(&ctx).await?;

        let loaded = contract_repo.load(contract.id).await?;
        assert_eq!(loaded.status, SignStatus::Draft);
        assert_eq!(loaded.client_id, contract.client_id);
        assert_eq!(loaded.currency.as_str(), "EUR");

        Ok(())
    }
}
