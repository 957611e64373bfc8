use async_trait::async_trait;
use contract_core_db::models::client::ClientModel;
use contract_core_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ClientRepositoryImpl;

impl ClientRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &ClientRepositoryImpl,
        id: Uuid,
    ) -> Result<ClientModel, Box<dyn Error + Send + Sync>> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| format!("client {id} not found").into())
    }
}

#[async_trait]
impl Load<ClientModel> for ClientRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ClientModel, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::load::Load;

    use super::super::test_utils::test_utils::create_test_client;

    #[tokio::test]
    #[ignore]
    async fn test_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let client_repo = &ctx.repos().clients;

        let client = create_test_client("Maple Court Management", Jurisdiction::IE);
        let saved = client_repo.create_batch(vec![client], None).await?;

        let loaded = client_repo.load(saved[0].id).await?;
        assert_eq!(loaded.jurisdiction, Jurisdiction::IE);
        assert_eq!(loaded.name.as_str(), "Maple Court Management");

        Ok(())
    }
}
