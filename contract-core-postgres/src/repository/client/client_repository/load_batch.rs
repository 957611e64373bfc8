use async_trait::async_trait;
use contract_core_db::models::client::ClientModel;
use contract_core_db::repository::load_batch::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::ClientRepositoryImpl;

impl ClientRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ClientRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ClientModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query("SELECT * FROM clients WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let mut item_map: HashMap<Uuid, ClientModel> = HashMap::new();
        for row in rows {
            let item = ClientModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<ClientModel> for ClientRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ClientModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::load_batch::LoadBatch;
    use uuid::Uuid;

    use super::super::test_utils::test_utils::create_test_client;

    #[tokio::test]
    #[ignore]
    async fn test_load_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let client_repo = &ctx.repos().clients;

        let clients = vec![
            create_test_client("Maple Court Management", Jurisdiction::IE),
            create_test_client("Harbourside Lettings", Jurisdiction::UK),
        ];
        let saved = client_repo.create_batch(clients, None).await?;

        let ids = vec![saved[1].id, Uuid::new_v4(), saved[0].id];
        let loaded = client_repo.load_batch(&ids).await?;

        assert_eq!(loaded.len(), 3);
        assert_eq!(
            loaded[0].as_ref().map(|c| c.name.as_str()),
            Some("Harbourside Lettings")
        );
        assert!(loaded[1].is_none());
        assert_eq!(
            loaded[2].as_ref().map(|c| c.name.as_str()),
            Some("Maple Court Management")
        );

        Ok(())
    }
}
