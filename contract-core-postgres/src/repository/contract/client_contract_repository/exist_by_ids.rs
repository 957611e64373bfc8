use async_trait::async_trait;
use contract_core_db::repository::exist_by_ids::ExistByIds;
use sqlx::Row;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ClientContractRepositoryImpl;

impl ClientContractRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &ClientContractRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query("SELECT id FROM client_contracts WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let mut found: HashSet<Uuid> = HashSet::new();
        for row in rows {
            found.insert(row.try_get("id")?);
        }

        Ok(ids.iter().map(|id| (*id, found.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds for ClientContractRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
