use std::error::Error;

use sqlx::Row;
use uuid::Uuid;

use super::repo_impl::ClientContractRepositoryImpl;

impl ClientContractRepositoryImpl {
    /// Ids of contracts with no audit entries at all, oldest contract first.
    /// These predate auditing and are the targets of the backfill job.
    pub async fn find_without_audits(&self) -> Result<Vec<Uuid>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            "SELECT c.id FROM client_contracts c \
             LEFT JOIN contract_audits a ON a.contract_id = c.id \
             WHERE a.id IS NULL \
             ORDER BY c.created_at, c.id",
        )
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get("id").map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;

    use super::super::test_utils::test_utils::seed_draft_contract;

    #[tokio::test]
    #[ignore]
    async fn test_find_without_audits() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let contract_repo = &ctx.repos().contracts;

        let contract = seed_draft_contract(&ctx).await?;

        let ids = contract_repo.find_without_audits().await?;
        assert!(ids.contains(&contract.id));

        Ok(())
    }
}
