use async_trait::async_trait;
use contract_core_db::models::person::PersonModel;
use contract_core_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::PersonRepositoryImpl;

impl PersonRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &PersonRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<PersonModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM persons WHERE id = ANY($1)"#;
        let rows = sqlx::query(query)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = PersonModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.remove(id));
        }
        Ok(result)
    }
}

#[async_trait]
impl LoadBatch<PersonModel> for PersonRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<PersonModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::load_batch::LoadBatch;
    use uuid::Uuid;

    use super::super::test_utils::test_utils::create_test_person;

    #[tokio::test]
    #[ignore]
    async fn test_load_batch_with_non_existing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let person_repo = &ctx.repos().persons;

        let saved = person_repo
            .create_batch(vec![create_test_person("Batch Person")], None)
            .await?;

        let ids = vec![saved[0].id, Uuid::new_v4()];
        let loaded = person_repo.load_batch(&ids).await?;

        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].is_some());
        assert!(loaded[1].is_none());

        Ok(())
    }
}
