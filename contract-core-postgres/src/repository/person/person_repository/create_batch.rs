use async_trait::async_trait;
use contract_core_db::models::person::PersonModel;
use contract_core_db::repository::create_batch::CreateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PersonRepositoryImpl;

impl PersonRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &PersonRepositoryImpl,
        items: Vec<PersonModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<PersonModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;
        for item in &items {
            sqlx::query(
                r#"INSERT INTO persons (id, display_name, email, external_identifier, created_at)
                   VALUES ($1, $2, $3, $4, $5)"#,
            )
            .bind(item.id)
            .bind(item.display_name.as_str())
            .bind(item.email.as_ref().map(|s| s.as_str()))
            .bind(item.external_identifier.as_ref().map(|s| s.as_str()))
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<PersonModel> for PersonRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<PersonModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<PersonModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_db::repository::create_batch::CreateBatch;

    use super::super::test_utils::test_utils::create_test_person;

    #[tokio::test]
    #[ignore]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let person_repo = &ctx.repos().persons;

        let people = vec![
            create_test_person("Create One"),
            create_test_person("Create Two"),
        ];
        let saved = person_repo.create_batch(people.clone(), None).await?;

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, people[0].id);

        Ok(())
    }
}
