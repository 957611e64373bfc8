use async_trait::async_trait;
use contract_core_db::models::person::PersonModel;
use contract_core_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PersonRepositoryImpl;

impl PersonRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &PersonRepositoryImpl,
        id: Uuid,
    ) -> Result<PersonModel, Box<dyn Error + Send + Sync>> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| format!("person {id} not found").into())
    }
}

#[async_trait]
impl Load<PersonModel> for PersonRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<PersonModel, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}
