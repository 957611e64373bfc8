use async_trait::async_trait;
use contract_core_db::models::contract::template::ContractTemplateModel;
use contract_core_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TemplateRepositoryImpl;

impl TemplateRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &TemplateRepositoryImpl,
        id: Uuid,
    ) -> Result<ContractTemplateModel, Box<dyn Error + Send + Sync>> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| format!("contract template {id} not found").into())
    }
}

#[async_trait]
impl Load<ContractTemplateModel> for TemplateRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ContractTemplateModel, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::load::Load;

    use super::super::test_utils::test_utils::{create_test_template, unique_code};

    #[tokio::test]
    #[ignore]
    async fn test_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let template_repo = &ctx.repos().templates;

        let code = unique_code("psra_letting");
        let template = create_test_template(&code, "PSRA Letting Agreement", Jurisdiction::IE);
        let saved = template_repo.create_batch(vec![template], None).await?;

        let loaded = template_repo.load(saved[0].id).await?;
        assert_eq!(loaded.code.as_str(), code);
        assert_eq!(loaded.jurisdiction, Jurisdiction::IE);

        Ok(())
    }
}
