use async_trait::async_trait;
use contract_core_db::models::contract::template_version::TemplateVersionModel;
use contract_core_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TemplateVersionRepositoryImpl;

impl TemplateVersionRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &TemplateVersionRepositoryImpl,
        id: Uuid,
    ) -> Result<TemplateVersionModel, Box<dyn Error + Send + Sync>> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| format!("template version {id} not found").into())
    }
}

#[async_trait]
impl Load<TemplateVersionModel> for TemplateVersionRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<TemplateVersionModel, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::load::Load;

    use super::super::super::template_repository::test_utils::test_utils::{
        create_test_template, unique_code,
    };
    use super::super::test_utils::test_utils::create_test_version;

    #[tokio::test]
    #[ignore]
    async fn test_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let template_repo = &ctx.repos().templates;
        let version_repo = &ctx.repos().template_versions;

        let template = create_test_template(
            &unique_code("psra_letting"),
            "PSRA Letting Agreement",
            Jurisdiction::IE,
        );
        let saved_template = template_repo.create_batch(vec![template], None).await?;

        let version = create_test_version(saved_template[0].id, "v1");
        let saved = version_repo.create_batch(vec![version], None).await?;

        let loaded = version_repo.load(saved[0].id).await?;
        assert_eq!(loaded.version_label.as_str(), "v1");
        assert_eq!(loaded.template_id, saved_template[0].id);
        assert!(loaded.parse_schema().is_ok());

        Ok(())
    }
}
