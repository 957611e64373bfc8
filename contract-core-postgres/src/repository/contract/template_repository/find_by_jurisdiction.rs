use std::error::Error;

use contract_core_api::domain::term::Jurisdiction;
use contract_core_db::models::contract::template::ContractTemplateModel;

use crate::utils::TryFromRow;

use super::repo_impl::TemplateRepositoryImpl;

impl TemplateRepositoryImpl {
    pub async fn find_by_jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Result<Vec<ContractTemplateModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            "SELECT * FROM contract_templates WHERE jurisdiction = $1 ORDER BY created_at, code",
        )
        .bind(jurisdiction.as_str())
        .fetch_all(&*self.pool)
        .await?;
        rows.iter()
            .map(ContractTemplateModel::try_from_row)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::repository::create_batch::CreateBatch;

    use super::super::test_utils::test_utils::{create_test_template, unique_code};

    #[tokio::test]
    #[ignore]
    async fn test_find_by_jurisdiction() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let template_repo = &ctx.repos().templates;

        let ie_code = unique_code("psra_letting");
        let templates = vec![
            create_test_template(&ie_code, "PSRA Letting Agreement", Jurisdiction::IE),
            create_test_template(&unique_code("uk_ast"), "Assured Shorthold", Jurisdiction::UK),
        ];
        template_repo.create_batch(templates, None).await?;

        let found = template_repo.find_by_jurisdiction(Jurisdiction::IE).await?;
        assert!(found.iter().any(|t| t.code.as_str() == ie_code));
        assert!(found.iter().all(|t| t.jurisdiction == Jurisdiction::IE));

        Ok(())
    }
}
