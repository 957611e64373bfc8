use std::error::Error;

use contract_core_db::models::contract::template::ContractTemplateModel;

use crate::utils::TryFromRow;

use super::repo_impl::TemplateRepositoryImpl;

impl TemplateRepositoryImpl {
    pub async fn find_by_code_hash(
        &self,
        code_hash: i64,
    ) -> Result<Option<ContractTemplateModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM contract_templates WHERE code_hash = $1")
            .bind(code_hash)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref()
            .map(ContractTemplateModel::try_from_row)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::models::contract::template::ContractTemplateModel;
    use contract_core_db::repository::create_batch::CreateBatch;

    use super::super::test_utils::test_utils::{create_test_template, unique_code};

    #[tokio::test]
    #[ignore]
    async fn test_find_by_code_hash() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let template_repo = &ctx.repos().templates;

        let code = unique_code("psra_sale");
        let template = create_test_template(&code, "PSRA Sale Agreement", Jurisdiction::IE);
        let saved = template_repo.create_batch(vec![template], None).await?;

        let hash = ContractTemplateModel::hash_code(&code)?;
        let found = template_repo.find_by_code_hash(hash).await?;
        assert_eq!(found.map(|t| t.id), Some(saved[0].id));

        let missing_hash = ContractTemplateModel::hash_code(&unique_code("never_seeded"))?;
        let found = template_repo.find_by_code_hash(missing_hash).await?;
        assert!(found.is_none());

        Ok(())
    }
}
