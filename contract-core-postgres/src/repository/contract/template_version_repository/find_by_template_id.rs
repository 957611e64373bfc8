use std::error::Error;

use contract_core_db::models::contract::template_version::TemplateVersionModel;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::TemplateVersionRepositoryImpl;

impl TemplateVersionRepositoryImpl {
    /// All versions of a family, oldest first.
    pub async fn find_by_template_id(
        &self,
        template_id: Uuid,
    ) -> Result<Vec<TemplateVersionModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            "SELECT * FROM contract_template_versions WHERE template_id = $1 \
             ORDER BY created_at, seq",
        )
        .bind(template_id)
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(TemplateVersionModel::try_from_row).collect()
    }

    /// The current version of a family: newest `created_at`, with insertion
    /// order breaking ties.
    pub async fn find_latest_by_template_id(
        &self,
        template_id: Uuid,
    ) -> Result<Option<TemplateVersionModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            "SELECT * FROM contract_template_versions WHERE template_id = $1 \
             ORDER BY created_at DESC, seq DESC LIMIT 1",
        )
        .bind(template_id)
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref()
            .map(TemplateVersionModel::try_from_row)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use uuid::Uuid;

    use super::super::super::template_repository::test_utils::test_utils::{
        create_test_template, unique_code,
    };
    use super::super::test_utils::test_utils::create_test_version;

    #[tokio::test]
    #[ignore]
    async fn test_find_by_template_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let template_repo = &ctx.repos().templates;
        let version_repo = &ctx.repos().template_versions;

        let template = create_test_template(
            &unique_code("psra_letting"),
            "PSRA Letting Agreement",
            Jurisdiction::IE,
        );
        let saved_template = template_repo.create_batch(vec![template], None).await?;

        let v1 = create_test_version(saved_template[0].id, "v1");
        let v2 = create_test_version(saved_template[0].id, "v2");
        version_repo.create_batch(vec![v1, v2], None).await?;

        let versions = version_repo
            .find_by_template_id(saved_template[0].id)
            .await?;
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version_label.as_str(), "v1");
        assert_eq!(versions[1].version_label.as_str(), "v2");

        let latest = version_repo
            .find_latest_by_template_id(saved_template[0].id)
            .await?;
        assert_eq!(latest.map(|v| v.version_label), Some(versions[1].version_label.clone()));

        let none = version_repo.find_latest_by_template_id(Uuid::new_v4()).await?;
        assert!(none.is_none());

        Ok(())
    }
}
