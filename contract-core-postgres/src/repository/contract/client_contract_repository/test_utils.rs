#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use contract_core_api::domain::signature::SignStatus;
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::models::contract::client_contract::ClientContractModel;
    use contract_core_db::repository::create_batch::CreateBatch;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    use crate::repository::client::client_repository::test_utils::test_utils::create_test_client;
    use crate::repository::contract::template_repository::test_utils::test_utils::{
        create_test_template, unique_code,
    };
    use crate::repository::contract::template_version_repository::test_utils::test_utils::create_test_version;
    use crate::test_helper::TestContext;

    pub fn create_test_contract(
        client_id: Uuid,
        template_version_id: Uuid,
    ) -> ClientContractModel {
        ClientContractModel {
            id: Uuid::new_v4(),
            client_id,
            template_version_id,
            status: SignStatus::Draft,
            currency: HeaplessString::try_from("EUR").unwrap(),
            contract_value: None,
            start_date: None,
            end_date: None,
            data_json: serde_json::json!({ "fees": { "base_ex_vat": 1000.0 } }),
            generated_html_path: None,
            pdf_path: None,
            audit_log_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Seed the client/template/version chain and a draft contract on it.
    pub async fn seed_draft_contract(
        ctx: &TestContext,
    ) -> Result<ClientContractModel, Box<dyn std::error::Error + Send + Sync>> {
        let client = create_test_client("Maple Court Management", Jurisdiction::IE);
        let saved_client = ctx.repos().clients.create_batch(vec![client], None).await?;

        let template = create_test_template(
            &unique_code("psra_letting"),
            "PSRA Letting Agreement",
            Jurisdiction::IE,
        );
        let saved_template = ctx
            .repos()
            .templates
            .create_batch(vec![template], None)
            .await?;

        let version = create_test_version(saved_template[0].id, "v1");
        let saved_version = ctx
            .repos()
            .template_versions
            .create_batch(vec![version], None)
            .await?;

        let contract = create_test_contract(saved_client[0].id, saved_version[0].id);
        let mut saved = ctx
            .repos()
            .contracts
            .create_batch(vec![contract], None)
            .await?;
        Ok(saved.remove(0))
    }
}
