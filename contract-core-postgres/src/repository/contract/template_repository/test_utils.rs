#[cfg(test)]
pub mod test_utils {
    use contract_core_api::domain::term::Jurisdiction;
    use contract_core_db::models::contract::template::ContractTemplateModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    /// Codes carry a UNIQUE constraint; suffix them so reruns do not collide.
    pub fn unique_code(prefix: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{prefix}_{}", &suffix[..8])
    }

    pub fn create_test_template(
        code: &str,
        name: &str,
        jurisdiction: Jurisdiction,
    ) -> ContractTemplateModel {
        ContractTemplateModel::new(
            HeaplessString::try_from(code).unwrap(),
            HeaplessString::try_from(name).unwrap(),
            jurisdiction,
        )
        .unwrap()
    }
}
