#[cfg(test)]
pub mod test_utils {
    use contract_core_api::domain::audit::AuditAction;
    use contract_core_db::models::contract::contract_audit::ContractAuditModel;
    use uuid::Uuid;

    pub fn create_test_audit(
        contract_id: Uuid,
        action: AuditAction,
        antecedent: Option<&ContractAuditModel>,
    ) -> Result<ContractAuditModel, String> {
        ContractAuditModel::chained(
            contract_id,
            action,
            None,
            None,
            Some(serde_json::json!({ "fees": { "base_ex_vat": 1000.0 } })),
            vec!["fees".to_string()],
            None,
            antecedent,
        )
    }
}
