use std::error::Error;

use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::ContractAuditRepositoryImpl;

impl ContractAuditRepositoryImpl {
    /// A contract's full trail in chain order, oldest first.
    pub async fn find_by_contract_id(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<ContractAuditModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            "SELECT * FROM contract_audits WHERE contract_id = $1 ORDER BY happened_at, seq",
        )
        .bind(contract_id)
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(ContractAuditModel::try_from_row).collect()
    }

    /// The chain head: the entry the next one must link onto.
    pub async fn find_latest_by_contract_id(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<ContractAuditModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            "SELECT * FROM contract_audits WHERE contract_id = $1 \
             ORDER BY happened_at DESC, seq DESC LIMIT 1",
        )
        .bind(contract_id)
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref()
            .map(ContractAuditModel::try_from_row)
            .transpose()
    }
}
