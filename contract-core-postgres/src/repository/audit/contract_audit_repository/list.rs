use std::error::Error;

use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use contract_core_db::repository::pagination::{Page, PageRequest};
use contract_core_db::store::AuditFilter;

use crate::utils::TryFromRow;

use super::repo_impl::ContractAuditRepositoryImpl;

impl ContractAuditRepositoryImpl {
    /// Filtered listing across contracts, newest first. Filter fields are
    /// ANDed; an empty filter matches everything.
    pub async fn list(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> Result<Page<ContractAuditModel>, Box<dyn Error + Send + Sync>> {
        let mut conditions: Vec<String> = Vec::new();
        if filter.contract_id.is_some() {
            conditions.push(format!("contract_id = ${}", conditions.len() + 1));
        }
        if filter.action.is_some() {
            conditions.push(format!("action = ${}", conditions.len() + 1));
        }
        if filter.actor_person_id.is_some() {
            conditions.push(format!("actor_person_id = ${}", conditions.len() + 1));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM contract_audits{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(contract_id) = filter.contract_id {
            count_query = count_query.bind(contract_id);
        }
        if let Some(action) = filter.action {
            count_query = count_query.bind(action.as_str());
        }
        if let Some(actor) = filter.actor_person_id {
            count_query = count_query.bind(actor);
        }
        let total = count_query.fetch_one(&*self.pool).await?;

        let page_sql = format!(
            "SELECT * FROM contract_audits{where_clause} \
             ORDER BY happened_at DESC, seq DESC LIMIT ${} OFFSET ${}",
            conditions.len() + 1,
            conditions.len() + 2,
        );
        let mut page_query = sqlx::query(&page_sql);
        if let Some(contract_id) = filter.contract_id {
            page_query = page_query.bind(contract_id);
        }
        if let Some(action) = filter.action {
            page_query = page_query.bind(action.as_str());
        }
        if let Some(actor) = filter.actor_person_id {
            page_query = page_query.bind(actor);
        }
        let rows = page_query
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(&*self.pool)
            .await?;

        let items = rows
            .iter()
            .map(ContractAuditModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use contract_core_api::domain::audit::AuditAction;
    use contract_core_db::repository::create_batch::CreateBatch;
    use contract_core_db::repository::pagination::PageRequest;
    use contract_core_db::store::AuditFilter;

    use super::super::test_utils::test_utils::create_test_audit;
    use crate::repository::contract::client_contract_repository::test_utils::test_utils::seed_draft_contract;

    #[tokio::test]
    #[ignore]
    async fn test_list_filters_and_pages() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let audit_repo = &ctx.repos().audits;

        let contract = seed_draft_contract(&ctx).await?;
        let first = create_test_audit(contract.id, AuditAction::CreateDraft, None)?;
        let second = create_test_audit(contract.id, AuditAction::SendForSignature, Some(&first))?;
        audit_repo
            .create_batch(vec![first.clone(), second.clone()], None)
            .await?;

        let filter = AuditFilter {
            contract_id: Some(contract.id),
            ..Default::default()
        };
        let page = audit_repo.list(&filter, PageRequest::new(1, 0)).await?;
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, second.id);
        assert!(page.has_more());

        let by_action = AuditFilter {
            contract_id: Some(contract.id),
            action: Some(AuditAction::CreateDraft),
            ..Default::default()
        };
        let page = audit_repo.list(&by_action, PageRequest::default()).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, first.id);

        Ok(())
    }
}
