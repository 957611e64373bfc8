//! Audit trail listing

use axum::extract::{Query, State};
use axum::Json;

use contract_core_api::domain::audit::AuditAction;
use contract_core_db::repository::pagination::PageRequest;
use contract_core_db::store::AuditFilter;

use crate::dto::{ActorSummary, AuditListQuery, AuditListResponse, AuditRow};
use crate::error::{ApiError, ApiResult};
use crate::service::AuditEntry;
use crate::state::AppState;

/// List audit entries, newest first, optionally filtered by contract,
/// action, or acting person.
pub async fn list_audits(
    State(state): State<AppState>,
    Query(query): Query<AuditListQuery>,
) -> ApiResult<Json<AuditListResponse>> {
    let action = match query.action.as_deref() {
        Some(raw) => Some(raw.parse::<AuditAction>().map_err(ApiError::BadRequest)?),
        None => None,
    };

    let filter = AuditFilter {
        contract_id: query.contract_id,
        action,
        actor_person_id: query.actor_id,
    };
    let per_page = query
        .per_page
        .unwrap_or(PageRequest::default().limit)
        .clamp(1, PageRequest::MAX_LIMIT);
    let request = PageRequest::for_page(per_page, query.page.unwrap_or(1));

    let page = state.service.list_audits(&filter, request).await?;
    let page = page.map(audit_row);

    Ok(Json(AuditListResponse {
        total: page.total,
        page: page.page_number(),
        per_page: page.limit,
        total_pages: page.total_pages(),
        items: page.items,
    }))
}

fn audit_row(entry: AuditEntry) -> AuditRow {
    let AuditEntry {
        audit,
        client_name,
        actor,
    } = entry;

    AuditRow {
        id: audit.id,
        contract_id: audit.contract_id,
        client_name,
        action: audit.action.as_str().to_string(),
        actor: actor.map(|person| ActorSummary {
            id: person.id,
            display_name: person.display_name.to_string(),
        }),
        changed_keys: audit.changed_keys,
        notes: audit.notes.map(|n| n.to_string()),
        happened_at: audit.happened_at,
    }
}
