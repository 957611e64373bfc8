//! Contract endpoints: detail, preview, inline edits, signature flow and
//! template upgrades

use axum::extract::{Path, State};
use axum::Json;
use contract_core_api::domain::signature::SignatureEvent;
use contract_core_db::models::contract::template_version::TemplateVersionModel;
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    ApplyUpgradeRequest, ContractResponse, InlineUpdateRequest, PreviewResponse, SendRequest,
    SignatureRequest, UpgradePreviewResponse, VersionSummary,
};
use crate::error::{ApiError, ApiResult};
use crate::routes::op_context;
use crate::service::ContractBundle;
use crate::state::AppState;

/// Contract detail
pub async fn get_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> ApiResult<Json<ContractResponse>> {
    let bundle = state.service.contract_detail(contract_id).await?;
    Ok(Json(contract_to_response(&bundle)))
}

/// Step 3: regenerate artifacts and return the rendered HTML.
pub async fn preview_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> ApiResult<Json<PreviewResponse>> {
    let (bundle, html) = state.service.preview(contract_id).await?;

    Ok(Json(PreviewResponse {
        contract_id: bundle.contract.id,
        html,
        html_path: bundle
            .contract
            .generated_html_path
            .as_ref()
            .map(|p| p.to_string()),
        pdf_path: bundle.contract.pdf_path.as_ref().map(|p| p.to_string()),
    }))
}

/// Inline edit of one document path, re-validated against the contract's
/// pinned schema version.
pub async fn update_contract_data(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    Json(req): Json<InlineUpdateRequest>,
) -> ApiResult<Json<ContractResponse>> {
    req.validate()?;

    let ctx = op_context(req.actor_id);
    let bundle = state
        .service
        .inline_update(&ctx, contract_id, &req.json_path, &req.value)
        .await?;

    Ok(Json(contract_to_response(&bundle)))
}

/// Draft -> Sent handoff to the signature provider.
pub async fn send_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    body: Option<Json<SendRequest>>,
) -> ApiResult<Json<ContractResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let ctx = op_context(req.actor_id);
    let bundle = state
        .service
        .send_for_signature(&ctx, contract_id, req.notes)
        .await?;

    Ok(Json(contract_to_response(&bundle)))
}

/// Staff-recorded signature outcome.
pub async fn record_signature(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    Json(req): Json<SignatureRequest>,
) -> ApiResult<Json<ContractResponse>> {
    let event = req
        .event
        .parse::<SignatureEvent>()
        .map_err(ApiError::BadRequest)?;

    let ctx = op_context(req.actor_id);
    let bundle = state
        .service
        .record_signature_event(&ctx, contract_id, event, req.notes)
        .await?;

    Ok(Json(contract_to_response(&bundle)))
}

/// Upgrade review: structural delta, template diff and pending defaults
/// against the family's current version.
pub async fn preview_upgrade(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> ApiResult<Json<UpgradePreviewResponse>> {
    let (bundle, latest, plan) = state.service.upgrade_preview(contract_id).await?;

    Ok(Json(UpgradePreviewResponse {
        contract_id: bundle.contract.id,
        current_version: version_summary(&bundle.version),
        latest_version: version_summary(&latest),
        plan,
    }))
}

/// Apply the reviewer's accepted subset of the upgrade.
pub async fn apply_upgrade(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    Json(req): Json<ApplyUpgradeRequest>,
) -> ApiResult<Json<ContractResponse>> {
    let ctx = op_context(req.actor_id);
    let bundle = state
        .service
        .apply_template_upgrade(
            &ctx,
            contract_id,
            &req.accept_sections,
            req.archive_removed,
            &req.removed_paths,
        )
        .await?;

    Ok(Json(contract_to_response(&bundle)))
}

pub(crate) fn contract_to_response(bundle: &ContractBundle) -> ContractResponse {
    ContractResponse {
        id: bundle.contract.id,
        client_id: bundle.contract.client_id,
        client_name: bundle.client.name.to_string(),
        template_code: bundle.template.code.to_string(),
        template_version_id: bundle.contract.template_version_id,
        version_label: bundle.version.version_label.to_string(),
        status: bundle.contract.status.as_str().to_string(),
        currency: bundle.contract.currency.to_string(),
        contract_value: bundle.contract.contract_value,
        start_date: bundle.contract.start_date,
        end_date: bundle.contract.end_date,
        data: bundle.contract.data_json.clone(),
        generated_html_path: bundle
            .contract
            .generated_html_path
            .as_ref()
            .map(|p| p.to_string()),
        pdf_path: bundle.contract.pdf_path.as_ref().map(|p| p.to_string()),
        audit_log_id: bundle.contract.audit_log_id,
        created_at: bundle.contract.created_at,
        updated_at: bundle.contract.updated_at,
    }
}

pub(crate) fn version_summary(version: &TemplateVersionModel) -> VersionSummary {
    VersionSummary {
        version_id: version.id,
        version_label: version.version_label.to_string(),
        created_at: version.created_at,
    }
}
