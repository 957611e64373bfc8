//! Wizard endpoints: template selection and draft creation

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use contract_core_api::domain::term::Jurisdiction;
use validator::Validate;

use crate::dto::{
    ContractResponse, CreateContractRequest, TemplateCatalogueResponse, TemplateQuery,
    TemplateSummary,
};
use crate::error::{ApiError, ApiResult};
use crate::routes::contracts::{contract_to_response, version_summary};
use crate::routes::op_context;
use crate::state::AppState;

/// Step 1: template families for a jurisdiction, each with its current
/// version.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> ApiResult<Json<TemplateCatalogueResponse>> {
    let jurisdiction = query
        .jurisdiction
        .parse::<Jurisdiction>()
        .map_err(ApiError::BadRequest)?;

    let catalogue = state
        .service
        .templates_for_jurisdiction(jurisdiction)
        .await?;

    Ok(Json(TemplateCatalogueResponse {
        jurisdiction: jurisdiction.as_str().to_string(),
        templates: catalogue
            .into_iter()
            .map(|(template, latest)| TemplateSummary {
                template_id: template.id,
                code: template.code.to_string(),
                name: template.name.to_string(),
                jurisdiction: template.jurisdiction.as_str().to_string(),
                latest_version: version_summary(&latest),
            })
            .collect(),
    }))
}

/// Step 2: submit the schema-driven form and create a Draft.
pub async fn create_contract(
    State(state): State<AppState>,
    Json(req): Json<CreateContractRequest>,
) -> ApiResult<(StatusCode, Json<ContractResponse>)> {
    req.validate()?;

    let ctx = op_context(req.actor_id);
    let bundle = state
        .service
        .create_draft(
            &ctx,
            req.client_id,
            req.template_version_id,
            req.currency.as_deref(),
            &req.fields,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(contract_to_response(&bundle))))
}
