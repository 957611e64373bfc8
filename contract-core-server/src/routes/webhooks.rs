//! Signature provider callbacks

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::dto::{WebhookRequest, WebhookResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Signature provider callback.
///
/// The body is decoded by hand so a malformed payload is rejected with 400
/// before any state or audit mutation. Known events answer 200; unknown
/// events are recorded as no-ops and answer 202.
pub async fn signature_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<WebhookResponse>)> {
    let req: WebhookRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("malformed webhook payload: {e}")))?;

    let outcome = state
        .service
        .handle_webhook(req.contract_id, &req.event, req.payload.as_ref())
        .await?;

    let status = if outcome.handled {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };

    Ok((
        status,
        Json(WebhookResponse {
            contract_id: req.contract_id,
            event: req.event,
            handled: outcome.handled,
            status: outcome.status.as_str().to_string(),
        }),
    ))
}
