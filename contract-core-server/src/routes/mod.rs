//! API route handlers

pub mod audits;
pub mod contracts;
pub mod health;
pub mod webhooks;
pub mod wizard;

use axum::{routing::get, routing::post, Router};
use contract_core_api::domain::context::OpContext;
use uuid::Uuid;

use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Wizard endpoints
        .route("/wizard/templates", get(wizard::list_templates))
        .route("/wizard/contracts", post(wizard::create_contract))
        // Contract endpoints
        .route("/contracts/:contract_id", get(contracts::get_contract))
        .route("/contracts/:contract_id/preview", get(contracts::preview_contract))
        .route("/contracts/:contract_id/data", post(contracts::update_contract_data))
        .route("/contracts/:contract_id/send", post(contracts::send_contract))
        .route("/contracts/:contract_id/signature", post(contracts::record_signature))
        .route(
            "/contracts/:contract_id/upgrade",
            get(contracts::preview_upgrade).post(contracts::apply_upgrade),
        )
        // Signature provider callbacks
        .route("/webhooks/signature", post(webhooks::signature_webhook))
        // Audit trail
        .route("/audits", get(audits::list_audits))
        // State
        .with_state(state)
}

/// Requests carry the acting staff member when the frontend knows one;
/// anything else is recorded as a system operation.
pub(crate) fn op_context(actor_id: Option<Uuid>) -> OpContext {
    match actor_id {
        Some(id) => OpContext::actor(id),
        None => OpContext::system(),
    }
}
