//! Data transfer objects for API requests and responses

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use contract_core_api::service::upgrading::UpgradePlan;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============ Health DTOs ============

/// Health and readiness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============ Wizard DTOs ============

/// Query for the wizard's template catalogue
#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    /// Jurisdiction code (IE, UK)
    pub jurisdiction: String,
}

/// One template family with its current version
#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub template_id: Uuid,
    pub code: String,
    pub name: String,
    pub jurisdiction: String,
    pub latest_version: VersionSummary,
}

/// Template catalogue for one jurisdiction
#[derive(Debug, Serialize)]
pub struct TemplateCatalogueResponse {
    pub jurisdiction: String,
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Serialize)]
pub struct VersionSummary {
    pub version_id: Uuid,
    pub version_label: String,
    pub created_at: DateTime<Utc>,
}

/// Wizard step-2 submission: raw form fields against one template version.
///
/// Field keys use the `fs__<path>` and `fslist__<table>__<row>__<column>`
/// conventions; values arrive as strings and are cast per the schema.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub client_id: Uuid,
    pub template_version_id: Uuid,
    /// ISO 4217; defaults to the client jurisdiction's currency
    #[validate(length(min = 3, max = 3, message = "must be a 3-letter ISO 4217 code"))]
    pub currency: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Staff member performing the operation, when known
    pub actor_id: Option<Uuid>,
}

// ============ Contract DTOs ============

/// Contract detail response
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub template_code: String,
    pub template_version_id: Uuid,
    pub version_label: String,
    pub status: String,
    pub currency: String,
    pub contract_value: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub data: serde_json::Value,
    pub generated_html_path: Option<String>,
    pub pdf_path: Option<String>,
    pub audit_log_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rendered preview plus artifact locations
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub contract_id: Uuid,
    pub html: String,
    pub html_path: Option<String>,
    pub pdf_path: Option<String>,
}

/// Inline edit of one dotted document path
#[derive(Debug, Deserialize, Validate)]
pub struct InlineUpdateRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub json_path: String,
    pub value: serde_json::Value,
    pub actor_id: Option<Uuid>,
}

/// Draft -> Sent handoff
#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub actor_id: Option<Uuid>,
}

/// Staff-recorded signature outcome (signed, declined, expired)
#[derive(Debug, Deserialize)]
pub struct SignatureRequest {
    pub event: String,
    pub notes: Option<String>,
    pub actor_id: Option<Uuid>,
}

// ============ Upgrade DTOs ============

/// Upgrade review: current vs latest version of the contract's family
#[derive(Debug, Serialize)]
pub struct UpgradePreviewResponse {
    pub contract_id: Uuid,
    pub current_version: VersionSummary,
    pub latest_version: VersionSummary,
    #[serde(flatten)]
    pub plan: UpgradePlan,
}

/// The reviewer's accepted subset of an upgrade plan
#[derive(Debug, Deserialize)]
pub struct ApplyUpgradeRequest {
    /// Section keys whose defaults should be merged in
    #[serde(default)]
    pub accept_sections: Vec<String>,
    /// Move values at `removed_paths` under the deprecated bucket
    #[serde(default)]
    pub archive_removed: bool,
    #[serde(default)]
    pub removed_paths: Vec<String>,
    pub actor_id: Option<Uuid>,
}

// ============ Webhook DTOs ============

/// Signature provider callback payload
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub contract_id: Uuid,
    pub event: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// Callback outcome: handled events transition the contract, unknown events
/// are recorded and acknowledged with 202.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub contract_id: Uuid,
    pub event: String,
    pub handled: bool,
    pub status: String,
}

// ============ Audit DTOs ============

/// Query for the audit listing
#[derive(Debug, Deserialize)]
pub struct AuditListQuery {
    pub contract_id: Option<Uuid>,
    pub action: Option<String>,
    pub actor_id: Option<Uuid>,
    /// 1-based page number
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ActorSummary {
    pub id: Uuid,
    pub display_name: String,
}

/// One audit entry joined with display data
#[derive(Debug, Serialize)]
pub struct AuditRow {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub client_name: Option<String>,
    pub action: String,
    pub actor: Option<ActorSummary>,
    pub changed_keys: Vec<String>,
    pub notes: Option<String>,
    pub happened_at: DateTime<Utc>,
}

/// Paginated audit listing, newest first
#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditRow>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}
