use chrono::{DateTime, Utc};
use contract_core_api::domain::schema::FormSchema;
use contract_core_api::error::CoreResult;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for one immutable version of a template family
///
/// Versions are never edited in place. A change to the HTML or the form
/// schema is a new row; contracts pin the row they were drafted against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVersionModel {
    pub id: Uuid,

    /// References ContractTemplateModel.id
    pub template_id: Uuid,

    /// Human-facing label, e.g. `v1`
    pub version_label: HeaplessString<20>,

    /// Jinja-style HTML template body
    pub html_template: String,

    /// Form schema as stored (JSONB); parse with [`Self::parse_schema`]
    pub form_schema: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

impl TemplateVersionModel {
    pub fn new(
        template_id: Uuid,
        version_label: HeaplessString<20>,
        html_template: String,
        form_schema: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id,
            version_label,
            html_template,
            form_schema,
            created_at: Utc::now(),
        }
    }

    /// Parse the stored schema, surfacing integrity problems as errors.
    pub fn parse_schema(&self) -> CoreResult<FormSchema> {
        FormSchema::parse(&self.form_schema)
    }
}

impl Identifiable for TemplateVersionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
