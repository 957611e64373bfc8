use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::document::Document;
use crate::domain::term::Jurisdiction;
use crate::error::CoreResult;

/// Contract metadata exposed to templates alongside the document itself.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub contract_id: Uuid,
    pub client_name: String,
    pub template_code: String,
    pub version_label: String,
    pub jurisdiction: Jurisdiction,
    pub currency: String,
    pub generated_at: DateTime<Utc>,
}

/// Turns an HTML template plus a document into final HTML.
pub trait TemplateRenderer: Send + Sync {
    fn render(
        &self,
        template: &str,
        document: &Document,
        context: &RenderContext,
    ) -> CoreResult<String>;
}

/// One PDF conversion tool. Backends are tried in order until one succeeds;
/// a failing backend must leave no partial file behind at `output`.
#[async_trait]
pub trait PdfBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn render_pdf(&self, html: &str, output: &Path) -> CoreResult<()>;
}
