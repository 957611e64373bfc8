//! Application state for the API server

use std::path::PathBuf;
use std::sync::Arc;

use contract_core_api::domain::render::PdfBackend;
use contract_core_db::store::ContractStore;

use crate::artifacts::ArtifactStore;
use crate::render::MiniJinjaRenderer;
use crate::service::ContractService;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Contract operations
    pub service: Arc<ContractService>,
    /// Raw storage handle, for readiness probes
    pub store: Arc<dyn ContractStore>,
    /// API version
    pub version: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContractStore>,
        artifacts_root: impl Into<PathBuf>,
        pdf_backends: Vec<Arc<dyn PdfBackend>>,
    ) -> Self {
        let service = Arc::new(ContractService::new(
            store.clone(),
            Arc::new(MiniJinjaRenderer::new()),
            pdf_backends,
            ArtifactStore::new(artifacts_root),
        ));

        Self {
            service,
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address, `host:port`
    pub addr: String,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            enable_cors: false,
        }
    }
}
