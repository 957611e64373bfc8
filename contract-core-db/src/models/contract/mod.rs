pub mod template;
pub mod template_version;
pub mod client_contract;
pub mod contract_audit;

// Re-exports
pub use template::*;
pub use template_version::*;
pub use client_contract::*;
pub use contract_audit::*;
