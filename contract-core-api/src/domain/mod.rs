pub mod audit;
pub mod context;
pub mod document;
pub mod ingest;
pub mod render;
pub mod schema;
pub mod signature;
pub mod term;
pub mod upgrade;
pub mod validate;

// Re-exports
pub use audit::*;
pub use context::*;
pub use document::*;
pub use ingest::*;
pub use render::*;
pub use schema::*;
pub use signature::*;
pub use term::*;
pub use upgrade::*;
pub use validate::*;
