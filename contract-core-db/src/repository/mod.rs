pub mod exist_by_ids;
pub mod load;
pub mod load_audits;
pub mod load_batch;
pub mod create_batch;
pub mod update_batch;
pub mod pagination;

// Re-exports
pub use exist_by_ids::*;
pub use load::*;
pub use load_audits::*;
pub use load_batch::*;
pub use create_batch::*;
pub use update_batch::*;
pub use pagination::*;
