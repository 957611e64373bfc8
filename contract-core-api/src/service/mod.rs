pub mod drafting;
pub mod upgrading;

// Re-exports
pub use drafting::*;
pub use upgrading::*;
