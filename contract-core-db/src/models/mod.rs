pub mod auditable;
pub mod identifiable;
pub mod person;
pub mod client;
pub mod contract;

// Re-exports
pub use auditable::*;
pub use identifiable::*;
pub use person::*;
pub use client::*;
pub use contract::*;
