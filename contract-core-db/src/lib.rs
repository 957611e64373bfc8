pub mod models;
pub mod repository;
pub mod store;
pub mod utils;

pub use models::*;
pub use repository::*;
pub use store::*;
