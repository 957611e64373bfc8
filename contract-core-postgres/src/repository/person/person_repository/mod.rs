pub mod repo_impl;
pub mod load;
pub mod load_batch;
pub mod create_batch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::PersonRepositoryImpl;
