pub mod repo_impl;
pub mod load;
pub mod create_batch;
pub mod find_by_code_hash;
pub mod find_by_jurisdiction;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::TemplateRepositoryImpl;
