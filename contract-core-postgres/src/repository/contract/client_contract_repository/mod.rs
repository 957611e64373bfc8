pub mod repo_impl;
pub mod load;
pub mod create_batch;
pub mod update_batch;
pub mod exist_by_ids;
pub mod find_without_audits;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ClientContractRepositoryImpl;
