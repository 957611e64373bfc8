pub mod repo_impl;
pub mod create_batch;
pub mod find_by_contract_id;
pub mod list;
pub mod load_audits;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ContractAuditRepositoryImpl;
