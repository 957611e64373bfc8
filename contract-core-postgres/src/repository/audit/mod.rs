pub mod contract_audit_repository;

pub use contract_audit_repository::ContractAuditRepositoryImpl;
