pub mod client_contract_repository;
pub mod template_repository;
pub mod template_version_repository;

pub use client_contract_repository::ClientContractRepositoryImpl;
pub use template_repository::TemplateRepositoryImpl;
pub use template_version_repository::TemplateVersionRepositoryImpl;
