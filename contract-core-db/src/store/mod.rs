pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use contract_core_api::domain::audit::AuditAction;
use contract_core_api::domain::term::Jurisdiction;
use contract_core_api::error::CoreError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::client::ClientModel;
use crate::models::contract::client_contract::ClientContractModel;
use crate::models::contract::contract_audit::ContractAuditModel;
use crate::models::contract::template::ContractTemplateModel;
use crate::models::contract::template_version::TemplateVersionModel;
use crate::models::person::PersonModel;
use crate::repository::pagination::{Page, PageRequest};

/// Storage failures, transport-agnostic.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &str, id: Uuid) -> Self {
        StoreError::NotFound(format!("{entity} {id}"))
    }

    pub fn backend(e: impl std::fmt::Display) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<StoreError> for CoreError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => CoreError::NotFound(what),
            StoreError::Backend(detail) => CoreError::Storage(detail),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Filter for listing audit entries across contracts. All fields are ANDed;
/// a default filter matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditFilter {
    pub contract_id: Option<Uuid>,
    pub action: Option<AuditAction>,
    pub actor_person_id: Option<Uuid>,
}

/// The persistence surface the contract engine runs against.
///
/// Two implementations exist: the in-memory store for tests and demo runs,
/// and the Postgres repositories. Timestamps and mirrored columns are the
/// caller's concern; the store persists models as given and never rewrites
/// them. `update_contract` fails with `NotFound` rather than upserting.
#[async_trait]
pub trait ContractStore: Send + Sync {
    // --- persons ---

    async fn create_person(&self, person: PersonModel) -> StoreResult<PersonModel>;

    async fn person(&self, id: Uuid) -> StoreResult<PersonModel>;

    /// Batch lookup, same order as `ids`, `None` for misses.
    async fn persons_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<PersonModel>>>;

    // --- clients ---

    async fn create_client(&self, client: ClientModel) -> StoreResult<ClientModel>;

    async fn client(&self, id: Uuid) -> StoreResult<ClientModel>;

    async fn clients_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<ClientModel>>>;

    // --- template families ---

    async fn create_template(
        &self,
        template: ContractTemplateModel,
    ) -> StoreResult<ContractTemplateModel>;

    async fn template(&self, id: Uuid) -> StoreResult<ContractTemplateModel>;

    /// Lookup by the stable hash of the template code.
    async fn template_by_code_hash(
        &self,
        code_hash: i64,
    ) -> StoreResult<Option<ContractTemplateModel>>;

    async fn templates_by_jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> StoreResult<Vec<ContractTemplateModel>>;

    // --- template versions ---

    async fn create_template_version(
        &self,
        version: TemplateVersionModel,
    ) -> StoreResult<TemplateVersionModel>;

    async fn template_version(&self, id: Uuid) -> StoreResult<TemplateVersionModel>;

    /// Newest version of a family by `created_at`, later insertion winning
    /// ties. `None` when the family has no versions yet.
    async fn latest_template_version(
        &self,
        template_id: Uuid,
    ) -> StoreResult<Option<TemplateVersionModel>>;

    /// All versions of a family, oldest first.
    async fn template_versions(&self, template_id: Uuid)
        -> StoreResult<Vec<TemplateVersionModel>>;

    // --- contracts ---

    async fn create_contract(
        &self,
        contract: ClientContractModel,
    ) -> StoreResult<ClientContractModel>;

    async fn contract(&self, id: Uuid) -> StoreResult<ClientContractModel>;

    async fn update_contract(
        &self,
        contract: ClientContractModel,
    ) -> StoreResult<ClientContractModel>;

    /// Contracts that predate auditing: no audit entries at all.
    async fn contract_ids_without_audits(&self) -> StoreResult<Vec<Uuid>>;

    // --- audit trail ---

    /// Append an already-sealed entry. The store never recomputes hashes.
    async fn append_audit(&self, entry: ContractAuditModel) -> StoreResult<ContractAuditModel>;

    /// The newest entry for a contract, by chain position.
    async fn latest_audit(&self, contract_id: Uuid) -> StoreResult<Option<ContractAuditModel>>;

    /// A contract's full trail, oldest first (chain order).
    async fn audits_for_contract(
        &self,
        contract_id: Uuid,
    ) -> StoreResult<Vec<ContractAuditModel>>;

    /// Filtered listing across contracts, newest first.
    async fn audits(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> StoreResult<Page<ContractAuditModel>>;
}
