use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use contract_core_api::domain::term::Jurisdiction;
use contract_core_db::models::client::ClientModel;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use contract_core_db::models::contract::template::ContractTemplateModel;
use contract_core_db::models::contract::template_version::TemplateVersionModel;
use contract_core_db::models::person::PersonModel;
use contract_core_db::repository::create_batch::CreateBatch;
use contract_core_db::repository::load_batch::LoadBatch;
use contract_core_db::repository::pagination::{Page, PageRequest};
use contract_core_db::repository::update_batch::UpdateBatch;
use contract_core_db::store::{AuditFilter, ContractStore, StoreError, StoreResult};

use crate::repository::audit::ContractAuditRepositoryImpl;
use crate::repository::client::ClientRepositoryImpl;
use crate::repository::contract::{
    ClientContractRepositoryImpl, TemplateRepositoryImpl, TemplateVersionRepositoryImpl,
};
use crate::repository::person::PersonRepositoryImpl;

/// The Postgres-backed repository set. One instance per pool; repositories
/// share the pool and are cheap to hold together.
pub struct PostgresRepositories {
    pub pool: Arc<PgPool>,
    pub persons: PersonRepositoryImpl,
    pub clients: ClientRepositoryImpl,
    pub templates: TemplateRepositoryImpl,
    pub template_versions: TemplateVersionRepositoryImpl,
    pub contracts: ClientContractRepositoryImpl,
    pub audits: ContractAuditRepositoryImpl,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            persons: PersonRepositoryImpl::new(pool.clone()),
            clients: ClientRepositoryImpl::new(pool.clone()),
            templates: TemplateRepositoryImpl::new(pool.clone()),
            template_versions: TemplateVersionRepositoryImpl::new(pool.clone()),
            contracts: ClientContractRepositoryImpl::new(pool.clone()),
            audits: ContractAuditRepositoryImpl::new(pool.clone()),
            pool,
        }
    }

    /// Connect to `database_url` and build the repository set on the pool.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(Arc::new(pool)))
    }
}

fn backend(e: Box<dyn Error + Send + Sync>) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn sole<T>(mut items: Vec<T>) -> StoreResult<T> {
    items
        .pop()
        .ok_or_else(|| StoreError::Backend("write returned no rows".to_string()))
}

#[async_trait]
impl ContractStore for PostgresRepositories {
    async fn create_person(&self, person: PersonModel) -> StoreResult<PersonModel> {
        let created = self
            .persons
            .create_batch(vec![person], None)
            .await
            .map_err(backend)?;
        sole(created)
    }

    async fn person(&self, id: Uuid) -> StoreResult<PersonModel> {
        self.persons
            .find_by_id(id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found("person", id))
    }

    async fn persons_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<PersonModel>>> {
        self.persons.load_batch(ids).await.map_err(backend)
    }

    async fn create_client(&self, client: ClientModel) -> StoreResult<ClientModel> {
        let created = self
            .clients
            .create_batch(vec![client], None)
            .await
            .map_err(backend)?;
        sole(created)
    }

    async fn client(&self, id: Uuid) -> StoreResult<ClientModel> {
        self.clients
            .find_by_id(id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    async fn clients_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<ClientModel>>> {
        self.clients.load_batch(ids).await.map_err(backend)
    }

    async fn create_template(
        &self,
        template: ContractTemplateModel,
    ) -> StoreResult<ContractTemplateModel> {
        let created = self
            .templates
            .create_batch(vec![template], None)
            .await
            .map_err(backend)?;
        sole(created)
    }

    async fn template(&self, id: Uuid) -> StoreResult<ContractTemplateModel> {
        self.templates
            .find_by_id(id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found("contract template", id))
    }

    async fn template_by_code_hash(
        &self,
        code_hash: i64,
    ) -> StoreResult<Option<ContractTemplateModel>> {
        self.templates
            .find_by_code_hash(code_hash)
            .await
            .map_err(backend)
    }

    async fn templates_by_jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> StoreResult<Vec<ContractTemplateModel>> {
        self.templates
            .find_by_jurisdiction(jurisdiction)
            .await
            .map_err(backend)
    }

    async fn create_template_version(
        &self,
        version: TemplateVersionModel,
    ) -> StoreResult<TemplateVersionModel> {
        let created = self
            .template_versions
            .create_batch(vec![version], None)
            .await
            .map_err(backend)?;
        sole(created)
    }

    async fn template_version(&self, id: Uuid) -> StoreResult<TemplateVersionModel> {
        self.template_versions
            .find_by_id(id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found("template version", id))
    }

    async fn latest_template_version(
        &self,
        template_id: Uuid,
    ) -> StoreResult<Option<TemplateVersionModel>> {
        self.template_versions
            .find_latest_by_template_id(template_id)
            .await
            .map_err(backend)
    }

    async fn template_versions(
        &self,
        template_id: Uuid,
    ) -> StoreResult<Vec<TemplateVersionModel>> {
        self.template_versions
            .find_by_template_id(template_id)
            .await
            .map_err(backend)
    }

    async fn create_contract(
        &self,
        contract: ClientContractModel,
    ) -> StoreResult<ClientContractModel> {
        let created = self
            .contracts
            .create_batch(vec![contract], None)
            .await
            .map_err(backend)?;
        sole(created)
    }

    async fn contract(&self, id: Uuid) -> StoreResult<ClientContractModel> {
        self.contracts
            .find_by_id(id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found("contract", id))
    }

    async fn update_contract(
        &self,
        contract: ClientContractModel,
    ) -> StoreResult<ClientContractModel> {
        self.contracts
            .find_by_id(contract.id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found("contract", contract.id))?;
        let updated = self
            .contracts
            .update_batch(vec![contract], None)
            .await
            .map_err(backend)?;
        sole(updated)
    }

    async fn contract_ids_without_audits(&self) -> StoreResult<Vec<Uuid>> {
        self.contracts.find_without_audits().await.map_err(backend)
    }

    async fn append_audit(&self, entry: ContractAuditModel) -> StoreResult<ContractAuditModel> {
        let created = self
            .audits
            .create_batch(vec![entry], None)
            .await
            .map_err(backend)?;
        sole(created)
    }

    async fn latest_audit(&self, contract_id: Uuid) -> StoreResult<Option<ContractAuditModel>> {
        self.audits
            .find_latest_by_contract_id(contract_id)
            .await
            .map_err(backend)
    }

    async fn audits_for_contract(
        &self,
        contract_id: Uuid,
    ) -> StoreResult<Vec<ContractAuditModel>> {
        self.audits
            .find_by_contract_id(contract_id)
            .await
            .map_err(backend)
    }

    async fn audits(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> StoreResult<Page<ContractAuditModel>> {
        self.audits.list(filter, page).await.map_err(backend)
    }
}
