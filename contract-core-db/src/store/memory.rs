use std::collections::HashMap;

use async_trait::async_trait;
use contract_core_api::domain::term::Jurisdiction;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::client::ClientModel;
use crate::models::contract::client_contract::ClientContractModel;
use crate::models::contract::contract_audit::ContractAuditModel;
use crate::models::contract::template::ContractTemplateModel;
use crate::models::contract::template_version::TemplateVersionModel;
use crate::models::person::PersonModel;
use crate::repository::pagination::{Page, PageRequest};
use crate::store::{AuditFilter, ContractStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    persons: HashMap<Uuid, PersonModel>,
    clients: HashMap<Uuid, ClientModel>,
    templates: HashMap<Uuid, ContractTemplateModel>,
    /// Insertion order doubles as creation order for tie-breaking.
    versions: Vec<TemplateVersionModel>,
    contracts: HashMap<Uuid, ClientContractModel>,
    /// Append order is chain order.
    audits: Vec<ContractAuditModel>,
}

/// In-memory store for tests and demo runs without a database.
///
/// Fully implements [`ContractStore`]; state lives behind one lock and is
/// lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(entity: &str, id: Uuid) -> StoreError {
    StoreError::Backend(format!("{entity} {id} already exists"))
}

#[async_trait]
impl ContractStore for MemoryStore {
    async fn create_person(&self, person: PersonModel) -> StoreResult<PersonModel> {
        let mut inner = self.inner.write();
        if inner.persons.contains_key(&person.id) {
            return Err(duplicate("person", person.id));
        }
        inner.persons.insert(person.id, person.clone());
        Ok(person)
    }

    async fn person(&self, id: Uuid) -> StoreResult<PersonModel> {
        self.inner
            .read()
            .persons
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("person", id))
    }

    async fn persons_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<PersonModel>>> {
        let inner = self.inner.read();
        Ok(ids.iter().map(|id| inner.persons.get(id).cloned()).collect())
    }

    async fn create_client(&self, client: ClientModel) -> StoreResult<ClientModel> {
        let mut inner = self.inner.write();
        if inner.clients.contains_key(&client.id) {
            return Err(duplicate("client", client.id));
        }
        inner.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn client(&self, id: Uuid) -> StoreResult<ClientModel> {
        self.inner
            .read()
            .clients
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    async fn clients_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<ClientModel>>> {
        let inner = self.inner.read();
        Ok(ids.iter().map(|id| inner.clients.get(id).cloned()).collect())
    }

    async fn create_template(
        &self,
        template: ContractTemplateModel,
    ) -> StoreResult<ContractTemplateModel> {
        let mut inner = self.inner.write();
        if inner.templates.contains_key(&template.id) {
            return Err(duplicate("template", template.id));
        }
        if inner.templates.values().any(|t| t.code_hash == template.code_hash) {
            return Err(StoreError::Backend(format!(
                "template code '{}' already exists",
                template.code
            )));
        }
        inner.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn template(&self, id: Uuid) -> StoreResult<ContractTemplateModel> {
        self.inner
            .read()
            .templates
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("template", id))
    }

    async fn template_by_code_hash(
        &self,
        code_hash: i64,
    ) -> StoreResult<Option<ContractTemplateModel>> {
        Ok(self
            .inner
            .read()
            .templates
            .values()
            .find(|t| t.code_hash == code_hash)
            .cloned())
    }

    async fn templates_by_jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> StoreResult<Vec<ContractTemplateModel>> {
        let mut templates: Vec<ContractTemplateModel> = self
            .inner
            .read()
            .templates
            .values()
            .filter(|t| t.jurisdiction == jurisdiction)
            .cloned()
            .collect();
        templates.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.as_str().cmp(b.code.as_str()))
        });
        Ok(templates)
    }

    async fn create_template_version(
        &self,
        version: TemplateVersionModel,
    ) -> StoreResult<TemplateVersionModel> {
        let mut inner = self.inner.write();
        if inner.versions.iter().any(|v| v.id == version.id) {
            return Err(duplicate("template version", version.id));
        }
        inner.versions.push(version.clone());
        Ok(version)
    }

    async fn template_version(&self, id: Uuid) -> StoreResult<TemplateVersionModel> {
        self.inner
            .read()
            .versions
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("template version", id))
    }

    async fn latest_template_version(
        &self,
        template_id: Uuid,
    ) -> StoreResult<Option<TemplateVersionModel>> {
        let inner = self.inner.read();
        let mut latest: Option<&TemplateVersionModel> = None;
        for version in inner.versions.iter().filter(|v| v.template_id == template_id) {
            // >= lets a later insertion win created_at ties.
            if latest.map(|best| version.created_at >= best.created_at).unwrap_or(true) {
                latest = Some(version);
            }
        }
        Ok(latest.cloned())
    }

    async fn template_versions(
        &self,
        template_id: Uuid,
    ) -> StoreResult<Vec<TemplateVersionModel>> {
        Ok(self
            .inner
            .read()
            .versions
            .iter()
            .filter(|v| v.template_id == template_id)
            .cloned()
            .collect())
    }

    async fn create_contract(
        &self,
        contract: ClientContractModel,
    ) -> StoreResult<ClientContractModel> {
        let mut inner = self.inner.write();
        if inner.contracts.contains_key(&contract.id) {
            return Err(duplicate("contract", contract.id));
        }
        inner.contracts.insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn contract(&self, id: Uuid) -> StoreResult<ClientContractModel> {
        self.inner
            .read()
            .contracts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("contract", id))
    }

    async fn update_contract(
        &self,
        contract: ClientContractModel,
    ) -> StoreResult<ClientContractModel> {
        let mut inner = self.inner.write();
        if !inner.contracts.contains_key(&contract.id) {
            return Err(StoreError::not_found("contract", contract.id));
        }
        inner.contracts.insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn contract_ids_without_audits(&self) -> StoreResult<Vec<Uuid>> {
        let inner = self.inner.read();
        let mut orphans: Vec<&ClientContractModel> = inner
            .contracts
            .values()
            .filter(|c| !inner.audits.iter().any(|a| a.contract_id == c.id))
            .collect();
        orphans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orphans.iter().map(|c| c.id).collect())
    }

    async fn append_audit(&self, entry: ContractAuditModel) -> StoreResult<ContractAuditModel> {
        let mut inner = self.inner.write();
        if inner.audits.iter().any(|a| a.id == entry.id) {
            return Err(duplicate("audit entry", entry.id));
        }
        inner.audits.push(entry.clone());
        Ok(entry)
    }

    async fn latest_audit(&self, contract_id: Uuid) -> StoreResult<Option<ContractAuditModel>> {
        Ok(self
            .inner
            .read()
            .audits
            .iter()
            .rev()
            .find(|a| a.contract_id == contract_id)
            .cloned())
    }

    async fn audits_for_contract(
        &self,
        contract_id: Uuid,
    ) -> StoreResult<Vec<ContractAuditModel>> {
        Ok(self
            .inner
            .read()
            .audits
            .iter()
            .filter(|a| a.contract_id == contract_id)
            .cloned()
            .collect())
    }

    async fn audits(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> StoreResult<Page<ContractAuditModel>> {
        let inner = self.inner.read();
        let mut matched: Vec<ContractAuditModel> = inner
            .audits
            .iter()
            .filter(|a| filter.contract_id.map(|id| a.contract_id == id).unwrap_or(true))
            .filter(|a| filter.action.map(|action| a.action == action).unwrap_or(true))
            .filter(|a| {
                filter
                    .actor_person_id
                    .map(|id| a.actor_person_id == Some(id))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        matched.reverse();

        let total = matched.len();
        let items = matched
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Ok(Page::new(items, total, page.limit, page.offset))
    }
}
