//! Contract operations behind the HTTP surface.
//!
//! Every mutation follows one shape: load, check, mutate in memory, append
//! the audit entry, persist the contract once, refresh artifacts. Artifact
//! refresh is best-effort everywhere except the preview endpoint; a dead
//! PDF converter must never fail a contract write.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use contract_core_api::domain::audit::{changed_keys, AuditAction};
use contract_core_api::domain::context::OpContext;
use contract_core_api::domain::document::Document;
use contract_core_api::domain::render::{PdfBackend, RenderContext, TemplateRenderer};
use contract_core_api::domain::signature::{SignStatus, SignatureEvent};
use contract_core_api::domain::term::Jurisdiction;
use contract_core_api::domain::upgrade::apply_upgrade;
use contract_core_api::error::{CoreError, CoreResult};
use contract_core_api::service::drafting;
use contract_core_api::service::upgrading::{plan_upgrade, UpgradePlan};
use contract_core_db::models::client::ClientModel;
use contract_core_db::models::contract::client_contract::ClientContractModel;
use contract_core_db::models::contract::contract_audit::ContractAuditModel;
use contract_core_db::models::contract::template::ContractTemplateModel;
use contract_core_db::models::contract::template_version::TemplateVersionModel;
use contract_core_db::models::person::PersonModel;
use contract_core_db::repository::pagination::{Page, PageRequest};
use contract_core_db::store::{AuditFilter, ContractStore, StoreError};
use heapless::String as HeaplessString;
use uuid::Uuid;

use crate::artifacts::ArtifactStore;
use crate::pdf;

/// A contract with the rows every response needs alongside it.
pub struct ContractBundle {
    pub contract: ClientContractModel,
    pub client: ClientModel,
    pub template: ContractTemplateModel,
    pub version: TemplateVersionModel,
}

/// One audit entry joined with display data for listings.
pub struct AuditEntry {
    pub audit: ContractAuditModel,
    pub client_name: Option<String>,
    pub actor: Option<PersonModel>,
}

/// Outcome of a signature provider callback.
pub struct WebhookOutcome {
    pub handled: bool,
    pub status: SignStatus,
}

pub struct ContractService {
    store: Arc<dyn ContractStore>,
    renderer: Arc<dyn TemplateRenderer>,
    pdf_backends: Vec<Arc<dyn PdfBackend>>,
    artifacts: ArtifactStore,
}

impl ContractService {
    pub fn new(
        store: Arc<dyn ContractStore>,
        renderer: Arc<dyn TemplateRenderer>,
        pdf_backends: Vec<Arc<dyn PdfBackend>>,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            store,
            renderer,
            pdf_backends,
            artifacts,
        }
    }

    // --- wizard ---

    /// Template families available in one jurisdiction, each with its
    /// current version. Families with no versions yet stay out.
    pub async fn templates_for_jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> CoreResult<Vec<(ContractTemplateModel, TemplateVersionModel)>> {
        let templates = self.store.templates_by_jurisdiction(jurisdiction).await?;

        let mut catalogue = Vec::with_capacity(templates.len());
        for template in templates {
            if let Some(latest) = self.store.latest_template_version(template.id).await? {
                catalogue.push((template, latest));
            }
        }
        Ok(catalogue)
    }

    /// Ingest a wizard submission into a persisted Draft with its opening
    /// audit entry. Any validation or policy failure rejects the submission
    /// whole; nothing is written.
    pub async fn create_draft(
        &self,
        ctx: &OpContext,
        client_id: Uuid,
        template_version_id: Uuid,
        currency: Option<&str>,
        fields: &BTreeMap<String, String>,
    ) -> CoreResult<ContractBundle> {
        let client = self.store.client(client_id).await?;
        let version = self.store.template_version(template_version_id).await?;
        let template = self.store.template(version.template_id).await?;
        let schema = version.parse_schema()?;

        let (document, mirror) = drafting::ingest_draft(fields, &schema, client.jurisdiction)?;

        let currency = currency_column(
            currency.unwrap_or_else(|| client.jurisdiction.default_currency()),
        )?;

        let now = Utc::now();
        let contract = ClientContractModel {
            id: Uuid::new_v4(),
            client_id: client.id,
            template_version_id: version.id,
            status: SignStatus::Draft,
            currency,
            contract_value: mirror.contract_value,
            start_date: mirror.start_date,
            end_date: mirror.end_date,
            data_json: serde_json::Value::from(&document),
            generated_html_path: None,
            pdf_path: None,
            audit_log_id: None,
            created_at: now,
            updated_at: now,
        };

        let contract = self.store.create_contract(contract).await?;
        let mut bundle = ContractBundle {
            contract,
            client,
            template,
            version,
        };

        self.append_audit(
            &mut bundle.contract,
            AuditAction::CreateDraft,
            ctx,
            None,
            Some(serde_json::Value::from(&document)),
            changed_keys(&Document::new(), &document),
            None,
        )
        .await?;

        self.refresh_artifacts(&mut bundle).await;
        self.store.update_contract(bundle.contract.clone()).await?;
        Ok(bundle)
    }

    // --- reads ---

    pub async fn contract_detail(&self, id: Uuid) -> CoreResult<ContractBundle> {
        let contract = self.store.contract(id).await?;
        self.bundle(contract).await
    }

    /// Regenerate artifacts and hand back the rendered HTML. Unlike the
    /// mutation paths, render trouble here is the caller's problem.
    pub async fn preview(&self, id: Uuid) -> CoreResult<(ContractBundle, String)> {
        let contract = self.store.contract(id).await?;
        let mut bundle = self.bundle(contract).await?;

        let html = self.generate_artifacts(&mut bundle).await?;
        self.store.update_contract(bundle.contract.clone()).await?;
        Ok((bundle, html))
    }

    // --- inline edits ---

    /// Set one dotted path on the stored document, re-validate against the
    /// contract's schema, and re-check the term policy. Terminal contracts
    /// reject edits outright.
    pub async fn inline_update(
        &self,
        ctx: &OpContext,
        id: Uuid,
        path: &str,
        value: &serde_json::Value,
    ) -> CoreResult<ContractBundle> {
        let contract = self.store.contract(id).await?;
        let mut bundle = self.bundle(contract).await?;

        reject_terminal(&bundle.contract, "edited")?;

        let schema = bundle.version.parse_schema()?;
        let before = bundle.contract.document()?;

        let after = drafting::apply_inline_edit(&before, &schema, path, value)?;
        drafting::enforce_term_policy(&after, bundle.client.jurisdiction)?;
        let mirror = drafting::mirrored_columns(&after)?;

        let changed = changed_keys(&before, &after);

        bundle.contract.set_document(&after);
        bundle.contract.contract_value = mirror.contract_value;
        bundle.contract.start_date = mirror.start_date;
        bundle.contract.end_date = mirror.end_date;

        self.append_audit(
            &mut bundle.contract,
            AuditAction::InlineUpdate,
            ctx,
            Some(serde_json::Value::from(&before)),
            Some(serde_json::Value::from(&after)),
            changed,
            None,
        )
        .await?;

        self.refresh_artifacts(&mut bundle).await;
        self.store.update_contract(bundle.contract.clone()).await?;
        Ok(bundle)
    }

    // --- signature flow ---

    pub async fn send_for_signature(
        &self,
        ctx: &OpContext,
        id: Uuid,
        notes: Option<String>,
    ) -> CoreResult<ContractBundle> {
        self.transition(ctx, id, SignStatus::Sent, AuditAction::SendForSignature, notes)
            .await
    }

    /// Staff-recorded signature outcome, same state machine as the webhook.
    pub async fn record_signature_event(
        &self,
        ctx: &OpContext,
        id: Uuid,
        event: SignatureEvent,
        notes: Option<String>,
    ) -> CoreResult<ContractBundle> {
        self.transition(ctx, id, event.target_status(), event.audit_action(), notes)
            .await
    }

    /// Signature provider callback. Known events drive the state machine;
    /// unknown events leave the contract untouched but still land in the
    /// audit trail with the payload attached.
    pub async fn handle_webhook(
        &self,
        id: Uuid,
        event: &str,
        payload: Option<&serde_json::Value>,
    ) -> CoreResult<WebhookOutcome> {
        match event.parse::<SignatureEvent>() {
            Ok(known) => {
                let bundle = self
                    .record_signature_event(
                        &OpContext::system(),
                        id,
                        known,
                        Some(format!("provider webhook '{event}'")),
                    )
                    .await?;
                Ok(WebhookOutcome {
                    handled: true,
                    status: bundle.contract.status,
                })
            }
            Err(_) => {
                let mut contract = self.store.contract(id).await?;
                let status = contract.status;

                self.append_audit(
                    &mut contract,
                    AuditAction::SignatureWebhookUnknown,
                    &OpContext::system(),
                    None,
                    Some(serde_json::json!({
                        "event": event,
                        "payload": payload.cloned().unwrap_or(serde_json::Value::Null),
                    })),
                    Vec::new(),
                    Some(format!("ignored unknown webhook event '{event}'")),
                )
                .await?;
                self.store.update_contract(contract).await?;

                Ok(WebhookOutcome {
                    handled: false,
                    status,
                })
            }
        }
    }

    async fn transition(
        &self,
        ctx: &OpContext,
        id: Uuid,
        next: SignStatus,
        action: AuditAction,
        notes: Option<String>,
    ) -> CoreResult<ContractBundle> {
        let contract = self.store.contract(id).await?;
        let mut bundle = self.bundle(contract).await?;

        let previous = bundle.contract.status;
        bundle.contract.status = previous.transition(next)?;
        bundle.contract.updated_at = Utc::now();

        let new_state = serde_json::json!({ "sign_status": bundle.contract.status.as_str() });
        self.append_audit(
            &mut bundle.contract,
            action,
            ctx,
            Some(serde_json::json!({ "sign_status": previous.as_str() })),
            Some(new_state),
            vec!["sign_status".to_string()],
            notes,
        )
        .await?;

        self.store.update_contract(bundle.contract.clone()).await?;
        Ok(bundle)
    }

    // --- template upgrades ---

    /// Compare the contract against its family's current version. Nothing is
    /// written; a contract already on the latest version gets an empty plan
    /// flagged `up_to_date`.
    pub async fn upgrade_preview(
        &self,
        id: Uuid,
    ) -> CoreResult<(ContractBundle, TemplateVersionModel, UpgradePlan)> {
        let contract = self.store.contract(id).await?;
        let bundle = self.bundle(contract).await?;
        let latest = self.latest_version(&bundle).await?;

        let document = bundle.contract.document()?;
        let old_schema = bundle.version.parse_schema()?;
        let new_schema = latest.parse_schema()?;

        let plan = plan_upgrade(
            &document,
            &old_schema,
            &new_schema,
            &bundle.version.html_template,
            &latest.html_template,
        );

        Ok((bundle, latest, plan))
    }

    /// Re-point the contract at its family's latest version, merging the
    /// accepted sections' defaults and archiving the reviewer's removed
    /// paths. Existing values are never overwritten.
    pub async fn apply_template_upgrade(
        &self,
        ctx: &OpContext,
        id: Uuid,
        accepted_sections: &[String],
        archive_removed: bool,
        removed_paths: &[String],
    ) -> CoreResult<ContractBundle> {
        let contract = self.store.contract(id).await?;
        let mut bundle = self.bundle(contract).await?;

        reject_terminal(&bundle.contract, "upgraded")?;

        let latest = self.latest_version(&bundle).await?;
        if latest.id == bundle.contract.template_version_id {
            return Err(CoreError::InvalidTransition(format!(
                "contract is already on version '{}'",
                latest.version_label
            )));
        }

        let new_schema = latest.parse_schema()?;
        let before = bundle.contract.document()?;

        let after = apply_upgrade(
            &before,
            &new_schema,
            accepted_sections,
            archive_removed,
            removed_paths,
        )?;
        drafting::enforce_term_policy(&after, bundle.client.jurisdiction)?;
        let mirror = drafting::mirrored_columns(&after)?;

        let changed = changed_keys(&before, &after);
        let notes = format!(
            "upgraded from '{}' to '{}'",
            bundle.version.version_label, latest.version_label
        );

        bundle.contract.template_version_id = latest.id;
        bundle.contract.set_document(&after);
        bundle.contract.contract_value = mirror.contract_value;
        bundle.contract.start_date = mirror.start_date;
        bundle.contract.end_date = mirror.end_date;

        self.append_audit(
            &mut bundle.contract,
            AuditAction::TemplateUpgrade,
            ctx,
            Some(serde_json::Value::from(&before)),
            Some(serde_json::Value::from(&after)),
            changed,
            Some(notes),
        )
        .await?;

        bundle.version = latest;
        self.refresh_artifacts(&mut bundle).await;
        self.store.update_contract(bundle.contract.clone()).await?;
        Ok(bundle)
    }

    // --- audit trail ---

    /// Filtered audit listing, newest first, joined with client and actor
    /// display data.
    pub async fn list_audits(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> CoreResult<Page<AuditEntry>> {
        let page = self.store.audits(filter, page).await?;

        let actor_ids: Vec<Uuid> = page
            .items
            .iter()
            .filter_map(|entry| entry.actor_person_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let actors: HashMap<Uuid, PersonModel> = self
            .store
            .persons_batch(&actor_ids)
            .await?
            .into_iter()
            .flatten()
            .map(|person| (person.id, person))
            .collect();

        // Resolve contract -> client, tolerating rows whose contract has
        // since disappeared, then fetch the client names in one batch.
        let contract_ids: BTreeSet<Uuid> =
            page.items.iter().map(|entry| entry.contract_id).collect();
        let mut contract_clients: HashMap<Uuid, Uuid> = HashMap::new();
        for contract_id in contract_ids {
            match self.store.contract(contract_id).await {
                Ok(contract) => {
                    contract_clients.insert(contract_id, contract.client_id);
                }
                Err(StoreError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        let client_ids: Vec<Uuid> = contract_clients
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let clients: HashMap<Uuid, ClientModel> = self
            .store
            .clients_batch(&client_ids)
            .await?
            .into_iter()
            .flatten()
            .map(|client| (client.id, client))
            .collect();
        let client_names: HashMap<Uuid, String> = contract_clients
            .into_iter()
            .filter_map(|(contract_id, client_id)| {
                clients
                    .get(&client_id)
                    .map(|client| (contract_id, client.name.to_string()))
            })
            .collect();

        Ok(page.map(|audit| AuditEntry {
            client_name: client_names.get(&audit.contract_id).cloned(),
            actor: audit
                .actor_person_id
                .and_then(|id| actors.get(&id).cloned()),
            audit,
        }))
    }

    /// Write bootstrap entries for contracts that predate the audit trail,
    /// snapshotting each contract's current document. Returns how many were
    /// written.
    pub async fn backfill_audits(&self, ctx: &OpContext) -> CoreResult<usize> {
        let ids = self.store.contract_ids_without_audits().await?;

        let mut written = 0usize;
        for id in &ids {
            let mut contract = self.store.contract(*id).await?;
            let document = contract.document()?;

            self.append_audit(
                &mut contract,
                AuditAction::Backfill,
                ctx,
                None,
                Some(serde_json::Value::from(&document)),
                Vec::new(),
                Some("bootstrap entry for a contract created before auditing".to_string()),
            )
            .await?;
            self.store.update_contract(contract).await?;
            written += 1;
        }

        Ok(written)
    }

    // --- internals ---

    async fn bundle(&self, contract: ClientContractModel) -> CoreResult<ContractBundle> {
        let client = self.store.client(contract.client_id).await?;
        let version = self
            .store
            .template_version(contract.template_version_id)
            .await?;
        let template = self.store.template(version.template_id).await?;
        Ok(ContractBundle {
            contract,
            client,
            template,
            version,
        })
    }

    async fn latest_version(
        &self,
        bundle: &ContractBundle,
    ) -> CoreResult<TemplateVersionModel> {
        self.store
            .latest_template_version(bundle.template.id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound(format!(
                    "template {} has no versions",
                    bundle.template.code
                ))
            })
    }

    /// Seal a new entry onto the contract's chain and point the contract at
    /// it. The caller persists the contract afterwards.
    #[allow(clippy::too_many_arguments)]
    async fn append_audit(
        &self,
        contract: &mut ClientContractModel,
        action: AuditAction,
        ctx: &OpContext,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
        changed: Vec<String>,
        notes: Option<String>,
    ) -> CoreResult<ContractAuditModel> {
        let antecedent = self.store.latest_audit(contract.id).await?;

        let entry = ContractAuditModel::chained(
            contract.id,
            action,
            ctx.actor_person_id,
            before,
            after,
            changed,
            notes.as_deref().map(clip_notes),
            antecedent.as_ref(),
        )
        .map_err(CoreError::Storage)?;

        let entry = self.store.append_audit(entry).await?;
        contract.audit_log_id = Some(entry.id);
        Ok(entry)
    }

    /// Render the document against its version's HTML and write artifacts,
    /// updating the contract's path columns. PDF exhaustion clears the path
    /// rather than failing.
    async fn generate_artifacts(&self, bundle: &mut ContractBundle) -> CoreResult<String> {
        let document = bundle.contract.document()?;
        let context = RenderContext {
            contract_id: bundle.contract.id,
            client_name: bundle.client.name.to_string(),
            template_code: bundle.template.code.to_string(),
            version_label: bundle.version.version_label.to_string(),
            jurisdiction: bundle.client.jurisdiction,
            currency: bundle.contract.currency.to_string(),
            generated_at: Utc::now(),
        };

        let html = self
            .renderer
            .render(&bundle.version.html_template, &document, &context)?;

        let html_path = self.artifacts.write_html(bundle.contract.id, &html)?;
        bundle.contract.generated_html_path = Some(path_column(&html_path)?);

        let pdf_target = self.artifacts.pdf_path(bundle.contract.id);
        match pdf::convert_with_fallback(&self.pdf_backends, &html, &pdf_target).await {
            Some(backend) => {
                tracing::debug!(
                    backend,
                    contract_id = %bundle.contract.id,
                    "pdf artifact written"
                );
                bundle.contract.pdf_path = Some(path_column(&pdf_target)?);
            }
            None => {
                bundle.contract.pdf_path = None;
            }
        }

        Ok(html)
    }

    async fn refresh_artifacts(&self, bundle: &mut ContractBundle) {
        if let Err(e) = self.generate_artifacts(bundle).await {
            tracing::warn!(
                contract_id = %bundle.contract.id,
                "artifact refresh failed: {e}"
            );
        }
    }
}

fn reject_terminal(contract: &ClientContractModel, verb: &str) -> CoreResult<()> {
    if contract.status.is_terminal() {
        return Err(CoreError::InvalidTransition(format!(
            "contract is {} and can no longer be {verb}",
            contract.status
        )));
    }
    Ok(())
}

fn currency_column(code: &str) -> CoreResult<HeaplessString<3>> {
    HeaplessString::try_from(code)
        .map_err(|_| CoreError::MalformedPayload(format!("currency '{code}' is not a 3-letter code")))
}

fn path_column(path: &Path) -> CoreResult<HeaplessString<200>> {
    let raw = path.to_string_lossy();
    HeaplessString::try_from(raw.as_ref())
        .map_err(|_| CoreError::Storage(format!("artifact path '{raw}' exceeds the column width")))
}

/// Notes column is 200 bytes; clip on a char boundary rather than reject.
fn clip_notes(notes: &str) -> HeaplessString<200> {
    let mut clipped = HeaplessString::new();
    for ch in notes.chars() {
        if clipped.push(ch).is_err() {
            break;
        }
    }
    clipped
}
