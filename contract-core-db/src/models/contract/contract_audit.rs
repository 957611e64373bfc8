use chrono::{DateTime, Utc};
use contract_core_api::domain::audit::AuditAction;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

/// Database model for one entry in a contract's audit trail
///
/// Entries form a hash chain per contract: `hash` is the entry hashed with
/// its own `hash` field set to 0, and `antecedent_hash` carries the previous
/// entry's hash (0 for the first entry). Rewriting any historical entry
/// breaks every hash downstream of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAuditModel {
    pub id: Uuid,

    /// References ClientContractModel.id
    pub contract_id: Uuid,

    pub action: AuditAction,

    /// References PersonModel.id; None for provider-driven transitions
    pub actor_person_id: Option<Uuid>,

    pub happened_at: DateTime<Utc>,

    /// Document snapshot before the operation, where one existed
    pub before_data: Option<serde_json::Value>,

    /// Document snapshot after the operation
    pub after_data: Option<serde_json::Value>,

    /// Top-level document keys the operation touched, sorted
    pub changed_keys: Vec<String>,

    pub notes: Option<HeaplessString<200>>,

    /// Reference to the previous audit entry (None for the first entry)
    pub antecedent_id: Option<Uuid>,

    /// Hash from the previous audit entry for chain verification (0 for the
    /// first entry)
    pub antecedent_hash: i64,

    /// Hash of this entry with the hash field set to 0
    pub hash: i64,
}

impl ContractAuditModel {
    /// Build an entry linked onto `antecedent` and seal it with its hash.
    #[allow(clippy::too_many_arguments)]
    pub fn chained(
        contract_id: Uuid,
        action: AuditAction,
        actor_person_id: Option<Uuid>,
        before_data: Option<serde_json::Value>,
        after_data: Option<serde_json::Value>,
        changed_keys: Vec<String>,
        notes: Option<HeaplessString<200>>,
        antecedent: Option<&ContractAuditModel>,
    ) -> Result<Self, String> {
        let mut entry = Self {
            id: Uuid::new_v4(),
            contract_id,
            action,
            actor_person_id,
            happened_at: Utc::now(),
            before_data,
            after_data,
            changed_keys,
            notes,
            antecedent_id: antecedent.map(|a| a.id),
            antecedent_hash: antecedent.map(|a| a.hash).unwrap_or(0),
            hash: 0,
        };
        entry.hash = entry.compute_hash()?;
        Ok(entry)
    }

    /// Hash of this entry as it would be sealed: the stored fields with
    /// `hash` zeroed.
    pub fn compute_hash(&self) -> Result<i64, String> {
        let mut probe = self.clone();
        probe.hash = 0;
        hash_as_i64(&probe)
    }

    /// Whether the stored hash matches the entry's content.
    pub fn verify(&self) -> bool {
        self.compute_hash().map(|h| h == self.hash).unwrap_or(false)
    }
}

impl Identifiable for ContractAuditModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Verify a contract's audit trail, oldest first: every entry's hash must
/// match its content and every link must carry the previous entry's id and
/// hash. An empty trail verifies.
pub fn verify_audit_chain(entries: &[ContractAuditModel]) -> bool {
    let mut previous: Option<&ContractAuditModel> = None;
    for entry in entries {
        if !entry.verify() {
            return false;
        }
        match previous {
            None => {
                if entry.antecedent_id.is_some() || entry.antecedent_hash != 0 {
                    return false;
                }
            }
            Some(prev) => {
                if entry.antecedent_id != Some(prev.id) || entry.antecedent_hash != prev.hash {
                    return false;
                }
            }
        }
        previous = Some(entry);
    }
    true
}
