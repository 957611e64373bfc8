use chrono::{DateTime, NaiveDate, Utc};
use contract_core_api::domain::document::Document;
use contract_core_api::domain::signature::SignStatus;
use contract_core_api::error::{CoreError, CoreResult};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::models::identifiable::Identifiable;

/// Database model for a contract issued to a client
///
/// `data_json` is the source of truth for everything the wizard captured.
/// `contract_value`, `start_date` and `end_date` mirror well-known document
/// paths into queryable columns and are rewritten on every document change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientContractModel {
    pub id: Uuid,

    /// References ClientModel.id
    pub client_id: Uuid,

    /// References TemplateVersionModel.id; re-pointed by template upgrades
    pub template_version_id: Uuid,

    pub status: SignStatus,

    /// ISO 4217, defaulted from the client's jurisdiction
    pub currency: HeaplessString<3>,

    pub contract_value: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// The nested contract document as stored (JSONB)
    pub data_json: serde_json::Value,

    pub generated_html_path: Option<HeaplessString<200>>,
    pub pdf_path: Option<HeaplessString<200>>,

    /// Reference to the latest audit entry for this contract
    /// - None: for contracts created before auditing (backfill targets)
    /// - Some(uuid): updated on every recorded operation
    pub audit_log_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientContractModel {
    /// Decode the stored document. A row that cannot be decoded is corrupt
    /// storage, not caller error.
    pub fn document(&self) -> CoreResult<Document> {
        Document::try_from(&self.data_json)
            .map_err(|e| CoreError::Storage(format!("contract {} holds invalid data_json: {e}", self.id)))
    }

    /// Replace the stored document and bump `updated_at`.
    pub fn set_document(&mut self, document: &Document) {
        self.data_json = serde_json::Value::from(document);
        self.updated_at = Utc::now();
    }
}

impl Identifiable for ClientContractModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for ClientContractModel {
    fn get_audit_log_id(&self) -> Option<Uuid> {
        self.audit_log_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_core_api::domain::document::DocValue;

    fn contract_with(data_json: serde_json::Value) -> ClientContractModel {
        ClientContractModel {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            template_version_id: Uuid::new_v4(),
            status: SignStatus::Draft,
            currency: HeaplessString::try_from("EUR").unwrap(),
            contract_value: None,
            start_date: None,
            end_date: None,
            data_json,
            generated_html_path: None,
            pdf_path: None,
            audit_log_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn document_round_trips_through_data_json() {
        let mut contract = contract_with(serde_json::json!({}));
        let mut doc = Document::new();
        doc.set("fees.base_ex_vat", DocValue::Float(1000.0)).unwrap();
        contract.set_document(&doc);
        assert_eq!(contract.document().unwrap(), doc);
    }

    #[test]
    fn scalar_data_json_is_reported_as_corrupt() {
        let contract = contract_with(serde_json::json!("not a document"));
        assert!(matches!(
            contract.document(),
            Err(CoreError::Storage(_))
        ));
    }
}
