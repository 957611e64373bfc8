use chrono::{DateTime, Utc};
use contract_core_api::domain::term::Jurisdiction;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for Client
/// The counterparty contracts are issued to. The jurisdiction pins which
/// template families apply and which term rules are enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientModel {
    pub id: Uuid,

    pub name: HeaplessString<200>,

    pub jurisdiction: Jurisdiction,

    pub contact_email: Option<HeaplessString<100>>,

    pub address: Option<HeaplessString<200>>,

    pub created_at: DateTime<Utc>,
}

impl ClientModel {
    pub fn new(name: HeaplessString<200>, jurisdiction: Jurisdiction) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            jurisdiction,
            contact_email: None,
            address: None,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for ClientModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
