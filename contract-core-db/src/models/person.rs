use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for Person
/// Represents a staff member who creates contracts and shows up as the actor
/// on audit entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonModel {
    pub id: Uuid,

    pub display_name: HeaplessString<100>,

    pub email: Option<HeaplessString<100>>,

    /// External identifier (e.g. staff number in the HR system)
    pub external_identifier: Option<HeaplessString<50>>,

    pub created_at: DateTime<Utc>,
}

impl PersonModel {
    pub fn new(display_name: HeaplessString<100>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name,
            email: None,
            external_identifier: None,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for PersonModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
