use uuid::Uuid;

/// Who is performing an operation. Webhook-driven transitions carry no
/// actor; everything else should.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpContext {
    pub actor_person_id: Option<Uuid>,
}

impl OpContext {
    pub fn actor(person_id: Uuid) -> Self {
        Self {
            actor_person_id: Some(person_id),
        }
    }

    pub fn system() -> Self {
        Self::default()
    }
}
