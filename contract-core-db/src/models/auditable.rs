use uuid::Uuid;

use super::identifiable::Identifiable;

/// Trait for entities for which an audit trail is maintained
pub trait Auditable: Identifiable {
    /// Returns the ID of the latest audit entry for this entity, if any
    fn get_audit_log_id(&self) -> Option<Uuid>;
}
