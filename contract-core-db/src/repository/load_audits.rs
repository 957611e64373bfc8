use async_trait::async_trait;
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::models::contract::contract_audit::ContractAuditModel;
use crate::repository::pagination::{Page, PageRequest};

/// Generic repository trait for loading audit entries for an entity with pagination
///
/// Any entity that implements the Auditable trait can have its audit trail
/// loaded through this trait. Entries come back newest first.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Auditable trait
///
/// # Example
/// ```ignore
/// use contract_core_db::repository::pagination::PageRequest;
///
/// let page = repo.load_audits(contract_id, PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadAudits<T: Auditable>: Send + Sync {
    /// Load paginated audit entries for an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the entity whose audit entries should be loaded
    /// * `page` - The pagination parameters (limit and offset)
    ///
    /// # Returns
    /// * `Ok(Page<ContractAuditModel>)` - A page of audit entries, newest first
    /// * `Err` - An error if the audit entries could not be loaded
    async fn load_audits(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ContractAuditModel>, Box<dyn std::error::Error + Send + Sync>>;
}
