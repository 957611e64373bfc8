use async_trait::async_trait;
use contract_core_db::models::client::ClientModel;
use contract_core_db::repository::create_batch::CreateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ClientRepositoryImpl;

impl ClientRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ClientRepositoryImpl,
        items: Vec<ClientModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ClientModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        for item in &items {
            sqlx::query(
                "INSERT INTO clients (id, name, jurisdiction, contact_email, address, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.jurisdiction.as_str())
            .bind(item.contact_email.as_ref().map(|e| e.as_str()))
            .bind(item.address.as_ref().map(|a| a.as_str()))
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<ClientModel> for ClientRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ClientModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ClientModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}
