use std::collections::HashSet;

use async_trait::async_trait;
use cashcompass_core::finance::FinancialSnapshot;
use cashcompass_core::types::DbId;

use super::AlertStore;
use crate::repositories::{DismissedAlertRepo, FinanceRepo};
use crate::DbPool;

/// [`AlertStore`] over the PostgreSQL schema in `migrations/`.
#[derive(Clone)]
pub struct PgAlertStore {
    pool: DbPool,
}

impl PgAlertStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn load_snapshot(&self, user_id: DbId) -> Result<FinancialSnapshot, sqlx::Error> {
        FinanceRepo::load_snapshot(&self.pool, user_id).await
    }

    async fn dismissed_hashes(&self, user_id: DbId) -> Result<HashSet<String>, sqlx::Error> {
        DismissedAlertRepo::list_hashes(&self.pool, user_id).await
    }

    async fn dismiss(&self, user_id: DbId, alert_hash: &str) -> Result<bool, sqlx::Error> {
        let inserted = DismissedAlertRepo::dismiss(&self.pool, user_id, alert_hash).await?;
        tracing::debug!(user_id, alert_hash, inserted, "Recorded alert dismissal");
        Ok(inserted)
    }

    async fn reset(&self, user_id: DbId) -> Result<u64, sqlx::Error> {
        DismissedAlertRepo::reset(&self.pool, user_id).await
    }
}
