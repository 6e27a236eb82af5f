use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use cashcompass_core::finance::FinancialSnapshot;
use cashcompass_core::types::DbId;
use tokio::sync::RwLock;

use super::AlertStore;

#[derive(Debug, Default)]
struct Ledger {
    snapshot: FinancialSnapshot,
    dismissed: HashSet<String>,
}

/// In-process [`AlertStore`]. Users without a snapshot read as empty.
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    ledgers: RwLock<HashMap<DbId, Ledger>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the finance records held for a user. Dismissals are kept.
    pub async fn put_snapshot(&self, user_id: DbId, snapshot: FinancialSnapshot) {
        self.ledgers
            .write()
            .await
            .entry(user_id)
            .or_default()
            .snapshot = snapshot;
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn load_snapshot(&self, user_id: DbId) -> Result<FinancialSnapshot, sqlx::Error> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers
            .get(&user_id)
            .map(|l| l.snapshot.clone())
            .unwrap_or_default())
    }

    async fn dismissed_hashes(&self, user_id: DbId) -> Result<HashSet<String>, sqlx::Error> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers
            .get(&user_id)
            .map(|l| l.dismissed.clone())
            .unwrap_or_default())
    }

    async fn dismiss(&self, user_id: DbId, alert_hash: &str) -> Result<bool, sqlx::Error> {
        let mut ledgers = self.ledgers.write().await;
        Ok(ledgers
            .entry(user_id)
            .or_default()
            .dismissed
            .insert(alert_hash.to_string()))
    }

    async fn reset(&self, user_id: DbId) -> Result<u64, sqlx::Error> {
        let mut ledgers = self.ledgers.write().await;
        let cleared = ledgers
            .get_mut(&user_id)
            .map(|l| std::mem::take(&mut l.dismissed).len())
            .unwrap_or(0);
        Ok(cleared as u64)
    }
}
