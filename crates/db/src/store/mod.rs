//! The storage seam behind the alert endpoints.
//!
//! [`AlertStore`] is what the API layer holds (as `Arc<dyn AlertStore>`).
//! [`PgAlertStore`] is the production implementation; [`MemoryAlertStore`]
//! keeps everything in process and backs the integration tests and local
//! runs without a database.

mod memory;
mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;
use cashcompass_core::finance::FinancialSnapshot;
use cashcompass_core::types::DbId;

pub use memory::MemoryAlertStore;
pub use postgres::PgAlertStore;

/// Per-user finance data and alert dismissals.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Every finance record stored for the user.
    async fn load_snapshot(&self, user_id: DbId) -> Result<FinancialSnapshot, sqlx::Error>;

    /// Hashes of the alerts the user has dismissed.
    async fn dismissed_hashes(&self, user_id: DbId) -> Result<HashSet<String>, sqlx::Error>;

    /// Dismiss one alert. Idempotent; returns `true` when newly dismissed.
    async fn dismiss(&self, user_id: DbId, alert_hash: &str) -> Result<bool, sqlx::Error>;

    /// Clear all of the user's dismissals, returning how many were cleared.
    async fn reset(&self, user_id: DbId) -> Result<u64, sqlx::Error>;
}
