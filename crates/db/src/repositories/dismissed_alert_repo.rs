//! Repository for the `read_user_alerts` table.

use std::collections::HashSet;

use cashcompass_core::types::DbId;
use sqlx::PgPool;

/// Tracks which alert hashes each user has dismissed.
pub struct DismissedAlertRepo;

impl DismissedAlertRepo {
    /// All hashes the user has dismissed.
    pub async fn list_hashes(pool: &PgPool, user_id: DbId) -> Result<HashSet<String>, sqlx::Error> {
        let hashes: Vec<String> =
            sqlx::query_scalar("SELECT alert_hash FROM read_user_alerts WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(pool)
                .await?;
        Ok(hashes.into_iter().collect())
    }

    /// Record a dismissal.
    ///
    /// Returns `true` if the hash was newly dismissed, `false` if it was
    /// already dismissed for this user.
    pub async fn dismiss(pool: &PgPool, user_id: DbId, alert_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO read_user_alerts (user_id, alert_hash) VALUES ($1, $2) \
             ON CONFLICT (user_id, alert_hash) DO NOTHING",
        )
        .bind(user_id)
        .bind(alert_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Forget every dismissal for a user, returning how many were cleared.
    pub async fn reset(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM read_user_alerts WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
