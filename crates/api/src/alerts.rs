//! Turns a user's stored records into the alert list the panel shows.

use std::collections::HashSet;

use cashcompass_core::alert::{sort_by_severity, Alert};
use cashcompass_core::alert_rules::derive_alerts;
use cashcompass_core::finance::FinancialMetrics;
use cashcompass_core::types::DbId;
use cashcompass_db::store::AlertStore;
use chrono::NaiveDate;

pub struct AlertService;

impl AlertService {
    /// Aggregated figures for the user as of `today`.
    pub async fn metrics(
        store: &dyn AlertStore,
        user_id: DbId,
        today: NaiveDate,
    ) -> Result<FinancialMetrics, sqlx::Error> {
        let snapshot = store.load_snapshot(user_id).await?;
        Ok(FinancialMetrics::compute(&snapshot, today))
    }

    /// Alerts the user has not dismissed, most severe first.
    pub async fn active_alerts(
        store: &dyn AlertStore,
        user_id: DbId,
        today: NaiveDate,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let (snapshot, dismissed) =
            tokio::try_join!(store.load_snapshot(user_id), store.dismissed_hashes(user_id))?;
        let metrics = FinancialMetrics::compute(&snapshot, today);

        let alerts = select_active(derive_alerts(&metrics, today), &dismissed);
        tracing::debug!(
            user_id,
            active = alerts.len(),
            dismissed = dismissed.len(),
            "Derived financial alerts"
        );
        Ok(alerts)
    }
}

/// Drop dismissed alerts and order the rest by severity.
pub fn select_active(alerts: Vec<Alert>, dismissed: &HashSet<String>) -> Vec<Alert> {
    let mut active: Vec<Alert> = alerts
        .into_iter()
        .filter(|a| !dismissed.contains(&a.alert_hash))
        .collect();
    sort_by_severity(&mut active);
    active
}

#[cfg(test)]
mod tests {
    use cashcompass_core::alert::AlertKind;
    use cashcompass_core::finance::{Debt, FinancialSnapshot};
    use cashcompass_db::store::MemoryAlertStore;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn alert(kind: AlertKind, hash: &str) -> Alert {
        Alert {
            kind,
            message: hash.to_string(),
            icon: String::new(),
            alert_hash: hash.to_string(),
        }
    }

    #[test]
    fn select_active_filters_then_sorts() {
        let alerts = vec![
            alert(AlertKind::Info, "i"),
            alert(AlertKind::Danger, "d"),
            alert(AlertKind::Warning, "w"),
            alert(AlertKind::Danger, "gone"),
        ];
        let dismissed: HashSet<String> = ["gone".to_string()].into();

        let hashes: Vec<_> = select_active(alerts, &dismissed)
            .into_iter()
            .map(|a| a.alert_hash)
            .collect();
        assert_eq!(hashes, ["d", "w", "i"]);
    }

    #[tokio::test]
    async fn dismissed_alert_is_hidden_until_reset() {
        let store = MemoryAlertStore::new();
        store
            .put_snapshot(
                1,
                FinancialSnapshot {
                    debts: vec![Debt {
                        id: 9,
                        debt_name: "Card".into(),
                        current_balance: 300.0,
                        due_date: NaiveDate::from_ymd_opt(2026, 10, 20),
                    }],
                    ..Default::default()
                },
            )
            .await;

        let before = AlertService::active_alerts(&store, 1, today()).await.unwrap();
        assert_eq!(before[0].kind, AlertKind::Danger);
        let hash = before[0].alert_hash.clone();

        store.dismiss(1, &hash).await.unwrap();
        let after = AlertService::active_alerts(&store, 1, today()).await.unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|a| a.alert_hash != hash));

        store.reset(1).await.unwrap();
        let restored = AlertService::active_alerts(&store, 1, today()).await.unwrap();
        assert_eq!(restored, before);
    }
}
