//! Alert panel state and the operations that change it.
//!
//! Fetches and resets take increasing generation numbers. A fetch response
//! is applied only while no newer fetch has started, so an older response
//! that arrives late cannot overwrite newer state. Dismissals confirmed
//! while the latest fetch is in flight are filtered out of its result.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use cashcompass_core::alert::{unread_count, TrackedAlert};

use crate::api::AlertsBackend;
use crate::error::ClientError;
use crate::view::{AlertPanelView, Badge, PanelError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Loading,
    Ready,
    Failed(PanelError),
}

#[derive(Debug, Default)]
struct PanelState {
    alerts: Vec<TrackedAlert>,
    phase: Phase,
    /// Latest generation handed out to a fetch or reset.
    generation: u64,
    /// Generation of the most recently started fetch.
    latest_fetch: u64,
    /// Hashes the server confirmed dismissed since `latest_fetch` started.
    dismissed_since_fetch: HashSet<String>,
}

impl PanelState {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Owns the alert list for one panel. Shared by reference; the inner mutex
/// is never held across an `.await`.
pub struct AlertController<B> {
    backend: B,
    state: Mutex<PanelState>,
}

impl<B: AlertsBackend> AlertController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(PanelState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        // State is plain data; a panic elsewhere leaves it usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch the active alerts and replace the local list. On failure the
    /// list is cleared and the panel shows the load error. No retry.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let generation = {
            let mut state = self.lock();
            let generation = state.next_generation();
            state.latest_fetch = generation;
            state.dismissed_since_fetch.clear();
            state.phase = Phase::Loading;
            generation
        };

        let result = self.backend.fetch_alerts().await;

        let mut state = self.lock();
        if state.latest_fetch != generation {
            tracing::debug!(
                generation,
                latest = state.latest_fetch,
                "Dropping stale alert fetch"
            );
            return result.map(|_| ()).map_err(ClientError::Fetch);
        }

        match result {
            Ok(alerts) => {
                let PanelState {
                    alerts: local,
                    dismissed_since_fetch,
                    ..
                } = &mut *state;
                *local = alerts
                    .into_iter()
                    .filter(|a| !dismissed_since_fetch.contains(&a.alert_hash))
                    .map(TrackedAlert::from)
                    .collect();
                tracing::debug!(generation, count = local.len(), "Alerts loaded");
                state.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Error fetching alerts");
                state.alerts.clear();
                state.phase = Phase::Failed(PanelError::LoadFailed);
                Err(ClientError::Fetch(e))
            }
        }
    }

    /// Permanently dismiss one alert. The local list changes only when the
    /// server confirms; failures leave it as it was.
    pub async fn dismiss(&self, alert_hash: &str) -> Result<(), ClientError> {
        match self.backend.delete_alert(alert_hash).await {
            Ok(message) => {
                let mut state = self.lock();
                state.alerts.retain(|a| a.alert.alert_hash != alert_hash);
                state.dismissed_since_fetch.insert(alert_hash.to_owned());
                tracing::info!(%alert_hash, %message, "Alert dismissed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%alert_hash, error = %e, "Error dismissing alert");
                Err(ClientError::Dismiss(e))
            }
        }
    }

    /// Clear every dismissal on the server, then fetch again. On failure the
    /// list is kept and the panel shows the reset error, unless a fetch
    /// started since the reset has already taken over the panel.
    pub async fn reset_all(&self) -> Result<(), ClientError> {
        let generation = self.lock().next_generation();

        match self.backend.reset_alerts().await {
            Ok(message) => {
                tracing::info!(generation, %message, "Alerts reset");
                self.refresh().await
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Error resetting alerts");
                let mut state = self.lock();
                if state.latest_fetch < generation {
                    state.phase = Phase::Failed(PanelError::ResetFailed);
                }
                Err(ClientError::Reset(e))
            }
        }
    }

    /// Mark an alert read for this session only. Returns `false` when no
    /// alert has that hash.
    pub fn mark_read_local(&self, alert_hash: &str) -> bool {
        let mut state = self.lock();
        match state
            .alerts
            .iter_mut()
            .find(|a| a.alert.alert_hash == alert_hash)
        {
            Some(tracked) => {
                tracked.is_read_local = true;
                true
            }
            None => false,
        }
    }

    pub fn badge(&self) -> Badge {
        Badge::new(unread_count(&self.lock().alerts))
    }

    pub fn view(&self) -> AlertPanelView {
        let state = self.lock();
        match state.phase {
            Phase::Loading => AlertPanelView::Loading,
            Phase::Failed(e) => AlertPanelView::Error(e),
            Phase::Ready if state.alerts.is_empty() => AlertPanelView::Empty,
            Phase::Ready => AlertPanelView::Alerts(state.alerts.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use assert_matches::assert_matches;
    use cashcompass_core::alert::{Alert, AlertKind};

    use super::*;
    use crate::error::AlertsApiError;

    fn alert(kind: AlertKind, hash: &str) -> Alert {
        Alert {
            kind,
            message: format!("alert {hash}"),
            icon: "fas fa-bell".into(),
            alert_hash: hash.into(),
        }
    }

    fn server_error() -> AlertsApiError {
        AlertsApiError::ApiError {
            status: 500,
            body: "boom".into(),
        }
    }

    /// Answers each call from a queue of canned results.
    #[derive(Default)]
    struct ScriptedBackend {
        fetches: Mutex<VecDeque<Result<Vec<Alert>, AlertsApiError>>>,
        deletes: Mutex<VecDeque<Result<String, AlertsApiError>>>,
        resets: Mutex<VecDeque<Result<String, AlertsApiError>>>,
    }

    impl ScriptedBackend {
        fn on_fetch(self, result: Result<Vec<Alert>, AlertsApiError>) -> Self {
            self.fetches.lock().unwrap().push_back(result);
            self
        }

        fn on_delete(self, result: Result<String, AlertsApiError>) -> Self {
            self.deletes.lock().unwrap().push_back(result);
            self
        }

        fn on_reset(self, result: Result<String, AlertsApiError>) -> Self {
            self.resets.lock().unwrap().push_back(result);
            self
        }
    }

    impl AlertsBackend for ScriptedBackend {
        async fn fetch_alerts(&self) -> Result<Vec<Alert>, AlertsApiError> {
            self.fetches.lock().unwrap().pop_front().expect("unexpected fetch")
        }

        async fn delete_alert(&self, _alert_hash: &str) -> Result<String, AlertsApiError> {
            self.deletes.lock().unwrap().pop_front().expect("unexpected delete")
        }

        async fn reset_alerts(&self) -> Result<String, AlertsApiError> {
            self.resets.lock().unwrap().pop_front().expect("unexpected reset")
        }
    }

    fn three_alerts() -> Vec<Alert> {
        vec![
            alert(AlertKind::Danger, "a"),
            alert(AlertKind::Warning, "b"),
            alert(AlertKind::Info, "c"),
        ]
    }

    #[tokio::test]
    async fn starts_loading_with_hidden_badge() {
        let controller = AlertController::new(ScriptedBackend::default());
        assert_eq!(controller.view(), AlertPanelView::Loading);
        assert!(!controller.badge().visible);
    }

    #[tokio::test]
    async fn refresh_populates_list_and_badge() {
        let controller =
            AlertController::new(ScriptedBackend::default().on_fetch(Ok(three_alerts())));
        controller.refresh().await.unwrap();

        assert_matches!(controller.view(), AlertPanelView::Alerts(list) if list.len() == 3);
        assert_eq!(controller.badge(), Badge::new(3));
    }

    #[tokio::test]
    async fn empty_fetch_is_empty_state_not_a_message() {
        let controller = AlertController::new(ScriptedBackend::default().on_fetch(Ok(vec![])));
        controller.refresh().await.unwrap();

        assert_eq!(controller.view(), AlertPanelView::Empty);
        assert_eq!(controller.badge(), Badge::new(0));
    }

    #[tokio::test]
    async fn failed_refresh_clears_list() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(three_alerts()))
            .on_fetch(Err(server_error()));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();

        let err = controller.refresh().await.unwrap_err();
        assert_matches!(err, ClientError::Fetch(AlertsApiError::ApiError { status: 500, .. }));
        assert_eq!(controller.view(), AlertPanelView::Error(PanelError::LoadFailed));
        assert!(!controller.badge().visible);
    }

    #[tokio::test]
    async fn dismiss_removes_alert_and_decrements_badge() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(three_alerts()))
            .on_delete(Ok("Alert dismissed permanently.".into()));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();

        controller.dismiss("b").await.unwrap();

        assert_eq!(controller.badge().count, 2);
        let AlertPanelView::Alerts(list) = controller.view() else {
            panic!("expected alerts");
        };
        assert!(list.iter().all(|a| a.alert.alert_hash != "b"));
    }

    #[tokio::test]
    async fn rejected_dismiss_keeps_list_and_reports_error() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(three_alerts()))
            .on_delete(Err(AlertsApiError::Rejected("nope".into())));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();

        let err = controller.dismiss("a").await.unwrap_err();
        assert_matches!(err, ClientError::Dismiss(AlertsApiError::Rejected(_)));
        assert_eq!(controller.badge().count, 3);
    }

    #[tokio::test]
    async fn dismissing_last_alert_shows_empty_state() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(vec![alert(AlertKind::Info, "only")]))
            .on_delete(Ok("ok".into()));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();
        controller.dismiss("only").await.unwrap();

        assert_eq!(controller.view(), AlertPanelView::Empty);
    }

    #[tokio::test]
    async fn mark_read_only_changes_badge() {
        let controller =
            AlertController::new(ScriptedBackend::default().on_fetch(Ok(three_alerts())));
        controller.refresh().await.unwrap();

        assert!(controller.mark_read_local("a"));
        assert!(controller.mark_read_local("a"));
        assert!(!controller.mark_read_local("missing"));

        assert_eq!(controller.badge().count, 2);
        assert_matches!(controller.view(), AlertPanelView::Alerts(list) if list.len() == 3);
    }

    #[tokio::test]
    async fn read_flags_do_not_survive_refetch() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(three_alerts()))
            .on_fetch(Ok(three_alerts()));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();
        controller.mark_read_local("a");
        controller.mark_read_local("b");
        assert_eq!(controller.badge().count, 1);

        controller.refresh().await.unwrap();
        assert_eq!(controller.badge().count, 3);
    }

    #[tokio::test]
    async fn reset_refetches_on_success() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(vec![alert(AlertKind::Info, "c")]))
            .on_reset(Ok("All alerts have been reset.".into()))
            .on_fetch(Ok(three_alerts()));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();

        controller.reset_all().await.unwrap();
        assert_eq!(controller.badge().count, 3);
    }

    #[tokio::test]
    async fn failed_reset_keeps_list_and_shows_reset_error() {
        let backend = ScriptedBackend::default()
            .on_fetch(Ok(three_alerts()))
            .on_reset(Err(server_error()));
        let controller = AlertController::new(backend);
        controller.refresh().await.unwrap();

        assert_matches!(controller.reset_all().await, Err(ClientError::Reset(_)));
        assert_eq!(controller.view(), AlertPanelView::Error(PanelError::ResetFailed));
        assert_eq!(controller.badge().count, 3);
    }
}
