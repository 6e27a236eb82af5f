//! Financial alert records, their stable identity hashes, and the unread
//! badge rule.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{DbId, YearMonth};

/// Visual severity of an alert. Serialized as the lowercase name, which is
/// also the CSS modifier the panel uses (`alert-danger`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Danger,
    Warning,
    Info,
    Success,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Danger => "danger",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
            AlertKind::Success => "success",
        }
    }

    /// Sort rank: lower comes first in the panel.
    pub fn rank(self) -> u8 {
        match self {
            AlertKind::Danger => 1,
            AlertKind::Warning => 2,
            AlertKind::Info => 3,
            AlertKind::Success => 4,
        }
    }
}

/// Icon identifiers (Font Awesome classes) attached to alerts.
pub mod icons {
    pub const DEBT_DUE: &str = "fas fa-calendar-times";
    pub const DEBT_OVERDUE: &str = "fas fa-bell";
    pub const OVER_BUDGET: &str = "fas fa-exclamation-triangle";
    pub const BUDGET_UNTOUCHED: &str = "fas fa-check-circle";
    pub const GOAL_SMASHED: &str = "fas fa-trophy";
    pub const GOAL_ALMOST: &str = "fas fa-star";
    pub const GOAL_PROGRESS: &str = "fas fa-piggy-bank";
    pub const GOAL_STARTED: &str = "fas fa-seedling";
    pub const GOAL_NO_TARGET: &str = "fas fa-clipboard-list";
    pub const CASH_FLOW_NEGATIVE: &str = "fas fa-chart-line";
    pub const CASH_FLOW_TIGHT: &str = "fas fa-chart-bar";
    pub const CASH_FLOW_HEALTHY: &str = "fas fa-dollar-sign";
    pub const EMERGENCY_STRONG: &str = "fas fa-shield-alt";
    pub const EMERGENCY_GROWING: &str = "fas fa-hand-holding-usd";
    pub const EMERGENCY_LOW: &str = "fas fa-fire";
    pub const EMERGENCY_NO_DATA: &str = "fas fa-clipboard";
    pub const DEBT_CRITICAL: &str = "fas fa-hand-holding-dollar";
    pub const DEBT_WARNING: &str = "fas fa-chart-pie";
    pub const DEBT_FREE: &str = "fas fa-check-double";
    pub const HEALTH_SUMMARY: &str = "fas fa-heartbeat";
}

/// One alert as served by `GET /api/financial_alerts_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub icon: String,
    pub alert_hash: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: String, icon: &str, key: &AlertKey) -> Self {
        Self {
            kind,
            message,
            icon: icon.to_string(),
            alert_hash: key.hash(),
        }
    }
}

/// Stable-sort alerts so that danger comes first and success last. Rule
/// order is preserved within a kind.
pub fn sort_by_severity(alerts: &mut [Alert]) {
    alerts.sort_by_key(|a| a.kind.rank());
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsTier {
    NoTarget,
    Smashed,
    SeventyFivePercent,
    TwentyFivePercent,
    InitialProgress,
    Initial,
}

impl SavingsTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SavingsTier::NoTarget => "no_target",
            SavingsTier::Smashed => "smashed",
            SavingsTier::SeventyFivePercent => "75_percent",
            SavingsTier::TwentyFivePercent => "25_percent",
            SavingsTier::InitialProgress => "initial_progress",
            SavingsTier::Initial => "initial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlowTier {
    Negative,
    Tight,
    Healthy,
}

impl CashFlowTier {
    pub fn as_str(self) -> &'static str {
        match self {
            CashFlowTier::Negative => "negative",
            CashFlowTier::Tight => "tight",
            CashFlowTier::Healthy => "healthy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtTier {
    Critical,
    Warning,
    DebtFree,
    LowOrNone,
}

impl DebtTier {
    pub fn as_str(self) -> &'static str {
        match self {
            DebtTier::Critical => "critical",
            DebtTier::Warning => "warning",
            DebtTier::DebtFree => "debt_free",
            DebtTier::LowOrNone => "low_or_none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyFundTier {
    Strong,
    Growing,
    Low,
    NoExpenseData,
}

impl EmergencyFundTier {
    pub fn as_str(self) -> &'static str {
        match self {
            EmergencyFundTier::Strong => "strong",
            EmergencyFundTier::Growing => "growing",
            EmergencyFundTier::Low => "low",
            EmergencyFundTier::NoExpenseData => "no_expense_data",
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The condition an alert describes. Its textual form is hashed into
/// `alert_hash`, so a dismissal sticks for as long as the condition is the
/// same and lapses once it changes (new month, new due date, new tier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKey {
    Debt { debt_id: DbId, due_date: NaiveDate },
    Budget { category: String, month: YearMonth },
    Savings { goal_id: DbId, tier: SavingsTier },
    CashFlow { tier: CashFlowTier, month: YearMonth },
    DebtStatus { tier: DebtTier },
    EmergencyFund { tier: EmergencyFundTier },
    HealthSummary,
}

impl AlertKey {
    /// Hex SHA-256 of the key text.
    pub fn hash(&self) -> String {
        let digest = Sha256::digest(self.to_string().as_bytes());
        format!("{digest:x}")
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKey::Debt { debt_id, due_date } => {
                write!(f, "debt_alert_{debt_id}_{}", due_date.format("%Y-%m-%d"))
            }
            AlertKey::Budget { category, month } => write!(f, "budget_alert_{category}_{month}"),
            AlertKey::Savings { goal_id, tier } => {
                write!(f, "savings_alert_{goal_id}_{}", tier.as_str())
            }
            AlertKey::CashFlow { tier, month } => {
                write!(f, "cash_flow_alert_{}_{month}", tier.as_str())
            }
            AlertKey::DebtStatus { tier } => write!(f, "debt_status_alert_{}", tier.as_str()),
            AlertKey::EmergencyFund { tier } => {
                write!(f, "emergency_fund_alert_{}", tier.as_str())
            }
            AlertKey::HealthSummary => f.write_str("financial_health_summary_alert_general_info"),
        }
    }
}

// ---------------------------------------------------------------------------
// Badge
// ---------------------------------------------------------------------------

/// A fetched alert plus the session-only read flag the panel toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedAlert {
    pub alert: Alert,
    pub is_read_local: bool,
}

impl From<Alert> for TrackedAlert {
    fn from(alert: Alert) -> Self {
        Self {
            alert,
            is_read_local: false,
        }
    }
}

/// Badge count: alerts not yet marked read in this session.
pub fn unread_count(alerts: &[TrackedAlert]) -> usize {
    alerts.iter().filter(|a| !a.is_read_local).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(kind: AlertKind, msg: &str) -> Alert {
        Alert {
            kind,
            message: msg.to_string(),
            icon: icons::HEALTH_SUMMARY.to_string(),
            alert_hash: msg.to_string(),
        }
    }

    #[test]
    fn serializes_kind_as_type_field() {
        let a = alert(AlertKind::Warning, "w");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["alert_hash"], "w");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn deserializes_wire_record() {
        let json = serde_json::json!({
            "type": "danger",
            "message": "m",
            "icon": "fas fa-bell",
            "alert_hash": "abc",
        });
        let a: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(a.kind, AlertKind::Danger);
        assert_eq!(a.icon, "fas fa-bell");
    }

    #[test]
    fn severity_sort_is_stable() {
        let mut alerts = vec![
            alert(AlertKind::Success, "s1"),
            alert(AlertKind::Warning, "w1"),
            alert(AlertKind::Danger, "d1"),
            alert(AlertKind::Info, "i1"),
            alert(AlertKind::Danger, "d2"),
            alert(AlertKind::Warning, "w2"),
        ];
        sort_by_severity(&mut alerts);
        let order: Vec<_> = alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(order, ["d1", "d2", "w1", "w2", "i1", "s1"]);
    }

    #[test]
    fn key_text_matches_condition() {
        let month = YearMonth { year: 2026, month: 10 };
        let due = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(
            AlertKey::Debt { debt_id: 7, due_date: due }.to_string(),
            "debt_alert_7_2026-10-20"
        );
        assert_eq!(
            AlertKey::Budget { category: "Food".into(), month }.to_string(),
            "budget_alert_Food_2026-10"
        );
        assert_eq!(
            AlertKey::CashFlow { tier: CashFlowTier::Tight, month }.to_string(),
            "cash_flow_alert_tight_2026-10"
        );
        assert_eq!(
            AlertKey::Savings { goal_id: 3, tier: SavingsTier::SeventyFivePercent }.to_string(),
            "savings_alert_3_75_percent"
        );
    }

    #[test]
    fn hash_is_stable_hex_and_distinguishes_keys() {
        let a = AlertKey::DebtStatus { tier: DebtTier::Critical };
        let b = AlertKey::DebtStatus { tier: DebtTier::Warning };
        assert_eq!(a.hash(), a.hash());
        assert_eq!(a.hash().len(), 64);
        assert!(a.hash().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn unread_count_skips_read_alerts() {
        let mut tracked: Vec<TrackedAlert> = vec![
            alert(AlertKind::Danger, "a").into(),
            alert(AlertKind::Info, "b").into(),
            alert(AlertKind::Success, "c").into(),
        ];
        assert_eq!(unread_count(&tracked), 3);
        tracked[1].is_read_local = true;
        assert_eq!(unread_count(&tracked), 2);
        assert_eq!(unread_count(&[]), 0);
    }
}
