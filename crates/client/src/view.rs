//! Render-ready snapshots of the alert panel and the bell badge.

use std::fmt;

use cashcompass_core::alert::TrackedAlert;

pub const LOADING_MESSAGE: &str = "Loading your financial insights...";
pub const EMPTY_MESSAGE: &str = "You have no alerts for now.";

/// Why the panel shows an error box instead of alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError {
    LoadFailed,
    ResetFailed,
}

impl PanelError {
    pub fn message(self) -> &'static str {
        match self {
            PanelError::LoadFailed => "Failed to load alerts. Please try again later.",
            PanelError::ResetFailed => "Failed to reset alerts. Please try again.",
        }
    }
}

/// What the alert panel body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertPanelView {
    Loading,
    /// A successful fetch with nothing to show.
    Empty,
    Alerts(Vec<TrackedAlert>),
    Error(PanelError),
}

impl fmt::Display for AlertPanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertPanelView::Loading => f.write_str(LOADING_MESSAGE),
            AlertPanelView::Empty => f.write_str(EMPTY_MESSAGE),
            AlertPanelView::Error(e) => f.write_str(e.message()),
            AlertPanelView::Alerts(alerts) => {
                for (i, tracked) in alerts.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let alert = &tracked.alert;
                    let marker = if tracked.is_read_local { ' ' } else { '*' };
                    write!(
                        f,
                        "{marker} [{:<7}] {}  ({})",
                        alert.kind.as_str(),
                        alert.message,
                        alert.alert_hash
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Unread indicator on the bell icon. Hidden when the count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub count: usize,
    pub visible: bool,
}

impl Badge {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}
