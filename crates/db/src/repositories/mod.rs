//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod dismissed_alert_repo;
pub mod finance_repo;

pub use dismissed_alert_repo::DismissedAlertRepo;
pub use finance_repo::FinanceRepo;
