//! Domain logic for CashCompass financial alerts.
//!
//! Everything in this crate is pure: finance records go in, aggregated
//! metrics, a health score and alert records come out. Persistence lives in
//! `cashcompass-db`, HTTP in `cashcompass-api`.

pub mod alert;
pub mod alert_rules;
pub mod error;
pub mod finance;
pub mod health;
pub mod money;
pub mod types;
