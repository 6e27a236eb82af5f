//! Client side of the CashCompass alert panel.
//!
//! [`api::AlertsApi`] talks to the server, [`controller::AlertController`]
//! owns the panel state and the unread badge, [`sidebar::Sidebar`] is the
//! navigation sidebar's responsive state machine.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod sidebar;
pub mod view;
