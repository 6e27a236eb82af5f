pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /financial_alerts_data     active alerts (GET)
/// /delete_alert              dismiss one alert (POST)
/// /reset_alerts              clear all dismissals (POST)
/// /financial_health          health score and totals (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/financial_alerts_data",
            get(handlers::alerts::list_alerts),
        )
        .route("/delete_alert", post(handlers::alerts::delete_alert))
        .route("/reset_alerts", post(handlers::alerts::reset_alerts))
        .route(
            "/financial_health",
            get(handlers::alerts::financial_health),
        )
}
