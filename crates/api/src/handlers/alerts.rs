//! Handlers for the financial alert panel.
//!
//! All endpoints require authentication via [`AuthUser`]. Dismiss and reset
//! answer with an [`ActionResponse`] body on failure as well as success, so
//! the panel can show the message as-is.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cashcompass_core::alert::Alert;
use cashcompass_core::finance::SavingsGoal;
use serde::{Deserialize, Serialize};

use crate::alerts::AlertService;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{ActionResponse, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DeleteAlertRequest {
    #[serde(default)]
    pub alert_hash: Option<String>,
}

/// Body of `GET /api/financial_health`.
#[derive(Debug, Serialize)]
pub struct FinancialHealthResponse {
    pub score: u32,
    pub details: Vec<String>,
    pub cash_flow: f64,
    pub net_worth: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub emergency_fund_coverage_months: f64,
    pub savings_goals: Vec<SavingsGoal>,
    pub over_budget_categories: Vec<String>,
}

type ActionResult = (StatusCode, Json<ActionResponse>);

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// GET /api/financial_alerts_data
///
/// Active (undismissed) alerts, most severe first. An empty list means the
/// user has nothing to look at.
pub async fn list_alerts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Alert>>> {
    let alerts = AlertService::active_alerts(state.store.as_ref(), auth.user_id, today()).await?;
    Ok(Json(alerts))
}

/// POST /api/delete_alert
///
/// Permanently dismiss one alert. Dismissing the same hash twice succeeds.
pub async fn delete_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<DeleteAlertRequest>, JsonRejection>,
) -> ActionResult {
    let alert_hash = payload
        .ok()
        .and_then(|Json(body)| body.alert_hash)
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty());

    let Some(alert_hash) = alert_hash else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ActionResponse::failed("Alert hash is required.")),
        );
    };

    match state.store.dismiss(auth.user_id, &alert_hash).await {
        Ok(newly_dismissed) => {
            tracing::info!(user_id = auth.user_id, %alert_hash, newly_dismissed, "Alert dismissed");
            (
                StatusCode::OK,
                Json(ActionResponse::ok("Alert dismissed permanently.")),
            )
        }
        Err(e) => {
            tracing::error!(user_id = auth.user_id, error = %e, "Error dismissing alert");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActionResponse::failed("Failed to dismiss alert.")),
            )
        }
    }
}

/// POST /api/reset_alerts
///
/// Clear every dismissal so all current alerts show again.
pub async fn reset_alerts(auth: AuthUser, State(state): State<AppState>) -> ActionResult {
    match state.store.reset(auth.user_id).await {
        Ok(cleared) => {
            tracing::info!(user_id = auth.user_id, cleared, "Alerts reset");
            (
                StatusCode::OK,
                Json(ActionResponse::ok("All alerts have been reset.")),
            )
        }
        Err(e) => {
            tracing::error!(user_id = auth.user_id, error = %e, "Error resetting alerts");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActionResponse::failed("Failed to reset alerts.")),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Health score
// ---------------------------------------------------------------------------

/// GET /api/financial_health
pub async fn financial_health(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<FinancialHealthResponse>>> {
    let m = AlertService::metrics(state.store.as_ref(), auth.user_id, today()).await?;
    let over_budget_categories = m
        .over_budget_categories()
        .into_iter()
        .map(String::from)
        .collect();

    Ok(Json(DataResponse {
        data: FinancialHealthResponse {
            score: m.health.score,
            details: m.health.details,
            cash_flow: m.cash_flow,
            net_worth: m.total_assets - m.total_liabilities,
            total_income: m.total_income,
            total_expenses: m.total_expenses,
            total_assets: m.total_assets,
            total_liabilities: m.total_liabilities,
            emergency_fund_coverage_months: m.emergency_fund_coverage_months,
            savings_goals: m.savings_goals,
            over_budget_categories,
        },
    }))
}
