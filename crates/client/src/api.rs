//! HTTP client for the alert endpoints.

use std::future::Future;
use std::time::Duration;

use cashcompass_core::alert::Alert;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::AlertsApiError;

/// The three calls the panel makes. [`AlertsApi`] is the HTTP
/// implementation; tests substitute their own.
pub trait AlertsBackend: Send + Sync {
    /// `GET /api/financial_alerts_data`
    fn fetch_alerts(&self) -> impl Future<Output = Result<Vec<Alert>, AlertsApiError>> + Send;

    /// `POST /api/delete_alert`. Returns the server's message.
    fn delete_alert(
        &self,
        alert_hash: &str,
    ) -> impl Future<Output = Result<String, AlertsApiError>> + Send;

    /// `POST /api/reset_alerts`. Returns the server's message.
    fn reset_alerts(&self) -> impl Future<Output = Result<String, AlertsApiError>> + Send;
}

/// `{ success, message }` body of the dismiss and reset endpoints.
#[derive(Debug, Deserialize)]
struct ActionOutcome {
    success: bool,
    #[serde(default)]
    message: String,
}

pub struct AlertsApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AlertsApi {
    /// Build a client with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, AlertsApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.token.clone(),
        ))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Pass 2xx responses through; turn anything else into
    /// [`AlertsApiError::ApiError`] with the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AlertsApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AlertsApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_action(response: reqwest::Response) -> Result<String, AlertsApiError> {
        let outcome: ActionOutcome = Self::ensure_success(response).await?.json().await?;
        if outcome.success {
            Ok(outcome.message)
        } else {
            Err(AlertsApiError::Rejected(outcome.message))
        }
    }
}

impl AlertsBackend for AlertsApi {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>, AlertsApiError> {
        let response = self
            .request(reqwest::Method::GET, "/api/financial_alerts_data")
            .send()
            .await?;
        let alerts = Self::ensure_success(response)
            .await?
            .json::<Vec<Alert>>()
            .await?;
        Ok(alerts)
    }

    async fn delete_alert(&self, alert_hash: &str) -> Result<String, AlertsApiError> {
        let response = self
            .request(reqwest::Method::POST, "/api/delete_alert")
            .json(&serde_json::json!({ "alert_hash": alert_hash }))
            .send()
            .await?;
        Self::parse_action(response).await
    }

    async fn reset_alerts(&self) -> Result<String, AlertsApiError> {
        let response = self
            .request(reqwest::Method::POST, "/api/reset_alerts")
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::parse_action(response).await
    }
}
