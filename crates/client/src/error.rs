/// Errors from the alert HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum AlertsApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Alert API error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx answer carrying `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Failures surfaced by [`crate::controller::AlertController`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to load alerts: {0}")]
    Fetch(#[source] AlertsApiError),

    #[error("Failed to dismiss alert: {0}")]
    Dismiss(#[source] AlertsApiError),

    #[error("Failed to reset alerts: {0}")]
    Reset(#[source] AlertsApiError),
}
