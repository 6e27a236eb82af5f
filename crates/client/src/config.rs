/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL without a trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `CASHCOMPASS_URL`          | `http://localhost:3000`  |
    /// | `CASHCOMPASS_TOKEN`        | none                     |
    /// | `CASHCOMPASS_TIMEOUT_SECS` | `10`                     |
    pub fn from_env() -> Self {
        let base_url = std::env::var("CASHCOMPASS_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let token = std::env::var("CASHCOMPASS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = std::env::var("CASHCOMPASS_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("CASHCOMPASS_TIMEOUT_SECS must be a valid u64");

        Self::new(base_url, token, timeout_secs)
    }

    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            timeout_secs,
        }
    }
}
