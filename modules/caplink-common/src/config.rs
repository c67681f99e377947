use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Internal store
    pub api_base_url: String,
    pub secret_token: String,

    // Instagram
    pub instagram_session_id: Option<String>,

    // Resolution
    pub max_retries: u32,
    pub scan_timeout_secs: u64,

    // Polling
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            api_base_url: required_env("API_BASE_URL"),
            secret_token: required_env("SECRET_TOKEN"),
            instagram_session_id: env::var("INSTAGRAM_SESSION_ID").ok(),
            max_retries: env::var("MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("MAX_RETRIES must be a number"),
            scan_timeout_secs: env::var("SCAN_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("SCAN_TIMEOUT_SECS must be a number"),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("POLL_INTERVAL_SECS must be a number"),
        }
    }

    /// Log the loaded configuration without exposing secrets.
    pub fn log_redacted(&self) {
        tracing::info!(
            api_base_url = self.api_base_url.as_str(),
            has_secret_token = !self.secret_token.is_empty(),
            has_instagram_session = self.instagram_session_id.is_some(),
            max_retries = self.max_retries,
            scan_timeout_secs = self.scan_timeout_secs,
            poll_interval_secs = self.poll_interval_secs,
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
