use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub data_api_url: String,
    pub data_api_anon_key: String,
    pub data_api_service_key: Option<String>,
    pub admin_password_hash: Option<String>,
    pub admin_token_secret: Option<String>,
    pub request_timeout: Duration,
    pub counts_refresh_interval: Duration,
    pub cors_allow_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr_raw = read_string("COMMONS_HTTP_ADDR", "127.0.0.1:8080");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let data_api_url = read_required("COMMONS_DATA_API_URL")?;
        let data_api_anon_key = read_required("COMMONS_DATA_API_ANON_KEY")?;
        let data_api_service_key = read_optional_string("COMMONS_DATA_API_SERVICE_KEY");
        let admin_password_hash = read_optional_string("COMMONS_ADMIN_PASSWORD_HASH");
        let admin_token_secret = read_optional_string("COMMONS_ADMIN_TOKEN_SECRET");
        let request_timeout_secs = read_u64("COMMONS_REQUEST_TIMEOUT_SECS", 15)?;
        let counts_refresh_interval_secs = read_u64("COMMONS_COUNTS_REFRESH_INTERVAL_SECS", 300)?;
        let cors_allow_origins = read_list("COMMONS_CORS_ALLOW_ORIGINS");

        Ok(Self {
            http_addr,
            data_api_url,
            data_api_anon_key,
            data_api_service_key,
            admin_password_hash,
            admin_token_secret,
            request_timeout: Duration::from_secs(request_timeout_secs),
            counts_refresh_interval: Duration::from_secs(counts_refresh_interval_secs),
            cors_allow_origins,
        })
    }

    /// Both the password hash and the token secret must be present for the
    /// admin surface to come up.
    pub fn admin_configured(&self) -> bool {
        self.admin_password_hash
            .as_deref()
            .is_some_and(|value| !value.is_empty())
            && self
                .admin_token_secret
                .as_deref()
                .is_some_and(|value| !value.is_empty())
    }
}

fn read_string(key: &'static str, default: &'static str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn read_required(key: &'static str) -> Result<String, ConfigError> {
    match read_optional_string(key) {
        Some(value) => Ok(value),
        None => Err(ConfigError::MissingValue(key)),
    }
}

fn read_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_optional_string(key: &'static str) -> Option<String> {
    let value = std::env::var(key).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_list(key: &'static str) -> Vec<String> {
    let raw = std::env::var(key).unwrap_or_default();
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
