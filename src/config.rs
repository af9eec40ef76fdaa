use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub service_name: String,
    pub otel_exporter_endpoint: Option<String>,
    pub metrics_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(30),
            service_name: "timesaver".to_string(),
            otel_exporter_endpoint: None,
            metrics_port: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api_base_url = lookup("TIMESAVER_API_URL").unwrap_or(defaults.api_base_url);
        reqwest::Url::parse(&api_base_url)
            .map_err(|_| ConfigError::InvalidApiUrl(api_base_url.clone()))?;

        let api_token = lookup("TIMESAVER_API_TOKEN").filter(|token| !token.trim().is_empty());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_secs(&raw).ok_or(ConfigError::InvalidTimeout(raw))?,
            None => defaults.request_timeout,
        };

        let poll_interval = match lookup("NOTIFICATION_POLL_SECS") {
            Some(raw) => parse_secs(&raw).ok_or(ConfigError::InvalidPollInterval(raw))?,
            None => defaults.poll_interval,
        };

        let service_name = lookup("SERVICE_NAME").unwrap_or(defaults.service_name);

        let otel_exporter_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT");

        let metrics_port = match lookup("METRICS_PORT") {
            Some(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?),
            None => None,
        };

        Ok(Config {
            api_base_url,
            api_token,
            request_timeout,
            poll_interval,
            service_name,
            otel_exporter_endpoint,
            metrics_port,
        })
    }

    /// A token is configured, so the session starts signed in
    pub fn is_authenticated(&self) -> bool {
        self.api_token.is_some()
    }
}

fn parse_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TIMESAVER_API_URL: {0}")]
    InvalidApiUrl(String),

    #[error("Invalid REQUEST_TIMEOUT_SECS (expected positive integer): {0}")]
    InvalidTimeout(String),

    #[error("Invalid NOTIFICATION_POLL_SECS (expected positive integer): {0}")]
    InvalidPollInterval(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}
