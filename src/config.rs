use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/analyze";

const ENDPOINT_VAR: &str = "RETINASCOPE_ENDPOINT";
const DEMO_FALLBACK_VAR: &str = "RETINASCOPE_DEMO_FALLBACK";
const TIMEOUT_VAR: &str = "RETINASCOPE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    /// Substitute the demo result when an analysis attempt fails.
    pub demo_fallback: bool,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            demo_fallback: true,
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            let endpoint = endpoint.trim();
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: ENDPOINT_VAR,
                    value: endpoint.to_string(),
                });
            }
            config.endpoint = endpoint.to_string();
        }

        if let Some(value) = lookup(DEMO_FALLBACK_VAR) {
            config.demo_fallback = parse_flag(&value).ok_or(ConfigError::InvalidValue {
                key: DEMO_FALLBACK_VAR,
                value,
            })?;
        }

        if let Some(value) = lookup(TIMEOUT_VAR) {
            let seconds = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: TIMEOUT_VAR,
                    value,
                })?;
            config.request_timeout = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
