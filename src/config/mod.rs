//! Configuration module for the DSS admin client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::errors::AppError;

const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content API; endpoint paths are joined onto it
    pub api_url: String,
    /// Per-request timeout applied to every API call
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("DSS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let request_timeout = match env::var("DSS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::Config(format!("Invalid DSS_REQUEST_TIMEOUT_SECS: {}", raw))
                })?;
                if secs == 0 {
                    return Err(AppError::Config(
                        "DSS_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_level = env::var("DSS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("DSS_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(other) => {
                return Err(AppError::Config(format!("Invalid DSS_LOG_FORMAT: {}", other)));
            }
        };

        Ok(Self {
            api_url,
            request_timeout,
            log_level,
            log_format,
        })
    }
}
