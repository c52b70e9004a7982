//! Env-driven application configuration.

use thiserror::Error;

/// Default Overpass mirrors, in attempt order.
const DEFAULT_OVERPASS_ENDPOINTS: &[&str] = &[
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.openstreetmap.ru/api/interpreter",
];

/// Matches the `[timeout:25]` the generated queries carry, so the client
/// never gives up before the server does.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 25;

const DEFAULT_USER_AGENT: &str = "cityguide/0.1 (city-guide data fetcher)";
const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Application configuration shared by the CLI and the API clients.
///
/// Every field has a default; the corresponding `CITYGUIDE_*` env vars are
/// overrides, not requirements.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Overpass mirrors in attempt order. Never empty.
    pub overpass_endpoints: Vec<String>,
    /// Per-request timeout applied to both API clients.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub weather_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            overpass_endpoints: DEFAULT_OVERPASS_ENDPOINTS
                .iter()
                .map(|url| (*url).to_string())
                .collect(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
        }
    }
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns [`ConfigError`] if a set variable holds an unparsable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns [`ConfigError`] if a set variable holds an unparsable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function. Decoupled from the process environment so tests drive it with
/// a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let log_level = or_default("CITYGUIDE_LOG_LEVEL", "info");
    let request_timeout_secs =
        parse_u64("CITYGUIDE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    let user_agent = or_default("CITYGUIDE_USER_AGENT", DEFAULT_USER_AGENT);
    let weather_base_url = or_default("CITYGUIDE_WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL);

    let overpass_endpoints = match lookup("CITYGUIDE_OVERPASS_ENDPOINTS") {
        Ok(raw) => {
            let endpoints: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect();
            if endpoints.is_empty() {
                return Err(ConfigError::InvalidEnvVar {
                    var: "CITYGUIDE_OVERPASS_ENDPOINTS".to_string(),
                    reason: "expected at least one comma-separated endpoint URL".to_string(),
                });
            }
            endpoints
        }
        Err(_) => DEFAULT_OVERPASS_ENDPOINTS
            .iter()
            .map(|url| (*url).to_string())
            .collect(),
    };

    Ok(AppConfig {
        log_level,
        overpass_endpoints,
        request_timeout_secs,
        user_agent,
        weather_base_url,
    })
}
