use crate::app_config::AppConfig;
use crate::ConfigError;

/// Endpoint used when `SAUDE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/locations";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_url = or_default("SAUDE_API_URL", DEFAULT_API_URL)
        .trim()
        .to_string();
    if api_url.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SAUDE_API_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let log_level = or_default("SAUDE_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SAUDE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SAUDE_USER_AGENT", "saude/0.1 (facility-directory)");

    Ok(AppConfig {
        api_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}
