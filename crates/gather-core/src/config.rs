use chrono_tz::Tz;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let api_base_url = require("GATHER_API_BASE_URL")?;
    let maps_api_key = require("GOOGLE_MAPS_API_KEY")?;

    let log_level = or_default("GATHER_LOG_LEVEL", "info");
    let maps_base_url = or_default(
        "GATHER_MAPS_BASE_URL",
        "https://maps.googleapis.com/maps/api/",
    );

    let places_country = match lookup("GATHER_PLACES_COUNTRY") {
        Ok(raw) if raw.trim().is_empty() => None,
        Ok(raw) => Some(parse_country(&raw)?),
        Err(_) => None,
    };

    let geo_request_timeout_secs = parse_u64("GATHER_GEO_TIMEOUT_SECS", "10")?;
    let api_request_timeout_secs = parse_u64("GATHER_API_TIMEOUT_SECS", "15")?;
    let search_debounce_ms = parse_u64("GATHER_SEARCH_DEBOUNCE_MS", "250")?;
    let timezone = parse_timezone(&or_default("GATHER_TIMEZONE", "UTC"))?;
    let user_agent = or_default("GATHER_USER_AGENT", "gather/0.1 (listing-wizard)");

    if geo_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GATHER_GEO_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    if api_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GATHER_API_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        api_base_url,
        api_request_timeout_secs,
        maps_api_key,
        maps_base_url,
        places_country,
        geo_request_timeout_secs,
        search_debounce_ms,
        timezone,
        user_agent,
    })
}

fn parse_timezone(raw: &str) -> Result<Tz, ConfigError> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "GATHER_TIMEZONE".to_string(),
            reason: e.to_string(),
        })
}

fn parse_country(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_lowercase())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: "GATHER_PLACES_COUNTRY".to_string(),
            reason: format!("expected a two-letter country code, got '{raw}'"),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
