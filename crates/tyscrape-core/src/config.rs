use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, PageRange};

pub(crate) const DEFAULT_LISTING_URL: &str = "https://www.trendyol.com/cep-telefonu-x-c103498";
pub(crate) const DEFAULT_LINK_ORIGIN: &str = "https://www.trendyol.com";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(var, "must not be empty".to_string()));
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("TYSCRAPE_ENV", "development"))?;
    let log_level = or_default("TYSCRAPE_LOG_LEVEL", "info");

    let listing_url = non_empty("TYSCRAPE_LISTING_URL", DEFAULT_LISTING_URL)?;
    let page_param = non_empty("TYSCRAPE_PAGE_PARAM", "pi")?;
    let link_origin = non_empty("TYSCRAPE_LINK_ORIGIN", DEFAULT_LINK_ORIGIN)?
        .trim_end_matches('/')
        .to_string();

    let first_page = parse_u32("TYSCRAPE_FIRST_PAGE", "1")?;
    let end_page = parse_u32("TYSCRAPE_END_PAGE", "168")?;
    PageRange::new(first_page, end_page)?;

    let output_path = PathBuf::from(non_empty(
        "TYSCRAPE_OUTPUT_PATH",
        "./trendyol_mobile_phones.csv",
    )?);

    let request_timeout_secs = parse_u64("TYSCRAPE_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "TYSCRAPE_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("TYSCRAPE_USER_AGENT", "tyscrape/0.1 (listing-extractor)");
    let max_retries = parse_u32("TYSCRAPE_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("TYSCRAPE_RETRY_BACKOFF_BASE_MS", "1000")?;

    let schedule = non_empty("TYSCRAPE_SCHEDULE", "0 0 3 * * *")?;
    let job_retries = parse_u32("TYSCRAPE_JOB_RETRIES", "1")?;
    let job_retry_delay_secs = parse_u64("TYSCRAPE_JOB_RETRY_DELAY_SECS", "300")?;

    Ok(AppConfig {
        env,
        log_level,
        listing_url,
        page_param,
        link_origin,
        first_page,
        end_page,
        output_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        schedule,
        job_retries,
        job_retry_delay_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TYSCRAPE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
