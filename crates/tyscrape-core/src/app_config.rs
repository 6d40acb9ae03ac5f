use std::path::PathBuf;

use crate::{ConfigError, PageRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Category listing URL without the page parameter.
    pub listing_url: String,
    /// Query parameter that carries the page number (`pi` on the reference site).
    pub page_param: String,
    /// Origin prefixed to the relative `href` found on each product card.
    pub link_origin: String,
    pub first_page: u32,
    /// Exclusive upper bound of the page range.
    pub end_page: u32,
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Six-field cron expression used by `tyscrape schedule`.
    pub schedule: String,
    pub job_retries: u32,
    pub job_retry_delay_secs: u64,
}

impl AppConfig {
    /// The configured `[first_page, end_page)` range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageRange`] if the bounds are invalid.
    pub fn page_range(&self) -> Result<PageRange, ConfigError> {
        PageRange::new(self.first_page, self.end_page)
    }
}
