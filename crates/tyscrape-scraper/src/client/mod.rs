//! HTTP client for the paginated category listing.

mod aggregate;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tyscrape_core::{AppConfig, ProductRecord};

use crate::error::ScraperError;
use crate::parse::parse_listing_page;
use crate::retry::retry_with_backoff;
use crate::selectors::ListingSelectors;

pub use aggregate::AggregateResult;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`ListingClient`], usually derived from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub listing_url: String,
    pub page_param: String,
    pub link_origin: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first one, transport failures only.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl ClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            listing_url: config.listing_url.clone(),
            page_param: config.page_param.clone(),
            link_origin: config.link_origin.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

/// How a single page fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// HTTP 200; the markup was parsed (possibly into zero cards).
    Fetched,
    /// The server answered with a status other than 200.
    Status(u16),
    /// Transport failure that persisted through every retry.
    Transport,
}

/// Records extracted from one page, in card order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub page: u32,
    pub outcome: PageOutcome,
    pub records: Vec<ProductRecord>,
}

impl PageResult {
    fn failed(page: u32, outcome: PageOutcome) -> Self {
        Self {
            page,
            outcome,
            records: Vec::new(),
        }
    }
}

/// Fetches listing pages and extracts product cards from them.
///
/// Requests carry an explicit timeout. Transport failures (timeout, DNS,
/// connection reset) are retried with exponential backoff up to
/// `max_retries` additional attempts; a page that still fails is skipped.
/// A non-200 response is never retried.
pub struct ListingClient {
    client: Client,
    listing_url: Url,
    page_param: String,
    link_origin: String,
    selectors: ListingSelectors,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ListingClient {
    /// Creates a `ListingClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidListingUrl`] if `listing_url` does not parse.
    /// - [`ScraperError::Selector`] if a card selector fails to compile.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ScraperError> {
        let listing_url =
            Url::parse(&config.listing_url).map_err(|e| ScraperError::InvalidListingUrl {
                url: config.listing_url.clone(),
                reason: e.to_string(),
            })?;
        if listing_url.cannot_be_a_base() {
            return Err(ScraperError::InvalidListingUrl {
                url: config.listing_url.clone(),
                reason: "URL cannot carry query parameters".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            listing_url,
            page_param: config.page_param.clone(),
            link_origin: config.link_origin.clone(),
            selectors: ListingSelectors::new()?,
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Builds the request URL for `page`.
    ///
    /// Any existing value of the page parameter on the listing URL is
    /// replaced; other query parameters are kept.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.listing_url.clone();
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key.as_ref() != self.page_param)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(&retained)
            .append_pair(&self.page_param, &page.to_string());
        url.to_string()
    }

    /// Fetches the markup for `page`, retrying transport failures.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any status other than 200 (not retried).
    /// - [`ScraperError::Http`] — transport failure after all retries exhausted.
    pub async fn fetch_page_html(&self, page: u32) -> Result<String, ScraperError> {
        let url = self.page_url(page);

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if status != StatusCode::OK {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }
                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches and parses one listing page.
    ///
    /// Never fails: a non-200 status or a persistent transport failure
    /// yields an empty result, and the outcome is logged.
    pub async fn extract_page(&self, page: u32) -> PageResult {
        match self.fetch_page_html(page).await {
            Ok(html) => {
                let records = parse_listing_page(&html, &self.selectors, &self.link_origin);
                tracing::info!(page, cards = records.len(), "page fetched");
                PageResult {
                    page,
                    outcome: PageOutcome::Fetched,
                    records,
                }
            }
            Err(ScraperError::UnexpectedStatus { status, url }) => {
                tracing::warn!(page, status, url = %url, "page fetch returned non-success status");
                PageResult::failed(page, PageOutcome::Status(status))
            }
            Err(e) => {
                tracing::error!(page, error = %e, "page fetch failed after retries; skipping page");
                PageResult::failed(page, PageOutcome::Transport)
            }
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
