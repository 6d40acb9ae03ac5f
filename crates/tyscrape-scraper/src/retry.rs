//! Per-page retry with exponential back-off and jitter.
//!
//! Only transport-level failures are retried. A page that answers with a
//! non-200 status is not retried: the caller downgrades it to an empty
//! page immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors worth retrying after a back-off delay.
///
/// **Retriable:** [`ScraperError::Http`] raised while sending the request or
/// reading the body (timeout, DNS failure, connection refused or reset).
///
/// **Not retriable:**
/// - [`ScraperError::UnexpectedStatus`] — the server answered; retrying
///   would change the observable outcome for that page.
/// - [`ScraperError::Http`] from request building, redirect policy, or body
///   decoding.
/// - [`ScraperError::InvalidListingUrl`] / [`ScraperError::Selector`] —
///   configuration problems.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(e) => {
            (e.is_timeout() || e.is_connect() || e.is_request() || e.is_body())
                && !e.is_redirect()
                && !e.is_builder()
                && !e.is_decode()
        }
        ScraperError::UnexpectedStatus { .. }
        | ScraperError::InvalidListingUrl { .. }
        | ScraperError::Selector { .. } => false,
    }
}

/// Back-off before retry number `attempt` (1-based), before jitter.
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    backoff_base_ms
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10))
        .min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Retry | Sleep before it                 |
/// |-------|---------------------------------|
/// | 1     | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2     | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3     | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(backoff_base_ms, attempt);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient fetch error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
