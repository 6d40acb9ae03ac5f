//! Sequential multi-page extraction for `ListingClient`.

use tyscrape_core::{PageRange, ProductRecord};

use super::{ListingClient, PageOutcome, PageResult};

/// Concatenation of every page's records, in page order then card order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub records: Vec<ProductRecord>,
    pub pages_requested: usize,
    /// Pages that contributed nothing because the fetch failed.
    pub failed_pages: Vec<(u32, PageOutcome)>,
}

impl AggregateResult {
    fn push(&mut self, page: PageResult) {
        self.pages_requested += 1;
        if page.outcome != PageOutcome::Fetched {
            self.failed_pages.push((page.page, page.outcome));
        }
        self.records.extend(page.records);
    }
}

impl ListingClient {
    /// Extracts every page in `pages`, in the order given, and concatenates
    /// the results.
    ///
    /// Pages are fetched strictly one at a time; each fetch completes before
    /// the next starts, so the output order is exactly page order followed by
    /// in-page card order. Failed pages contribute no rows and do not stop
    /// the run.
    pub async fn extract_all<I>(&self, pages: I) -> AggregateResult
    where
        I: IntoIterator<Item = u32>,
    {
        let mut aggregate = AggregateResult::default();
        for page in pages {
            aggregate.push(self.extract_page(page).await);
        }

        if !aggregate.failed_pages.is_empty() {
            tracing::warn!(
                failed_pages = aggregate.failed_pages.len(),
                pages_requested = aggregate.pages_requested,
                "some pages contributed no rows"
            );
        }

        aggregate
    }

    /// [`Self::extract_all`] over a validated page range.
    pub async fn extract_range(&self, range: PageRange) -> AggregateResult {
        tracing::info!(
            first_page = range.first(),
            end_page = range.end(),
            pages = range.len(),
            "extracting listing pages"
        );
        self.extract_all(range).await
    }
}
