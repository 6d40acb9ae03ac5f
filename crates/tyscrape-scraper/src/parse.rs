//! Product card extraction from a listing page's markup.

use scraper::Html;
use tyscrape_core::ProductRecord;

use crate::selectors::ListingSelectors;

/// Parses one listing page into product records, one per detected card,
/// in document order.
///
/// Each card is visited once and all seven fields are read from it, so the
/// record count always equals the card count. Missing sub-elements become
/// `None` on that card only; a miss is not logged.
#[must_use]
pub fn parse_listing_page(
    html: &str,
    selectors: &ListingSelectors,
    link_origin: &str,
) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    document
        .select(selectors.card())
        .map(|card| selectors.extract_record(card, link_origin))
        .collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
