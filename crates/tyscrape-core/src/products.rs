//! Product listing record extracted from one card on a category page.
//!
//! Every field is optional: a card that lacks a sub-element yields `None`
//! for that field only. Values are kept exactly as displayed (prices keep
//! their currency formatting, favorite counts stay free text).

use serde::Serialize;

/// Column order used by the CSV sink. Matches the field order of
/// [`ProductRecord`].
pub const CSV_HEADER: [&str; 7] = [
    "link",
    "brand",
    "product_name",
    "price",
    "favorite_count",
    "rating_count",
    "rating_score",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// Absolute product URL (link origin + the card anchor's `href`).
    pub link: Option<String>,
    pub brand: Option<String>,
    /// Taken from the card's `title` attribute, not its inner text.
    pub product_name: Option<String>,
    /// Raw display price, e.g. `"12.999 TL"`.
    pub price: Option<String>,
    /// Raw social-proof text, e.g. `"120+ favorited"`.
    pub favorite_count: Option<String>,
    pub rating_count: Option<String>,
    pub rating_score: Option<String>,
}
