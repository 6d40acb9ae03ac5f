pub mod client;
pub mod error;
pub mod parse;
pub mod selectors;

mod retry;

pub use client::{AggregateResult, ClientConfig, ListingClient, PageOutcome, PageResult};
pub use error::ScraperError;
pub use parse::parse_listing_page;
pub use selectors::{FieldRule, ListingSelectors};
