//! Fixed markup selectors for product cards on the category listing page.
//!
//! Each of the seven record fields has its own [`FieldRule`]. Every rule has
//! the same contract: locate the value inside one card and return `None`
//! when it is not there. A miss never affects other fields or other cards.

use scraper::{ElementRef, Selector};
use tyscrape_core::ProductRecord;

use crate::error::ScraperError;

/// Container element for one product card.
pub const CARD_SELECTOR: &str = "div.p-card-wrppr.with-campaign-view";
pub const ANCHOR_SELECTOR: &str = "a";
pub const BRAND_SELECTOR: &str = "span.prdct-desc-cntnr-ttl";
pub const PRICE_SELECTOR: &str = "div.prc-box-dscntd";
pub const FAVORITE_SELECTOR: &str = "p.social-proof-text";
pub const RATING_COUNT_SELECTOR: &str = "span.ratingCount";
pub const RATING_SCORE_SELECTOR: &str = "span.rating-score";
/// The product name lives in the card's own `title` attribute.
pub const PRODUCT_NAME_ATTR: &str = "title";

/// Extraction rule for one field of a product card.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Whitespace-trimmed text of the first descendant matching the selector.
    ///
    /// Trimming is the only normalization applied: currency symbols,
    /// thousands separators and free text such as `"50+ favorited"` are kept
    /// as displayed. An element that is present but empty yields `Some("")`.
    Text(Selector),
    /// Attribute of the card element itself. Empty values count as missing.
    CardAttr(&'static str),
    /// `href` of the first descendant matching the selector, made absolute
    /// against the link origin.
    AnchorHref(Selector),
}

impl FieldRule {
    /// Applies the rule to one card, returning `None` on a miss.
    #[must_use]
    pub fn extract(&self, card: ElementRef<'_>, link_origin: &str) -> Option<String> {
        match self {
            FieldRule::Text(selector) => card
                .select(selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_owned()),
            FieldRule::CardAttr(name) => card
                .value()
                .attr(name)
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
            FieldRule::AnchorHref(selector) => card
                .select(selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(|href| absolutize(link_origin, href)),
        }
    }
}

/// Joins a card `href` onto the link origin.
///
/// Hrefs that are already absolute are returned unchanged.
fn absolutize(link_origin: &str, href: &str) -> String {
    if href.starts_with("https://") || href.starts_with("http://") {
        return href.to_owned();
    }
    let origin = link_origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

/// The compiled card selector plus one rule per record field.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    card: Selector,
    link: FieldRule,
    brand: FieldRule,
    product_name: FieldRule,
    price: FieldRule,
    favorite_count: FieldRule,
    rating_count: FieldRule,
    rating_score: FieldRule,
}

impl ListingSelectors {
    /// Compiles the listing page selectors.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] if a selector fails to parse.
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            card: compile(CARD_SELECTOR)?,
            link: FieldRule::AnchorHref(compile(ANCHOR_SELECTOR)?),
            brand: FieldRule::Text(compile(BRAND_SELECTOR)?),
            product_name: FieldRule::CardAttr(PRODUCT_NAME_ATTR),
            price: FieldRule::Text(compile(PRICE_SELECTOR)?),
            favorite_count: FieldRule::Text(compile(FAVORITE_SELECTOR)?),
            rating_count: FieldRule::Text(compile(RATING_COUNT_SELECTOR)?),
            rating_score: FieldRule::Text(compile(RATING_SCORE_SELECTOR)?),
        })
    }

    #[must_use]
    pub fn card(&self) -> &Selector {
        &self.card
    }

    /// Builds the record for one card in a single pass over its fields.
    #[must_use]
    pub fn extract_record(&self, card: ElementRef<'_>, link_origin: &str) -> ProductRecord {
        ProductRecord {
            link: self.link.extract(card, link_origin),
            brand: self.brand.extract(card, link_origin),
            product_name: self.product_name.extract(card, link_origin),
            price: self.price.extract(card, link_origin),
            favorite_count: self.favorite_count.extract(card, link_origin),
            rating_count: self.rating_count.extract(card, link_origin),
            rating_score: self.rating_score.extract(card, link_origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const ORIGIN: &str = "https://www.trendyol.com";

    fn parse_cards(html: &str) -> (Html, Selector) {
        (Html::parse_fragment(html), compile(CARD_SELECTOR).unwrap())
    }

    #[test]
    fn all_selectors_compile() {
        assert!(ListingSelectors::new().is_ok());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = compile("div[").unwrap_err();
        assert!(matches!(err, ScraperError::Selector { ref selector, .. } if selector == "div["));
    }

    #[test]
    fn text_rule_trims_whitespace() {
        let (doc, card_sel) = parse_cards(
            r#"<div class="p-card-wrppr with-campaign-view">
                 <span class="prdct-desc-cntnr-ttl">
                   Acme
                 </span>
               </div>"#,
        );
        let card = doc.select(&card_sel).next().unwrap();
        let rule = FieldRule::Text(compile(BRAND_SELECTOR).unwrap());
        assert_eq!(rule.extract(card, ORIGIN).as_deref(), Some("Acme"));
    }

    #[test]
    fn text_rule_misses_return_none() {
        let (doc, card_sel) = parse_cards(r#"<div class="p-card-wrppr with-campaign-view"></div>"#);
        let card = doc.select(&card_sel).next().unwrap();
        let rule = FieldRule::Text(compile(PRICE_SELECTOR).unwrap());
        assert_eq!(rule.extract(card, ORIGIN), None);
    }

    #[test]
    fn card_attr_reads_title_and_treats_empty_as_missing() {
        let (doc, card_sel) = parse_cards(
            r#"<div class="p-card-wrppr with-campaign-view" title="Phone X"></div>
               <div class="p-card-wrppr with-campaign-view" title=""></div>"#,
        );
        let rule = FieldRule::CardAttr(PRODUCT_NAME_ATTR);
        let values: Vec<Option<String>> = doc
            .select(&card_sel)
            .map(|card| rule.extract(card, ORIGIN))
            .collect();
        assert_eq!(values, vec![Some("Phone X".to_owned()), None]);
    }

    #[test]
    fn anchor_href_is_prefixed_with_origin() {
        let (doc, card_sel) = parse_cards(
            r#"<div class="p-card-wrppr with-campaign-view"><a href="/p/123">x</a></div>"#,
        );
        let card = doc.select(&card_sel).next().unwrap();
        let rule = FieldRule::AnchorHref(compile(ANCHOR_SELECTOR).unwrap());
        assert_eq!(
            rule.extract(card, ORIGIN).as_deref(),
            Some("https://www.trendyol.com/p/123")
        );
    }

    #[test]
    fn anchor_without_href_is_missing() {
        let (doc, card_sel) =
            parse_cards(r#"<div class="p-card-wrppr with-campaign-view"><a>x</a></div>"#);
        let card = doc.select(&card_sel).next().unwrap();
        let rule = FieldRule::AnchorHref(compile(ANCHOR_SELECTOR).unwrap());
        assert_eq!(rule.extract(card, ORIGIN), None);
    }

    #[test]
    fn absolutize_handles_each_href_shape() {
        assert_eq!(
            absolutize(ORIGIN, "/p/1"),
            "https://www.trendyol.com/p/1"
        );
        assert_eq!(absolutize(ORIGIN, "p/1"), "https://www.trendyol.com/p/1");
        assert_eq!(
            absolutize("https://www.trendyol.com/", "/p/1"),
            "https://www.trendyol.com/p/1"
        );
        assert_eq!(
            absolutize(ORIGIN, "https://cdn.example.com/p/1"),
            "https://cdn.example.com/p/1"
        );
    }
}
