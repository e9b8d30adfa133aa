// src/scout.rs
// Product Scout: resolves a keyword to one usable ProductRecord through a
// strict-order layer chain. Layers fail locally and fall through; the
// terminal layer has no external dependency, so `find_product` never fails
// and image/link are always populated.

use std::sync::Arc;

use metrics::counter;
use tracing::debug;

use crate::error::Result;
use crate::extract;
use crate::gemini::TextGenerator;
use crate::prompts;
use crate::search::SearchProvider;
use crate::types::{ProductRecord, ShoppingItem};

#[derive(serde::Deserialize)]
struct FallbackPayload {
    description: String,
    amazon_link: String,
}

pub struct ProductScout {
    generator: Arc<dyn TextGenerator>,
    search: Arc<dyn SearchProvider>,
}

impl ProductScout {
    pub fn new(generator: Arc<dyn TextGenerator>, search: Arc<dyn SearchProvider>) -> Self {
        Self { generator, search }
    }

    /// Resolve `keyword` to a product record. First layer to produce a
    /// record wins; every failure is absorbed locally and degrades to the
    /// next layer, ending at the dependency-free terminal record.
    pub async fn find_product(&self, keyword: &str) -> ProductRecord {
        match self.priced_layer(keyword).await {
            Ok(Some(record)) => {
                counter!("scout_layer_priced_total").increment(1);
                return record;
            }
            Ok(None) => debug!(keyword, "priced layer: no usable results"),
            Err(e) => debug!(keyword, error = %e, "priced layer failed"),
        }

        match self.generic_layer(keyword).await {
            Ok(record) => {
                counter!("scout_layer_generic_total").increment(1);
                return record;
            }
            Err(e) => debug!(keyword, error = %e, "generic layer failed"),
        }

        counter!("scout_layer_terminal_total").increment(1);
        terminal_record(keyword)
    }

    /// Layer 1: shopping search, cheapest usable item, AI marketing blurb.
    /// `Ok(None)` is a clean miss (nothing priced); `Err` is any failure.
    async fn priced_layer(&self, keyword: &str) -> Result<Option<ProductRecord>> {
        let items = self.search.shopping(keyword).await?;
        let Some(winner) = cheapest_usable(items) else {
            return Ok(None);
        };

        let description = self
            .generator
            .generate(&prompts::product_description(&winner.title))
            .await?;

        Ok(Some(ProductRecord {
            name: winner.title,
            image: winner.image_url,
            link: winner.link,
            description,
            tags: Vec::new(),
        }))
    }

    /// Layer 2: generic image search plus a declared-shape AI call for
    /// description and store link.
    async fn generic_layer(&self, keyword: &str) -> Result<ProductRecord> {
        let images = self.search.images(&format!("{keyword} product photo")).await?;
        let image = images
            .into_iter()
            .map(|i| i.image_url)
            .find(|u| !u.is_empty())
            .unwrap_or_else(|| placeholder_image(keyword));

        let raw = self
            .generator
            .generate_json(&prompts::fallback_product(keyword))
            .await?;
        let payload: FallbackPayload = extract::json_payload(&raw)?;

        let link = if payload.amazon_link.trim().is_empty() {
            search_link(keyword)
        } else {
            payload.amazon_link
        };

        Ok(ProductRecord {
            name: keyword.to_string(),
            image,
            link,
            description: payload.description,
            tags: Vec::new(),
        })
    }
}

/// Layer 3: fully synthetic record; no external dependency, cannot fail.
pub(crate) fn terminal_record(keyword: &str) -> ProductRecord {
    ProductRecord {
        name: keyword.to_string(),
        image: "https://placehold.co/600x400?text=Not+Found".to_string(),
        link: search_link(keyword),
        description: format!("Explore top-rated {keyword} picks from trusted retailers."),
        tags: Vec::new(),
    }
}

pub(crate) fn placeholder_image(keyword: &str) -> String {
    format!(
        "https://placehold.co/600x400?text={}",
        urlencoding::encode(keyword)
    )
}

pub(crate) fn search_link(keyword: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(keyword)
    )
}

/// Keep items carrying price, link and image; pick the minimum by parsed
/// price. Prices that fail numeric parsing never win (they are skipped
/// outright rather than riding on NaN comparison quirks), so an
/// all-malformed set reads as a miss.
fn cheapest_usable(items: Vec<ShoppingItem>) -> Option<ShoppingItem> {
    items
        .into_iter()
        .filter(|i| !i.price.is_empty() && !i.link.is_empty() && !i.image_url.is_empty())
        .filter_map(|i| parse_price(&i.price).map(|p| (p, i)))
        .min_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, i)| i)
}

/// Parse a display price ("$1,299.99", "USD 7.50") to a number by stripping
/// everything but digits and the decimal point. `None` when nothing numeric
/// survives.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: &str) -> ShoppingItem {
        ShoppingItem {
            title: format!("item {price}"),
            link: "https://example.com/p".to_string(),
            price: price.to_string(),
            image_url: "https://example.com/p.jpg".to_string(),
        }
    }

    #[test]
    fn parse_price_strips_currency_noise() {
        assert_eq!(parse_price("$10"), Some(10.0));
        assert_eq!(parse_price("$7.50"), Some(7.5));
        assert_eq!(parse_price("USD 1,299.99"), Some(1299.99));
    }

    #[test]
    fn parse_price_rejects_non_numeric() {
        assert_eq!(parse_price("call for price"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("..."), None);
    }

    #[test]
    fn cheapest_picks_numeric_minimum() {
        let winner = cheapest_usable(vec![item("$10"), item("$7.50")]).unwrap();
        assert_eq!(winner.price, "$7.50");
    }

    #[test]
    fn malformed_price_never_wins() {
        let winner = cheapest_usable(vec![item("n/a"), item("$3.00")]).unwrap();
        assert_eq!(winner.price, "$3.00");
    }

    #[test]
    fn all_malformed_prices_read_as_miss() {
        assert!(cheapest_usable(vec![item("n/a"), item("tbd")]).is_none());
    }

    #[test]
    fn items_missing_link_or_image_are_filtered() {
        let mut no_link = item("$1");
        no_link.link.clear();
        let mut no_image = item("$2");
        no_image.image_url.clear();
        let winner = cheapest_usable(vec![no_link, no_image, item("$9")]).unwrap();
        assert_eq!(winner.price, "$9");
    }

    #[test]
    fn terminal_record_always_populates_image_and_link() {
        let r = terminal_record("mechanical keyboard");
        assert!(!r.image.is_empty());
        assert!(!r.link.is_empty());
        assert!(r.link.contains("mechanical%20keyboard"));
    }
}
