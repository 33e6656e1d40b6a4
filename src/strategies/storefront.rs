use log::{debug, info};
use serde::Deserialize;

use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::normalize::{normalize_url, title_from_slug};
use crate::types::{CatalogEntry, EntrySource, SchemaLabel};

#[derive(Debug, Deserialize)]
struct ProductFeed {
    #[serde(default)]
    products: Vec<FeedProduct>,
}

#[derive(Debug, Deserialize)]
struct FeedProduct {
    #[serde(default)]
    title: String,
    #[serde(default)]
    handle: String,
    #[serde(default)]
    variants: Vec<FeedVariant>,
}

#[derive(Debug, Deserialize)]
struct FeedVariant {
    price: Option<serde_json::Value>,
}

/// Requests the storefront's public product listing directly. The feed is a
/// trusted structured source, so no candidate filter or classifier runs;
/// every product becomes a Retail Product entry.
pub(super) async fn run(fetcher: &Fetcher, domain: &str, config: &ScanConfig) -> Vec<CatalogEntry> {
    let feed_url = format!(
        "{domain}/products.json?limit={}",
        config.storefront_page_size
    );
    let Some(body) = fetcher.fetch_text(&feed_url, config.storefront_timeout).await else {
        return Vec::new();
    };

    let entries = feed_entries(&body, domain);
    if !entries.is_empty() {
        info!("storefront feed at {feed_url} listed {} products", entries.len());
    }
    entries
}

fn feed_entries(body: &str, domain: &str) -> Vec<CatalogEntry> {
    let feed = match serde_json::from_str::<ProductFeed>(body) {
        Ok(feed) => feed,
        Err(err) => {
            debug!("response is not a product feed: {err}");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for product in feed.products {
        if product.handle.trim().is_empty() {
            continue;
        }
        let url = normalize_url(&format!("{domain}/products/{}", product.handle.trim()));
        let price = product.variants.first().and_then(price_text);
        let name = if product.title.trim().is_empty() {
            title_from_slug(&url)
        } else {
            product.title
        };
        out.push(CatalogEntry {
            name,
            schema: SchemaLabel::RetailProduct,
            url,
            source: EntrySource::ShopifyFeed,
            price,
            item_type: None,
        });
    }
    out
}

// Shopify serializes prices as strings, but some storefronts emit numbers.
fn price_text(variant: &FeedVariant) -> Option<String> {
    match variant.price.as_ref()? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
