use std::collections::HashSet;

use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::classify::classify_url;
use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::normalize::{normalize_text, normalize_url, resolve_href, title_from_slug};
use crate::types::{CatalogEntry, EntrySource, SchemaLabel};

const LD_TYPE_MARKERS: [&str; 4] = ["product", "software", "service", "application"];

/// Parses the homepage's embedded JSON-LD blocks. Each block is decoded
/// independently so one malformed script never aborts the rest. When no
/// structured items qualify but the page itself loaded, a single synthetic
/// Company Summary entry is built from the meta description so the caller
/// always has something to show.
pub(super) async fn run(fetcher: &Fetcher, domain: &str, config: &ScanConfig) -> Vec<CatalogEntry> {
    let Some(body) = fetcher.fetch_text(domain, config.homepage_timeout).await else {
        return Vec::new();
    };
    entries_from_structured_data(&body, domain, config)
}

fn entries_from_structured_data(
    html: &str,
    domain: &str,
    config: &ScanConfig,
) -> Vec<CatalogEntry> {
    let doc = Html::parse_document(html);
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(selector) = Selector::parse("script[type=\"application/ld+json\"]") {
        for el in doc.select(&selector) {
            let raw = el.text().collect::<Vec<_>>().join(" ");
            let value = match serde_json::from_str::<Value>(&raw) {
                Ok(value) => value,
                Err(err) => {
                    debug!("skipping malformed JSON-LD block: {err}");
                    continue;
                }
            };
            for item in flatten_ld_items(value) {
                let Some(entry) = entry_from_ld_item(&item, domain, config) else {
                    continue;
                };
                if seen.insert(entry.url.clone()) {
                    out.push(entry);
                }
            }
        }
    }

    if !out.is_empty() {
        return out;
    }
    summary_entry(&doc, domain).into_iter().collect()
}

/// A block can be a single entity, an array, or a `@graph` wrapper; all
/// normalize to a flat item list.
fn flatten_ld_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("@graph") {
                items
            } else {
                vec![Value::Object(map)]
            }
        }
        _ => Vec::new(),
    }
}

fn entry_from_ld_item(item: &Value, domain: &str, config: &ScanConfig) -> Option<CatalogEntry> {
    let item_type = ld_types(item).into_iter().find(|t| is_catalog_type(t))?;

    let url = item
        .get("url")
        .and_then(Value::as_str)
        .and_then(|href| resolve_href(domain, href))
        .unwrap_or_else(|| normalize_url(domain));
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .map(normalize_text)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| title_from_slug(&url));
    let schema = schema_for_ld_type(&item_type, &url, domain, config);
    let price = ld_price(item);

    Some(CatalogEntry {
        name,
        schema,
        url,
        source: EntrySource::StructuredData,
        price,
        item_type: Some(item_type),
    })
}

fn ld_types(item: &Value) -> Vec<String> {
    match item.get("@type") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn is_catalog_type(type_name: &str) -> bool {
    let lower = type_name.to_ascii_lowercase();
    LD_TYPE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// The URL classifier wins when it has an opinion; otherwise the declared
/// type decides between solution-shaped and product-shaped.
fn schema_for_ld_type(
    type_name: &str,
    url: &str,
    domain: &str,
    config: &ScanConfig,
) -> SchemaLabel {
    let by_url = classify_url(url, domain, config);
    if by_url != SchemaLabel::Other {
        return by_url;
    }
    if type_name.to_ascii_lowercase().contains("service") {
        SchemaLabel::Solution
    } else {
        SchemaLabel::ProductSuite
    }
}

fn ld_price(item: &Value) -> Option<String> {
    let offers = item.get("offers")?;
    let offer = match offers {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match offer.get("price").or_else(|| offer.get("lowPrice"))? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn summary_entry(doc: &Html, domain: &str) -> Option<CatalogEntry> {
    let description = extract_meta_description(doc);
    let title = extract_first_text(doc, "title");
    if description.is_empty() && title.is_empty() {
        return None;
    }

    let name = if description.is_empty() {
        title
    } else {
        truncate_chars(&description, 90)
    };
    Some(CatalogEntry {
        name,
        schema: SchemaLabel::CompanySummary,
        url: normalize_url(domain),
        source: EntrySource::StructuredData,
        price: None,
        item_type: None,
    })
}

fn extract_meta_description(doc: &Html) -> String {
    let description = extract_meta_content(doc, "meta[name=\"description\"]");
    if !description.is_empty() {
        return description;
    }
    extract_meta_content(doc, "meta[property=\"og:description\"]")
}

fn extract_meta_content(doc: &Html, selector: &str) -> String {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    doc.select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(normalize_text)
        .unwrap_or_default()
}

fn extract_first_text(doc: &Html, selector: &str) -> String {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    for el in doc.select(&selector) {
        let text = normalize_text(&el.text().collect::<Vec<_>>().join(" "));
        if !text.is_empty() {
            return text;
        }
    }

    String::new()
}

/// Bounds the result to `max_chars` including the trailing ellipsis.
fn truncate_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let mut out = input
        .chars()
        .take(max_chars.saturating_sub(3))
        .collect::<String>();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "https://example.com";

    #[test]
    fn product_typed_items_are_kept_and_typed() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "SoftwareApplication",
             "name": "Pipeline CRM", "url": "https://example.com/products/pipeline-crm",
             "offers": {"price": "99.00", "priceCurrency": "USD"}}
            </script>
            <script type="application/ld+json">
            {"@type": "Organization", "name": "Example Inc"}
            </script>
        </head></html>"#;
        let entries = entries_from_structured_data(html, DOMAIN, &ScanConfig::default());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Pipeline CRM");
        assert_eq!(entries[0].schema, SchemaLabel::ProductSuite);
        assert_eq!(entries[0].item_type.as_deref(), Some("SoftwareApplication"));
        assert_eq!(entries[0].price.as_deref(), Some("99.00"));
        assert_eq!(entries[0].source, EntrySource::StructuredData);
    }

    #[test]
    fn one_malformed_block_does_not_abort_the_rest() {
        let html = r#"
            <script type="application/ld+json">{not valid json</script>
            <script type="application/ld+json">
            {"@graph": [
                {"@type": "Service", "name": "Onboarding", "url": "/services/onboarding"},
                {"@type": ["Thing", "Product"], "name": "Data Hub"}
            ]}
            </script>"#;
        let entries = entries_from_structured_data(html, DOMAIN, &ScanConfig::default());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Onboarding");
        assert_eq!(entries[0].url, "https://example.com/services/onboarding");
        assert_eq!(entries[0].schema, SchemaLabel::Solution);
        // @type arrays resolve to the first catalog-shaped entry
        assert_eq!(entries[1].item_type.as_deref(), Some("Product"));
    }

    #[test]
    fn summary_fallback_uses_the_meta_description() {
        let html = r#"<html><head>
            <title>Example Inc</title>
            <meta name="description" content="The revenue intelligence platform.">
        </head><body></body></html>"#;
        let entries = entries_from_structured_data(html, DOMAIN, &ScanConfig::default());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "The revenue intelligence platform.");
        assert_eq!(entries[0].schema, SchemaLabel::CompanySummary);
        assert_eq!(entries[0].url, "https://example.com");
    }

    #[test]
    fn long_summary_names_are_truncated_with_an_ellipsis() {
        let description = "x".repeat(120);
        let html = format!(
            r#"<html><head><meta name="description" content="{description}"></head></html>"#
        );
        let entries = entries_from_structured_data(&html, DOMAIN, &ScanConfig::default());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.chars().count(), 90);
        assert!(entries[0].name.ends_with("..."));
    }

    #[test]
    fn a_page_with_no_metadata_yields_nothing() {
        let entries =
            entries_from_structured_data("<html><body></body></html>", DOMAIN, &ScanConfig::default());
        assert!(entries.is_empty());
    }
}
