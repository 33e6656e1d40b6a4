use std::collections::HashSet;

use scraper::{Html, Selector};

use crate::classify::{classify_url, is_candidate};
use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::normalize::{is_same_site, normalize_text, resolve_href, title_from_slug};
use crate::types::{CatalogEntry, EntrySource};

/// Scans every anchor on the homepage. High fidelity for navigation
/// structure, since many sites keep their primary nav out of the sitemap.
pub(super) async fn run(fetcher: &Fetcher, domain: &str, config: &ScanConfig) -> Vec<CatalogEntry> {
    let Some(body) = fetcher.fetch_text(domain, config.homepage_timeout).await else {
        return Vec::new();
    };
    entries_from_homepage(&body, domain, config)
}

fn entries_from_homepage(html: &str, domain: &str, config: &ScanConfig) -> Vec<CatalogEntry> {
    let doc = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for el in doc.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_href(domain, href) else {
            continue;
        };
        if !is_same_site(&url, domain) {
            continue;
        }
        if !is_candidate(&url, domain, config) {
            continue;
        }
        if !seen.insert(url.clone()) {
            continue;
        }

        let text = normalize_text(&el.text().collect::<Vec<_>>().join(" "));
        let name = if text.is_empty() || text.chars().count() > config.max_name_len {
            title_from_slug(&url)
        } else {
            text
        };
        out.push(CatalogEntry {
            name,
            schema: classify_url(&url, domain, config),
            url,
            source: EntrySource::HomepageScan,
            price: None,
            item_type: None,
        });
        if out.len() >= config.nav_cap {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SchemaLabel;

    const DOMAIN: &str = "https://example.com";

    #[test]
    fn anchors_are_resolved_filtered_and_classified() {
        let html = r#"<html><body>
            <a href="/solutions/data-sync/">Data Sync</a>
            <a href="/careers/open-roles">Careers</a>
            <a href="https://example.com/platform/api?utm_source=nav">API Platform</a>
            <a href="https://other.com/solutions/foreign">Foreign</a>
            <a href="mailto:sales@example.com">Email us</a>
            <a href="/solutions/data-sync#pricing">Data Sync pricing</a>
        </body></html>"#;
        let entries = entries_from_homepage(html, DOMAIN, &ScanConfig::default());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Data Sync");
        assert_eq!(entries[0].url, "https://example.com/solutions/data-sync");
        assert_eq!(entries[0].schema, SchemaLabel::Solution);
        assert_eq!(entries[0].source, EntrySource::HomepageScan);
        assert_eq!(entries[1].url, "https://example.com/platform/api");
        assert_eq!(entries[1].schema, SchemaLabel::PlatformFeature);
    }

    #[test]
    fn long_or_empty_anchor_text_falls_back_to_the_slug() {
        let html = format!(
            r#"<a href="/products/lead-scoring"><img src="x.png"></a>
               <a href="/products/pipeline-insights">{}</a>"#,
            "very ".repeat(20)
        );
        let entries = entries_from_homepage(&html, DOMAIN, &ScanConfig::default());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Lead Scoring");
        assert_eq!(entries[1].name, "Pipeline Insights");
    }

    #[test]
    fn result_count_is_capped() {
        let mut config = ScanConfig::default();
        config.nav_cap = 3;
        let html = (0..10)
            .map(|i| format!(r#"<a href="/solutions/tool-{i}">Tool {i}</a>"#))
            .collect::<String>();
        let entries = entries_from_homepage(&html, DOMAIN, &config);
        assert_eq!(entries.len(), 3);
    }
}
