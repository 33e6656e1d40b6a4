use std::collections::{HashSet, VecDeque};

use log::{debug, info};

use crate::classify::{classify_url, is_candidate};
use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::normalize::{is_same_site, normalize_url, title_from_slug};
use crate::types::{CatalogEntry, EntrySource};

/// Probes the conventional sitemap locations in order and walks the first
/// one that yields anything. Index documents fan out into child sitemaps;
/// only children whose URL hints at relevance are followed, and descent is
/// bounded by an explicit depth counter rather than the call stack.
pub(super) async fn run(fetcher: &Fetcher, domain: &str, config: &ScanConfig) -> Vec<CatalogEntry> {
    for probe in &config.sitemap_paths {
        let root_url = format!("{domain}{probe}");
        let entries = scan_sitemap_tree(fetcher, &root_url, domain, config).await;
        if !entries.is_empty() {
            info!("sitemap root {root_url} yielded {} entries", entries.len());
            return entries;
        }
    }
    Vec::new()
}

async fn scan_sitemap_tree(
    fetcher: &Fetcher,
    root_url: &str,
    domain: &str,
    config: &ScanConfig,
) -> Vec<CatalogEntry> {
    let mut out = Vec::new();
    let mut seen_urls = HashSet::new();
    let mut seen_docs = HashSet::new();
    let mut queue = VecDeque::from([(root_url.to_string(), 0usize)]);

    while let Some((doc_url, depth)) = queue.pop_front() {
        if !seen_docs.insert(doc_url.clone()) {
            continue;
        }
        let Some(xml) = fetcher.fetch_text(&doc_url, config.sitemap_timeout).await else {
            continue;
        };
        let doc = parse_sitemap(&xml);

        for child in doc.children {
            if depth + 1 > config.max_sitemap_depth {
                debug!("depth bound reached, skipping child sitemap {child}");
                continue;
            }
            if is_relevant_branch(&child, &config.sitemap_branch_keywords) {
                queue.push_back((child, depth + 1));
            }
        }

        for loc in doc.pages {
            let url = normalize_url(&loc);
            if url.is_empty() || !is_same_site(&url, domain) {
                continue;
            }
            if !is_candidate(&url, domain, config) {
                continue;
            }
            if !seen_urls.insert(url.clone()) {
                continue;
            }
            out.push(CatalogEntry {
                name: title_from_slug(&url),
                schema: classify_url(&url, domain, config),
                url,
                source: EntrySource::SitemapScan,
                price: None,
                item_type: None,
            });
            if out.len() >= config.sitemap_cap {
                return out;
            }
        }
    }

    out
}

struct SitemapDoc {
    /// `<sitemap><loc>` values from an index document.
    children: Vec<String>,
    /// `<url><loc>` values from a leaf document.
    pages: Vec<String>,
}

fn parse_sitemap(xml: &str) -> SitemapDoc {
    SitemapDoc {
        children: extract_block_locs(xml, "<sitemap>", "</sitemap>"),
        pages: extract_block_locs(xml, "<url>", "</url>"),
    }
}

fn extract_block_locs(xml: &str, open_tag: &str, close_tag: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0usize;
    while let Some(open_idx) = xml[start..].find(open_tag) {
        let open = start + open_idx + open_tag.len();
        let Some(close_rel) = xml[open..].find(close_tag) else {
            break;
        };
        let close = open + close_rel;
        if let Some(loc) = extract_loc(&xml[open..close]) {
            out.push(loc);
        }
        start = close + close_tag.len();
    }
    out
}

fn extract_loc(block: &str) -> Option<String> {
    let open = block.find("<loc>")? + 5;
    let close_rel = block[open..].find("</loc>")?;
    let value = block[open..open + close_rel].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn is_relevant_branch(url: &str, keywords: &[String]) -> bool {
    let url_lower = url.to_ascii_lowercase();
    keywords.iter().any(|word| url_lower.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_children_and_leaf_pages_are_distinguished() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <sitemap><loc>https://example.com/sitemap-products.xml</loc></sitemap>
                <sitemap><loc>https://example.com/sitemap-blog.xml</loc></sitemap>
            </sitemapindex>"#;
        let doc = parse_sitemap(xml);
        assert_eq!(
            doc.children,
            vec![
                "https://example.com/sitemap-products.xml",
                "https://example.com/sitemap-blog.xml"
            ]
        );
        assert!(doc.pages.is_empty());

        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <url><loc> https://example.com/solutions/crm </loc><priority>0.8</priority></url>
                <url><loc>https://example.com/platform/api</loc></url>
                <url><lastmod>2024-01-01</lastmod></url>
            </urlset>"#;
        let doc = parse_sitemap(xml);
        assert!(doc.children.is_empty());
        assert_eq!(
            doc.pages,
            vec![
                "https://example.com/solutions/crm",
                "https://example.com/platform/api"
            ]
        );
    }

    #[test]
    fn branch_relevance_is_keyword_gated() {
        let keywords = ScanConfig::default().sitemap_branch_keywords;
        assert!(is_relevant_branch(
            "https://example.com/sitemap-products.xml",
            &keywords
        ));
        assert!(is_relevant_branch(
            "https://example.com/wp-sitemap-pages-1.xml",
            &keywords
        ));
        assert!(!is_relevant_branch(
            "https://example.com/sitemap-blog.xml",
            &keywords
        ));
    }

    #[test]
    fn truncated_documents_parse_best_effort() {
        let xml = "<urlset><url><loc>https://example.com/products/a</loc></url><url><loc>https://exa";
        let doc = parse_sitemap(xml);
        assert_eq!(doc.pages, vec!["https://example.com/products/a"]);
    }
}
