use std::collections::HashSet;

use log::{error, info};

use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::normalize::normalize_domain;
use crate::strategies::Strategy;
use crate::types::{CatalogEntry, ScanReport, SchemaLabel};

/// Runs one full scan against a domain.
///
/// Strategies run strictly in priority order with no backtracking: a
/// storefront hit is terminal, the sitemap crawl suppresses the homepage
/// scan once it has enough results, and structured metadata is the last
/// resort when everything else came back empty. Merging is keyed by
/// normalized URL, so a later strategy never overwrites an entry found by
/// an earlier one. Each invocation builds a fresh collection; nothing is
/// shared across scans.
pub async fn run_scan(domain_input: &str, config: &ScanConfig) -> ScanReport {
    let domain = normalize_domain(domain_input);
    let mut entries = Vec::new();

    let fetcher = match Fetcher::new(&config.user_agent) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            error!("failed to build HTTP client: {err}");
            return build_report(domain, entries);
        }
    };

    info!("checking {domain} for a storefront feed");
    let storefront = Strategy::StorefrontFeed.run(&fetcher, &domain, config).await;
    if !storefront.is_empty() {
        merge_entries(&mut entries, storefront);
    } else {
        info!("deep scanning sitemaps under {domain}");
        let sitemap = Strategy::SitemapCrawl.run(&fetcher, &domain, config).await;
        merge_entries(&mut entries, sitemap);

        if entries.len() < config.min_sitemap_results {
            info!("scanning homepage navigation of {domain}");
            let nav = Strategy::HomepageNav.run(&fetcher, &domain, config).await;
            merge_entries(&mut entries, nav);
        }

        if entries.is_empty() {
            info!("reading structured metadata on {domain}");
            let metadata = Strategy::StructuredMetadata
                .run(&fetcher, &domain, config)
                .await;
            merge_entries(&mut entries, metadata);
        }
    }

    entries.truncate(config.max_entries);
    build_report(domain, entries)
}

fn build_report(domain: String, entries: Vec<CatalogEntry>) -> ScanReport {
    let dominant_schema = dominant_schema(&entries);
    ScanReport {
        domain,
        entries,
        dominant_schema,
    }
}

/// Appends entries whose URL has not been seen yet, preserving the order
/// and priority of what is already merged.
pub fn merge_entries(merged: &mut Vec<CatalogEntry>, incoming: Vec<CatalogEntry>) {
    let mut seen = merged
        .iter()
        .map(|entry| entry.url.clone())
        .collect::<HashSet<_>>();
    for entry in incoming {
        if seen.insert(entry.url.clone()) {
            merged.push(entry);
        }
    }
}

/// Most frequent label across the entries. Ties break toward the label
/// encountered first, which keeps the diagnosis stable across runs.
pub fn dominant_schema(entries: &[CatalogEntry]) -> Option<SchemaLabel> {
    let mut counts: Vec<(SchemaLabel, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(label, _)| *label == entry.schema) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.schema, 1)),
        }
    }

    let mut best: Option<(SchemaLabel, usize)> = None;
    for (label, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}
