mod metadata;
mod nav;
mod sitemap;
mod storefront;

use log::debug;

use crate::config::ScanConfig;
use crate::fetch::Fetcher;
use crate::types::CatalogEntry;

/// One discovery procedure. Each variant consumes the fetcher plus the rule
/// tables and yields entries; internal failures degrade to an empty list,
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Conventional commerce JSON endpoint; a hit is near-certain evidence
    /// of a retail catalog and short-circuits everything else.
    StorefrontFeed,
    /// Recursive, depth-bounded sitemap descent.
    SitemapCrawl,
    /// Anchor scan of the homepage, for sites that hide their primary
    /// navigation from the sitemap.
    HomepageNav,
    /// JSON-LD blocks on the homepage, with a company-summary fallback.
    StructuredMetadata,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::StorefrontFeed => "storefront_feed",
            Strategy::SitemapCrawl => "sitemap_crawl",
            Strategy::HomepageNav => "homepage_nav",
            Strategy::StructuredMetadata => "structured_metadata",
        }
    }

    pub async fn run(
        self,
        fetcher: &Fetcher,
        domain: &str,
        config: &ScanConfig,
    ) -> Vec<CatalogEntry> {
        let entries = match self {
            Strategy::StorefrontFeed => storefront::run(fetcher, domain, config).await,
            Strategy::SitemapCrawl => sitemap::run(fetcher, domain, config).await,
            Strategy::HomepageNav => nav::run(fetcher, domain, config).await,
            Strategy::StructuredMetadata => metadata::run(fetcher, domain, config).await,
        };
        debug!("strategy {} produced {} entries", self.label(), entries.len());
        entries
    }
}
