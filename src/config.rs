use std::time::Duration;

use crate::types::SchemaLabel;

/// Process-wide scan constants: rule tables, timeouts, and result caps.
///
/// The tables are immutable data injected into the classifier, filter, and
/// strategies at construction, so tests can substitute synthetic rule sets.
/// `Default` carries the production values.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Ordered priority list of (path substring, label) pairs. First match
    /// wins, so a path containing two patterns resolves to the earlier one.
    pub patterns: Vec<(String, SchemaLabel)>,
    /// Noise keywords that reject a URL outright, before anything else.
    pub blacklist: Vec<String>,
    /// Keyword gate for flat top-level slugs that carry no directory hint.
    pub business_keywords: Vec<String>,
    /// Conventional sitemap locations, probed in order.
    pub sitemap_paths: Vec<String>,
    /// A sitemap-index child is only followed when its URL contains one of
    /// these.
    pub sitemap_branch_keywords: Vec<String>,
    pub user_agent: String,
    pub storefront_timeout: Duration,
    pub sitemap_timeout: Duration,
    pub homepage_timeout: Duration,
    pub storefront_page_size: usize,
    pub sitemap_cap: usize,
    pub nav_cap: usize,
    /// Cap on the merged entry collection handed back to the caller.
    pub max_entries: usize,
    /// Below this many sitemap entries the homepage scan runs as a fallback.
    pub min_sitemap_results: usize,
    /// Explicit bound on sitemap-index recursion.
    pub max_sitemap_depth: usize,
    /// Anchor text longer than this falls back to the slug-derived name.
    pub max_name_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                pattern("/products/", SchemaLabel::ProductSuite),
                pattern("/product/", SchemaLabel::ProductSuite),
                pattern("/software/", SchemaLabel::ProductSuite),
                pattern("/platform/", SchemaLabel::PlatformFeature),
                pattern("/features/", SchemaLabel::PlatformFeature),
                pattern("/feature/", SchemaLabel::PlatformFeature),
                pattern("/modules/", SchemaLabel::PlatformFeature),
                pattern("/solutions/", SchemaLabel::Solution),
                pattern("/solution/", SchemaLabel::Solution),
                pattern("/services/", SchemaLabel::Solution),
            ],
            blacklist: strings(&[
                "career", "job", "hiring", "apply", // HR
                "policy", "privacy", "terms", "legal", // legal
                "blog", "news", "press", "release", // content
                "login", "signin", "register", "account", // auth
                "about", "contact", "investor", "faq", // info
                "support", "help", "docs", "developers", // support
                "customer-stories", "case-studies", // marketing content
            ]),
            business_keywords: strings(&[
                "advertising",
                "campaign",
                "dsp",
                "abm",
                "retargeting",
                "programmatic",
                "audience",
                "attribution",
                "personalization",
                "automation",
            ]),
            sitemap_paths: strings(&[
                "/sitemap.xml",
                "/sitemap_index.xml",
                "/wp-sitemap.xml",
                "/sitemap-pages.xml",
            ]),
            sitemap_branch_keywords: strings(&["page", "product", "solution", "service"]),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            storefront_timeout: Duration::from_secs(3),
            sitemap_timeout: Duration::from_secs(5),
            homepage_timeout: Duration::from_secs(8),
            storefront_page_size: 250,
            sitemap_cap: 50,
            nav_cap: 40,
            max_entries: 60,
            min_sitemap_results: 5,
            max_sitemap_depth: 2,
            max_name_len: 60,
        }
    }
}

fn pattern(path: &str, label: SchemaLabel) -> (String, SchemaLabel) {
    (path.to_string(), label)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
