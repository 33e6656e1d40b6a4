/// Structural category assigned to a discovered catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaLabel {
    ProductSuite,
    PlatformFeature,
    Solution,
    FlatRoot,
    RetailProduct,
    CompanySummary,
    Other,
}

impl SchemaLabel {
    pub fn label(self) -> &'static str {
        match self {
            SchemaLabel::ProductSuite => "Product Suite",
            SchemaLabel::PlatformFeature => "Platform Feature",
            SchemaLabel::Solution => "Solution",
            SchemaLabel::FlatRoot => "Flat/Root",
            SchemaLabel::RetailProduct => "Retail Product",
            SchemaLabel::CompanySummary => "Company Summary",
            SchemaLabel::Other => "Other",
        }
    }

    /// Go-to-market positioning implied when this label dominates a scan.
    pub fn positioning(self) -> Option<&'static str> {
        match self {
            SchemaLabel::ProductSuite => Some("Product-Suite"),
            SchemaLabel::PlatformFeature => Some("Platform-Focused"),
            SchemaLabel::Solution => Some("Solution-Led"),
            SchemaLabel::FlatRoot => Some("Flat-Traffic-Focused"),
            SchemaLabel::RetailProduct => Some("Retail-Catalog"),
            SchemaLabel::CompanySummary | SchemaLabel::Other => None,
        }
    }
}

/// Which discovery strategy produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrySource {
    ShopifyFeed,
    SitemapScan,
    HomepageScan,
    StructuredData,
}

impl EntrySource {
    pub fn label(self) -> &'static str {
        match self {
            EntrySource::ShopifyFeed => "Shopify API",
            EntrySource::SitemapScan => "Sitemap Scan",
            EntrySource::HomepageScan => "Homepage Scan",
            EntrySource::StructuredData => "Structured Data",
        }
    }
}

/// One discovered product/solution/platform page.
///
/// `url` is always normalized (no query string, fragment, or trailing slash)
/// and is the dedup key within a single scan. Entries are immutable once
/// created.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub schema: SchemaLabel,
    pub url: String,
    pub source: EntrySource,
    pub price: Option<String>,
    pub item_type: Option<String>,
}

/// Final output of one scan: merged entries plus the dominant-schema
/// diagnosis. An empty report is an expected outcome, not a fault.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub domain: String,
    pub entries: Vec<CatalogEntry>,
    pub dominant_schema: Option<SchemaLabel>,
}

impl ScanReport {
    pub fn found_catalog(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn positioning(&self) -> Option<&'static str> {
        self.dominant_schema.and_then(SchemaLabel::positioning)
    }

    /// One-line explanation of the detected positioning, for the summary
    /// the presentation layer prints.
    pub fn positioning_hint(&self) -> Option<&'static str> {
        match self.dominant_schema? {
            SchemaLabel::PlatformFeature => {
                Some("positions its offering as a single system with multiple capabilities")
            }
            SchemaLabel::Solution => {
                Some("sells based on jobs to be done rather than tool names")
            }
            SchemaLabel::ProductSuite => {
                Some("acts as a directory of distinct, standalone tools")
            }
            SchemaLabel::RetailProduct => {
                Some("publishes a retail product catalog through a storefront feed")
            }
            SchemaLabel::FlatRoot => {
                Some("routes high-intent traffic to flat top-level landing pages")
            }
            SchemaLabel::CompanySummary | SchemaLabel::Other => None,
        }
    }
}
