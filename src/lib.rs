//! Discover and classify a company's public product/solution catalog from its
//! website, without an API.
//!
//! The engine combines four opportunistic discovery strategies (storefront
//! JSON feed, sitemap crawl, homepage navigation scan, structured metadata)
//! with a rule-based URL classifier. [`scan::run_scan`] runs them in priority
//! order, short-circuits once enough entries are found, and returns a
//! deduplicated [`types::ScanReport`]. Every failure mode degrades to fewer
//! or no results; the engine never raises.

pub mod classify;
pub mod config;
pub mod export;
pub mod fetch;
pub mod normalize;
pub mod scan;
pub mod strategies;
pub mod types;

pub use config::ScanConfig;
pub use scan::run_scan;
pub use types::{CatalogEntry, EntrySource, ScanReport, SchemaLabel};
