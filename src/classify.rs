use crate::config::ScanConfig;
use crate::normalize::is_root_level;
use crate::types::SchemaLabel;

/// Maps a normalized URL to its schema label.
///
/// The pattern table is a priority list: the first substring match wins.
/// URLs with no directory hint fall through to the flat/root tier, gated on
/// a business keyword so generic top-level pages stay out. Anything else is
/// `Other` rather than silently dropped; callers run [`is_candidate`] first.
pub fn classify_url(url: &str, domain: &str, config: &ScanConfig) -> SchemaLabel {
    let url_lower = url.to_ascii_lowercase();
    for (pattern, label) in &config.patterns {
        if url_lower.contains(pattern.as_str()) {
            return *label;
        }
    }

    if is_root_level(url, domain) && has_business_keyword(&url_lower, config) {
        return SchemaLabel::FlatRoot;
    }

    SchemaLabel::Other
}

/// Boolean gate applied before classification. The blacklist has absolute
/// priority: a noise keyword anywhere in the URL rejects it regardless of
/// any positive match.
pub fn is_candidate(url: &str, domain: &str, config: &ScanConfig) -> bool {
    let url_lower = url.to_ascii_lowercase();
    if config
        .blacklist
        .iter()
        .any(|word| url_lower.contains(word.as_str()))
    {
        return false;
    }

    if config
        .patterns
        .iter()
        .any(|(pattern, _)| url_lower.contains(pattern.as_str()))
    {
        return true;
    }

    is_root_level(url, domain) && has_business_keyword(&url_lower, config)
}

fn has_business_keyword(url_lower: &str, config: &ScanConfig) -> bool {
    config
        .business_keywords
        .iter()
        .any(|word| url_lower.contains(word.as_str()))
}
