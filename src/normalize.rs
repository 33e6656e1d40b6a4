use url::Url;

/// Canonicalizes a raw link for deduplication: everything from the first `?`
/// or `#` onward is dropped, then trailing slashes. Best-effort and
/// idempotent; malformed input comes back as-is rather than erroring.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let without_query = trimmed.split('?').next().unwrap_or(trimmed);
    let without_fragment = without_query.split('#').next().unwrap_or(without_query);
    without_fragment.trim_end_matches('/').to_string()
}

/// Normalizes user input like `example.com/` to `https://example.com`.
pub fn normalize_domain(input: &str) -> String {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

pub fn is_same_site(candidate: &str, domain: &str) -> bool {
    let Some(root) = site_host(domain) else {
        return false;
    };

    Url::parse(candidate)
        .ok()
        .and_then(|u| {
            u.host_str()
                .map(|h| strip_www(h).eq_ignore_ascii_case(&root))
        })
        .unwrap_or(false)
}

/// A URL is root-level when its path has exactly one segment beyond the
/// domain, e.g. `example.com/native-advertising` but not `example.com` or
/// `example.com/a/b`.
pub fn is_root_level(url: &str, domain: &str) -> bool {
    if !is_same_site(url, domain) {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().trim_matches('/');
    !path.is_empty() && !path.contains('/')
}

/// Resolves an anchor href against the page URL and normalizes the result.
/// Non-navigational schemes are dropped.
pub fn resolve_href(page_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("javascript:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let base = Url::parse(page_url).ok()?;
    let resolved = base.join(href).ok()?;
    let scheme = resolved.scheme();
    if scheme != "http" && scheme != "https" {
        return None;
    }

    let normalized = normalize_url(resolved.as_str());
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Derives a display name from the last URL path segment: hyphens and
/// underscores become spaces, words are title-cased.
pub fn title_from_slug(url: &str) -> String {
    let slug = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn site_host(domain: &str) -> Option<String> {
    Url::parse(domain)
        .ok()?
        .host_str()
        .map(|h| strip_www(h).to_ascii_lowercase())
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_query_fragment_and_trailing_slash() {
        assert_eq!(
            normalize_url("https://example.com/platform/?utm=x#pricing"),
            "https://example.com/platform"
        );
        assert_eq!(
            normalize_url("https://example.com/solutions///"),
            "https://example.com/solutions"
        );
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "https://example.com/products/crm?ref=nav",
            "https://example.com/products/crm",
            "not a url at all",
            "/relative/path/",
        ];
        for input in inputs {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once);
        }
    }

    #[test]
    fn domain_gets_scheme_and_loses_trailing_slash() {
        assert_eq!(normalize_domain("example.com/"), "https://example.com");
        assert_eq!(
            normalize_domain("http://example.com"),
            "http://example.com"
        );
        assert_eq!(
            normalize_domain("  gong.io  "),
            "https://gong.io"
        );
    }

    #[test]
    fn same_site_ignores_www_and_rejects_foreign_hosts() {
        assert!(is_same_site(
            "https://www.example.com/platform/x",
            "https://example.com"
        ));
        assert!(!is_same_site(
            "https://cdn.example.org/platform/x",
            "https://example.com"
        ));
    }

    #[test]
    fn root_level_means_exactly_one_path_segment() {
        let domain = "https://example.com";
        assert!(is_root_level("https://example.com/native-advertising", domain));
        assert!(!is_root_level("https://example.com", domain));
        assert!(!is_root_level("https://example.com/solutions/crm", domain));
        assert!(!is_root_level("https://other.com/native-advertising", domain));
    }

    #[test]
    fn resolve_href_joins_and_drops_non_navigational_schemes() {
        let base = "https://example.com";
        assert_eq!(
            resolve_href(base, "/solutions/data-sync/"),
            Some("https://example.com/solutions/data-sync".to_string())
        );
        assert_eq!(resolve_href(base, "mailto:hi@example.com"), None);
        assert_eq!(resolve_href(base, "javascript:void(0)"), None);
        assert_eq!(resolve_href(base, "#pricing"), None);
    }

    #[test]
    fn slug_titles_are_humanized() {
        assert_eq!(
            title_from_slug("https://example.com/solutions/data-sync"),
            "Data Sync"
        );
        assert_eq!(
            title_from_slug("https://example.com/abm_retargeting/"),
            "Abm Retargeting"
        );
        assert_eq!(title_from_slug("https://example.com"), "Example.com");
    }
}
