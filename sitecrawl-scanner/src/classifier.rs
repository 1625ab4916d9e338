//! Link resolution and same-site classification.
//!
//! A link is internal when its resolved authority (host, plus any explicit
//! non-default port) matches the seed's exactly. `www.example.com` and
//! `example.com` are different sites, and the scheme is not considered.

use url::Url;

/// The authority a crawl is pinned to, derived from the seed URL.
///
/// Returns `None` for URLs without a host (`mailto:`, `data:`, ...).
pub fn site_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Resolve `href` against `base` and report whether it stays on `site_domain`.
///
/// Relative, protocol-relative and fragment-only links all come back absolute.
/// Fragments and query strings are kept as-is. An href that cannot be joined
/// yields `None`.
pub fn resolve_and_classify(href: &str, base: &Url, site_domain: &str) -> Option<(Url, bool)> {
    let resolved = base.join(href).ok()?;
    let is_internal = self::site_domain(&resolved).is_some_and(|domain| domain == site_domain);
    Some((resolved, is_internal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/x").unwrap()
    }

    #[test]
    fn test_relative_link_is_internal() {
        let (url, internal) = resolve_and_classify("/about", &base(), "example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/about");
        assert!(internal);
    }

    #[test]
    fn test_other_host_is_external() {
        let (url, internal) =
            resolve_and_classify("https://other.com/y", &base(), "example.com").unwrap();
        assert_eq!(url.as_str(), "https://other.com/y");
        assert!(!internal);
    }

    #[test]
    fn test_protocol_relative_link() {
        let (url, internal) = resolve_and_classify("//example.com/z", &base(), "example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/z");
        assert!(internal);
    }

    #[test]
    fn test_fragment_link_keeps_fragment() {
        let (url, internal) = resolve_and_classify("#top", &base(), "example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/x#top");
        assert!(internal);
    }

    #[test]
    fn test_subdomain_is_external() {
        let (_, internal) =
            resolve_and_classify("http://www.example.com/", &base(), "example.com").unwrap();
        assert!(!internal);
    }

    #[test]
    fn test_scheme_is_ignored() {
        let (_, internal) =
            resolve_and_classify("https://example.com/secure", &base(), "example.com").unwrap();
        assert!(internal);
    }

    #[test]
    fn test_hostless_link_is_external() {
        let (_, internal) =
            resolve_and_classify("mailto:someone@example.com", &base(), "example.com").unwrap();
        assert!(!internal);
    }

    #[test]
    fn test_port_is_part_of_site() {
        let base = Url::parse("http://127.0.0.1:8080/").unwrap();
        let domain = site_domain(&base).unwrap();
        assert_eq!(domain, "127.0.0.1:8080");

        let (_, same) = resolve_and_classify("/a", &base, &domain).unwrap();
        let (_, other) = resolve_and_classify("http://127.0.0.1:9090/a", &base, &domain).unwrap();
        assert!(same);
        assert!(!other);
    }

    #[test]
    fn test_default_port_is_dropped() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(site_domain(&url).as_deref(), Some("example.com"));
    }

    #[test]
    fn test_unjoinable_href() {
        assert!(resolve_and_classify("http://[::1", &base(), "example.com").is_none());
    }
}
