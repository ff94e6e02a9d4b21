//! URL allow-list shared by config validation and the WebView navigation
//! handler.

/// Check `url` against an allow-list of URL prefixes. An empty list allows
/// every URL.
pub fn is_navigation_allowed(allowed_prefixes: &[String], url: &str) -> bool {
    allowed_prefixes.is_empty()
        || allowed_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
}
