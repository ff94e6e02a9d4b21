//! Validation for the `[page]` and `[navigation]` sections.

use crate::schema::FetcherConfig;

use super::helpers::validate_http_url;

pub(crate) fn validate_page(errors: &mut Vec<String>, config: &FetcherConfig) {
    validate_http_url(errors, "page.home_url", &config.page.home_url);

    if let Some(ua) = &config.page.user_agent {
        if ua.trim().is_empty() || ua.chars().any(|c| c.is_control()) {
            errors.push("page.user_agent must be non-empty printable text".into());
        }
    }
}

pub(crate) fn validate_navigation(errors: &mut Vec<String>, config: &FetcherConfig) {
    for (i, prefix) in config.navigation.allowed_prefixes.iter().enumerate() {
        if prefix.trim().is_empty() {
            errors.push(format!("navigation.allowed_prefixes[{i}] is empty"));
        }
    }

    if !config.navigation.allowed_prefixes.is_empty()
        && !config.navigation.is_allowed(&config.page.home_url)
    {
        errors.push("page.home_url is blocked by navigation.allowed_prefixes".into());
    }
}
