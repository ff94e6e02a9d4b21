//! Shared validation helpers used by all section validators.

use std::sync::LazyLock;

use regex::Regex;

/// Plain JavaScript identifier (no unicode escapes, no reserved-word check).
static JS_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Absolute http(s) URL with a non-empty host.
static HTTP_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+([/?#]\S*)?$").unwrap());

/// File-name safe namespace.
static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

pub(crate) fn validate_js_identifier(errors: &mut Vec<String>, name: &str, value: &str) {
    if !JS_IDENT_RE.is_match(value) {
        errors.push(format!("{name} = {value:?} is not a valid JavaScript identifier"));
    }
}

pub(crate) fn validate_http_url(errors: &mut Vec<String>, name: &str, value: &str) {
    if !HTTP_URL_RE.is_match(value) {
        errors.push(format!("{name} = {value:?} is not an absolute http(s) URL"));
    }
}

pub(crate) fn validate_namespace(errors: &mut Vec<String>, name: &str, value: &str) {
    if !NAMESPACE_RE.is_match(value) {
        errors.push(format!(
            "{name} = {value:?} must be 1-64 characters of [A-Za-z0-9_-]"
        ));
    }
}
