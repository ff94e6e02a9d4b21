//! Validation for the `[bridge]` section.

use crate::schema::FetcherConfig;

use super::helpers::{validate_js_identifier, validate_namespace};

pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &FetcherConfig) {
    let bridge = &config.bridge;
    validate_js_identifier(errors, "bridge.object_name", &bridge.object_name);
    validate_js_identifier(errors, "bridge.callback_fn", &bridge.callback_fn);
    validate_namespace(errors, "bridge.cookie_namespace", &bridge.cookie_namespace);

    if bridge.object_name == bridge.callback_fn {
        errors.push("bridge.object_name and bridge.callback_fn must differ".into());
    }
    // The page-facing function is always `window.Fetcher`.
    for (field, value) in [
        ("bridge.object_name", &bridge.object_name),
        ("bridge.callback_fn", &bridge.callback_fn),
    ] {
        if value == "Fetcher" {
            errors.push(format!("{field} must not shadow window.Fetcher"));
        }
    }
}
