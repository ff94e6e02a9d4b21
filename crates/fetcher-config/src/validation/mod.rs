//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod bridge;
mod helpers;
mod page;
mod window;


use crate::schema::FetcherConfig;
use fetcher_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FetcherConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    page::validate_page(&mut errors, config);
    page::validate_navigation(&mut errors, config);
    bridge::validate_bridge(&mut errors, config);
    window::validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
