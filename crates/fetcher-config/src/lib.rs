//! Fetcher configuration system.
//!
//! TOML-based configuration for the shell: which page to host, how the
//! request bridge is exposed to it, where cookies persist, and window and
//! logging settings. Every section uses serde defaults so partial configs
//! work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fetcher_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod paths;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{FetcherConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use fetcher_common::ConfigError;

/// Load config from `path` when given, otherwise from the platform default.
///
/// The default location is created with a commented template on first run.
pub fn load_config(path: Option<&Path>) -> Result<FetcherConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FetcherConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
