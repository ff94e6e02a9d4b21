//! Platform directories for config and persisted bridge state.

use std::fs;
use std::path::PathBuf;

use fetcher_common::ConfigError;

const APP_NAME: &str = "fetcher";

/// Returns the platform-specific configuration directory for Fetcher.
///
/// - macOS: `~/Library/Application Support/fetcher`
/// - Linux: `$XDG_CONFIG_HOME/fetcher` (defaults to `~/.config/fetcher`)
/// - Windows: `%APPDATA%\fetcher`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| ConfigError::PathError("could not determine config directory".into()))
}

/// Returns the platform-specific data directory for Fetcher.
///
/// - macOS: `~/Library/Application Support/fetcher`
/// - Linux: `$XDG_DATA_HOME/fetcher` (defaults to `~/.local/share/fetcher`)
/// - Windows: `%APPDATA%\fetcher`
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| ConfigError::PathError("could not determine data directory".into()))
}

/// Returns the path to the main configuration file.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory holding one cookie file per namespace.
pub fn cookie_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("cookies"))
}

/// Cookie file for a storage namespace, `cookie_dir()/<namespace>.json`.
pub fn cookie_file(namespace: &str) -> Result<PathBuf, ConfigError> {
    Ok(cookie_dir()?.join(format!("{namespace}.json")))
}

/// Creates the config and cookie directories if they do not already exist.
pub fn ensure_dirs() -> Result<(), ConfigError> {
    for dir in [config_dir()?, cookie_dir()?] {
        fs::create_dir_all(&dir).map_err(|e| {
            ConfigError::PathError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_fetcher() {
        if let Ok(path) = config_dir() {
            assert!(
                path.ends_with("fetcher"),
                "config_dir should end with 'fetcher', got: {path:?}"
            );
        }
    }

    #[test]
    fn config_file_has_correct_name() {
        if let Ok(path) = config_file() {
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), "config.toml");
        }
    }

    #[test]
    fn cookie_file_is_namespaced_inside_data_dir() {
        if let (Ok(file), Ok(data)) = (cookie_file("qinglianjie"), data_dir()) {
            assert!(file.starts_with(&data));
            assert_eq!(
                file.file_name().unwrap().to_str().unwrap(),
                "qinglianjie.json"
            );
            assert_eq!(
                file.parent().unwrap().file_name().unwrap().to_str().unwrap(),
                "cookies"
            );
        }
    }
}
