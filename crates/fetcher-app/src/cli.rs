use std::path::PathBuf;

use clap::Parser;
use fetcher_common::ConfigError;
use fetcher_config::FetcherConfig;

/// Fetcher: host a web page with a native, cookie-persistent request bridge.
#[derive(Parser, Debug, Default)]
#[command(name = "fetcher", version, about)]
pub struct Args {
    /// Page to load instead of the configured home URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `fetcher=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Apply command-line overrides to a loaded config.
    ///
    /// The result is validated; on failure `config` is left untouched.
    pub fn apply_overrides(&self, config: &mut FetcherConfig) -> Result<(), ConfigError> {
        let Some(url) = &self.url else {
            return Ok(());
        };
        let mut candidate = config.clone();
        candidate.page.home_url = url.clone();
        fetcher_config::validation::validate(&candidate)?;
        *config = candidate;
        Ok(())
    }

    /// `EnvFilter` directive: the flag, else the configured level.
    pub fn log_directive(&self, config: &FetcherConfig) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.directive().to_string())
    }
}

pub fn parse() -> Args {
    Args::parse()
}
