use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("path error: {0}")]
    PathError(String),
}

/// Fatal errors while bringing the host up.
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("window error: {0}")]
    Window(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("page.home_url is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: page.home_url is empty"
        );

        let err = ConfigError::PathError("no data directory".into());
        assert_eq!(err.to_string(), "path error: no data directory");
    }

    #[test]
    fn fetcher_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: FetcherError = config_err.into();
        assert!(matches!(err, FetcherError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn fetcher_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FetcherError = io_err.into();
        assert!(matches!(err, FetcherError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn fetcher_error_other_variants() {
        let err = FetcherError::Bridge("channel closed".into());
        assert_eq!(err.to_string(), "bridge error: channel closed");

        let err = FetcherError::Window("no display".into());
        assert_eq!(err.to_string(), "window error: no display");
    }
}
