/// Errors raised while turning a script-side call into an HTTP request.
///
/// Every variant is surfaced to the page as a `{status: 400, message}`
/// rejection; none of them escape into the host.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed request options: {0}")]
    MalformedOptions(String),

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    #[error("invalid header {0:?}")]
    InvalidHeader(String),

    #[error("invalid callback id")]
    InvalidCallbackId,

    #[error("callback id {0} is already in flight")]
    DuplicateCallback(String),

    #[error("http client error: {0}")]
    Client(String),

    #[error("{0}")]
    Transport(String),
}

/// Errors from the cookie jar's on-disk storage.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cookie storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl BridgeError {
    /// Describe a transport failure including its source chain.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        if message.trim().is_empty() {
            message = "request failed".into();
        }
        Self::Transport(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::MalformedOptions("missing field `method`".into());
        assert_eq!(
            err.to_string(),
            "malformed request options: missing field `method`"
        );

        let err = BridgeError::InvalidMethod("GE T".into());
        assert_eq!(err.to_string(), "invalid method \"GE T\"");

        let err = BridgeError::DuplicateCallback("tok1".into());
        assert_eq!(err.to_string(), "callback id tok1 is already in flight");
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn transport_includes_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = BridgeError::transport(&Outer(inner));
        assert_eq!(
            err.to_string(),
            "error sending request: connection refused"
        );
    }

    #[test]
    fn cookie_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CookieError = io_err.into();
        assert!(err.to_string().contains("read-only"));
    }
}
