//! Settlement values and their rendering as injected script.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::callback::CallbackId;
use crate::error::BridgeError;

/// Status reported for transport failures and rejected descriptors.
pub const BRIDGE_FAILURE_STATUS: u16 = 400;

/// Failure payload handed to the page's `reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub status: u16,
    pub message: String,
}

impl Rejection {
    /// Non-success HTTP status, with its canonical reason phrase as the
    /// message.
    pub fn from_status(status: StatusCode) -> Self {
        Self::with_reason(status, None)
    }

    /// Non-success HTTP status carrying the reason phrase the server sent.
    /// An absent or empty phrase falls back to the canonical one.
    pub fn with_reason(status: StatusCode, reason: Option<&str>) -> Self {
        let message = match reason.map(str::trim) {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        };
        Self {
            status: status.as_u16(),
            message,
        }
    }
}

impl From<BridgeError> for Rejection {
    fn from(err: BridgeError) -> Self {
        Self {
            status: BRIDGE_FAILURE_STATUS,
            message: err.to_string(),
        }
    }
}

/// Outcome of one bridge call. Exactly one is delivered per callback id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Response body text.
    Resolve(String),
    Reject(Rejection),
}

impl Settlement {
    /// Name of the continuation the page invokes.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Reject(_) => "reject",
        }
    }

    pub fn is_resolve(&self) -> bool {
        matches!(self, Self::Resolve(_))
    }

    /// Render `window.<callback_fn>(id, "resolve" | "reject", value)`.
    ///
    /// `callback_fn` must be a plain identifier (the config validates it);
    /// every other interpolated value is emitted as a JSON literal.
    pub fn to_script(&self, callback_fn: &str, id: &CallbackId) -> String {
        let value = match self {
            Self::Resolve(body) => js_string(body),
            Self::Reject(rejection) => js_value(rejection),
        };
        format!(
            "window.{callback_fn}({},\"{}\",{value})",
            js_string(id.as_str()),
            self.method_name(),
        )
    }
}

impl From<BridgeError> for Settlement {
    fn from(err: BridgeError) -> Self {
        Self::Reject(err.into())
    }
}

/// JSON string literal that is also a valid JavaScript string literal.
pub fn js_string(s: &str) -> String {
    escape_line_separators(serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string()))
}

fn js_value<T: Serialize>(value: &T) -> String {
    escape_line_separators(serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()))
}

/// U+2028/U+2029 are legal in JSON strings but end a line in older engines.
fn escape_line_separators(json: String) -> String {
    if json.contains(['\u{2028}', '\u{2029}']) {
        json.replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029")
    } else {
        json
    }
}
