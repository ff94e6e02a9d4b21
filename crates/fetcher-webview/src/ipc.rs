//! IPC envelope between the page and the host.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the page calls `window.ipc.postMessage(JSON.stringify({kind, payload}))`,
//!   which triggers the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: the host calls `evaluate_script` on the page's WebView.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Why an IPC body could not be used.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("invalid ipc envelope: {0}")]
    Envelope(serde_json::Error),

    #[error("invalid payload for {kind:?}: {source}")]
    Payload {
        kind: String,
        source: serde_json::Error,
    },
}

/// A typed IPC message from JavaScript to Rust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// Command name, checked against the host's allow-list.
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    pub fn from_json(raw: &str) -> Result<Self, IpcError> {
        serde_json::from_str(raw).map_err(IpcError::Envelope)
    }

    /// Decode the payload into the shape `kind` expects.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, IpcError> {
        T::deserialize(&self.payload).map_err(|source| IpcError::Payload {
            kind: self.kind.clone(),
            source,
        })
    }

    /// Best-effort lookup of a string field in the payload.
    pub fn payload_str(&self, field: &str) -> Option<&str> {
        self.payload.get(field).and_then(serde_json::Value::as_str)
    }
}
