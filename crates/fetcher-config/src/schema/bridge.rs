use serde::{Deserialize, Serialize};

/// How the request bridge is exposed to the hosted page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Global object the page calls `fetch(url, jsonOptions, callbackId)` on.
    pub object_name: String,
    /// Global dispatch function invoked with `(id, "resolve" | "reject", value)`.
    pub callback_fn: String,
    /// Storage namespace of the persistent cookie jar.
    pub cookie_namespace: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            object_name: "AppFetcher".into(),
            callback_fn: "callback".into(),
            cookie_namespace: "default".into(),
        }
    }
}
