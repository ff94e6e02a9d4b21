//! IPC message validation and dispatch from the page to Rust handlers.

use fetcher_bridge::{BridgeError, FetchCall};
use fetcher_common::PaneId;
use fetcher_webview::IpcMessage;

use crate::app_state::core::FetcherApp;

// =============================================================================
// IPC ALLOWLIST
// =============================================================================

/// Allowed IPC message kinds from JavaScript.
///
/// Any message with a `kind` not in this list is rejected and logged.
const ALLOWED_IPC_KINDS: &[&str] = &["fetch", "ping"];

/// Check whether an IPC message kind is in the allowlist.
pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

// =============================================================================
// DISPATCH
// =============================================================================

impl FetcherApp {
    /// Handle a single IPC message from a webview.
    pub(in crate::app_state) fn handle_ipc_message(&mut self, pane_id: PaneId, body: &str) {
        let msg = match IpcMessage::from_json(body) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(
                    pane_id = %pane_id,
                    body_len = body.len(),
                    error = %e,
                    "IPC message rejected: failed to parse"
                );
                return;
            }
        };

        if !is_ipc_kind_allowed(&msg.kind) {
            tracing::warn!(pane_id = %pane_id, kind = %msg.kind, "IPC message rejected: unknown kind");
            return;
        }

        tracing::debug!(pane_id = %pane_id, kind = %msg.kind, "IPC message dispatched");

        match msg.kind.as_str() {
            "fetch" => self.handle_fetch(pane_id, &msg),
            "ping" => {
                // round-trip check for the IPC channel
                if let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(pane_id)) {
                    let script = format!(
                        "console.debug({});",
                        serde_json::json!({ "kind": "pong", "pane": pane_id.0 })
                    );
                    if let Err(e) = handle.evaluate_script(&script) {
                        tracing::warn!(pane_id = %pane_id, error = %e, "Failed to send pong");
                    }
                }
            }
            _ => {
                // Shouldn't happen, allowlist checked above
                tracing::warn!(pane_id = %pane_id, kind = %msg.kind, "Unhandled IPC kind");
            }
        }
    }

    /// Forward a `fetch` call to the bridge.
    ///
    /// A payload that does not decode is rejected through its callback id
    /// when one can be recovered, and dropped otherwise.
    fn handle_fetch(&mut self, pane_id: PaneId, msg: &IpcMessage) {
        let result = match msg.payload_as::<FetchCall>() {
            Ok(call) => self.bridge.dispatch(pane_id, call),
            Err(e) => match msg.payload_str("callbackId") {
                Some(callback_id) => {
                    tracing::warn!(pane_id = %pane_id, callback_id, error = %e, "Rejecting malformed fetch payload");
                    self.bridge.reject(
                        pane_id,
                        callback_id,
                        BridgeError::MalformedOptions(e.to_string()),
                    )
                }
                None => {
                    tracing::warn!(pane_id = %pane_id, error = %e, "Dropping fetch payload without callback id");
                    return;
                }
            },
        };

        match result {
            Ok(()) => {}
            Err(BridgeError::DuplicateCallback(id)) => {
                tracing::warn!(pane_id = %pane_id, callback_id = %id, "Ignoring fetch: callback id already in flight");
            }
            Err(e) => {
                tracing::warn!(pane_id = %pane_id, error = %e, "Fetch call refused");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support;
    use crate::app_state::types::MAIN_PANE;

    #[test]
    fn allowlist() {
        assert!(is_ipc_kind_allowed("fetch"));
        assert!(is_ipc_kind_allowed("ping"));
        assert!(!is_ipc_kind_allowed("pty_input"));
        assert!(!is_ipc_kind_allowed(""));
        assert!(!is_ipc_kind_allowed("FETCH"));
    }

    #[test]
    fn fetch_message_reaches_bridge() {
        let mut app = test_support::app();
        app.handle_ipc_message(
            MAIN_PANE,
            r#"{"kind":"fetch","payload":{"url":"not a url","options":"{\"method\":\"GET\",\"headers\":{}}","callbackId":"tok1"}}"#,
        );
        assert_eq!(app.bridge.outstanding_for(MAIN_PANE), 1);
    }

    #[test]
    fn duplicate_fetch_is_ignored() {
        let mut app = test_support::app();
        let body = r#"{"kind":"fetch","payload":{"url":"x","options":"{","callbackId":"tok1"}}"#;
        app.handle_ipc_message(MAIN_PANE, body);
        app.handle_ipc_message(MAIN_PANE, body);
        assert_eq!(app.bridge.outstanding(), 1);
    }

    #[test]
    fn malformed_payload_with_callback_id_is_rejected() {
        let mut app = test_support::app();
        app.handle_ipc_message(
            MAIN_PANE,
            r#"{"kind":"fetch","payload":{"callbackId":"tok1"}}"#,
        );
        assert_eq!(app.bridge.outstanding(), 1);
    }

    #[test]
    fn malformed_payload_without_callback_id_is_dropped() {
        let mut app = test_support::app();
        app.handle_ipc_message(MAIN_PANE, r#"{"kind":"fetch","payload":{"url":"x"}}"#);
        app.handle_ipc_message(MAIN_PANE, r#"{"kind":"fetch"}"#);
        assert_eq!(app.bridge.outstanding(), 0);
    }

    #[test]
    fn unknown_kind_and_garbage_are_ignored() {
        let mut app = test_support::app();
        app.handle_ipc_message(MAIN_PANE, r#"{"kind":"pty_input","payload":{"callbackId":"x"}}"#);
        app.handle_ipc_message(MAIN_PANE, "not json");
        app.handle_ipc_message(MAIN_PANE, r#"{"kind":"ping"}"#);
        assert_eq!(app.bridge.outstanding(), 0);
    }
}
