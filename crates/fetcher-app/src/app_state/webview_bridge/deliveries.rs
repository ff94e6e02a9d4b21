//! Injection of settled bridge calls into their pages.

use crate::app_state::core::FetcherApp;

impl FetcherApp {
    /// Evaluate every ready settlement in the page that issued it.
    ///
    /// Runs on the event-loop thread; this is the only place bridge results
    /// reach a page.
    pub(in crate::app_state) fn poll_bridge_deliveries(&mut self) {
        let deliveries = self.bridge.poll_deliveries();
        if deliveries.is_empty() {
            return;
        }

        let callback_fn = &self.config.bridge.callback_fn;
        for delivery in deliveries {
            let handle = self
                .webviews
                .as_ref()
                .and_then(|r| r.get(delivery.pane_id));
            let Some(handle) = handle else {
                tracing::debug!(
                    pane_id = %delivery.pane_id,
                    callback_id = %delivery.callback_id,
                    "Dropping delivery: pane has no webview"
                );
                continue;
            };

            let script = delivery.to_script(callback_fn);
            match handle.evaluate_script(&script) {
                Ok(()) => tracing::debug!(
                    pane_id = %delivery.pane_id,
                    callback_id = %delivery.callback_id,
                    method = delivery.settlement.method_name(),
                    page = handle.current_url(),
                    "Bridge call settled"
                ),
                Err(e) => tracing::error!(
                    pane_id = %delivery.pane_id,
                    callback_id = %delivery.callback_id,
                    page = handle.current_url(),
                    error = %e,
                    "Failed to inject bridge settlement"
                ),
            }
        }
    }
}
