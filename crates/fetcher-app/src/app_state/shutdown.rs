//! Graceful shutdown: destroy webviews, stop the runtime, flush cookies.

use super::core::FetcherApp;
use super::types::RUNTIME_SHUTDOWN_TIMEOUT;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl FetcherApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Destroy webviews (no page is left to receive results)
    /// 2. Abort in-flight bridge calls
    /// 3. Shut down the tokio runtime
    /// 4. Flush the cookie jar
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        // 1. Destroy all webviews and forget their calls
        let panes = self
            .webviews
            .as_ref()
            .map(|r| r.active_panes())
            .unwrap_or_default();
        for pane_id in panes {
            self.destroy_webview_for_pane(pane_id);
        }

        // 2. Abort whatever is left
        self.bridge.shutdown();

        // 3. Shut down tokio runtime
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
        }

        // 4. Persist cookies
        if let Err(e) = self.bridge.executor().jar().save() {
            tracing::error!("Failed to save cookies: {e}");
        }

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
