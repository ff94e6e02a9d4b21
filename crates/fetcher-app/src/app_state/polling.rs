//! Polling of WebView events and bridge deliveries.

use std::time::Instant;

use winit::event_loop::ActiveEventLoop;

use super::core::FetcherApp;
use super::types::POLL_INTERVAL;

impl FetcherApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            // events first so a navigation drops its page's calls before
            // their results could be injected into the new page
            self.poll_webview_events();
            self.poll_bridge_deliveries();
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }
}
