//! WebView lifecycle management.
//!
//! `WebViewManager` creates `wry::WebView` instances and collects their
//! events; `WebViewRegistry` tracks the live ones by pane.

use std::sync::{Arc, Mutex};

use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

/// Shared sink the wry callbacks push into.
pub(crate) type EventSink = Arc<Mutex<Vec<WebViewEvent>>>;

/// Creates WebViews and owns the event sink they report to.
pub struct WebViewManager {
    /// Events are pushed here for the main event loop to consume.
    pub(crate) events: EventSink,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *events)
    }

    pub(crate) fn push_event(&self, event: WebViewEvent) {
        push(&self.events, event);
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn push(events: &EventSink, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

#[cfg(test)]
mod tests {
    use fetcher_common::PaneId;

    use super::*;

    #[test]
    fn drain_takes_everything_once() {
        let manager = WebViewManager::new();
        manager.push_event(WebViewEvent::Closed { pane_id: PaneId(1) });
        manager.push_event(WebViewEvent::Closed { pane_id: PaneId(2) });

        let drained = manager.drain_events();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].pane_id(), PaneId(1));
        assert!(manager.drain_events().is_empty());
    }
}
