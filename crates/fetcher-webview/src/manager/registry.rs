use std::collections::HashMap;

use fetcher_common::PaneId;
use tracing::debug;
use wry::raw_window_handle;

use crate::events::WebViewEvent;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Maps pane IDs to live WebView handles.
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<PaneId, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    /// Create a WebView for a pane and register it.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        pane_id: PaneId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<(), wry::Error> {
        let handle = self.manager.create(pane_id, window, bounds, config)?;
        self.handles.insert(pane_id, handle);
        Ok(())
    }

    pub fn get(&self, pane_id: PaneId) -> Option<&WebViewHandle> {
        self.handles.get(&pane_id)
    }

    pub fn get_mut(&mut self, pane_id: PaneId) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(&pane_id)
    }

    /// Destroy a WebView, queueing a `Closed` event for it.
    pub fn destroy(&mut self, pane_id: PaneId) -> bool {
        if self.handles.remove(&pane_id).is_some() {
            debug!(pane_id = %pane_id, "WebView destroyed");
            self.manager.push_event(WebViewEvent::Closed { pane_id });
            true
        } else {
            false
        }
    }

    pub fn active_panes(&self) -> Vec<PaneId> {
        let mut panes: Vec<PaneId> = self.handles.keys().copied().collect();
        panes.sort();
        panes
    }

    /// Drain pending events, keeping tracked URL and title current.
    pub fn drain_events(&mut self) -> Vec<WebViewEvent> {
        let events = self.manager.drain_events();
        for event in &events {
            match event {
                WebViewEvent::PageLoad { pane_id, url, .. } => {
                    if let Some(handle) = self.handles.get_mut(pane_id) {
                        handle.set_url(url.clone());
                    }
                }
                WebViewEvent::TitleChanged { pane_id, title } => {
                    if let Some(handle) = self.handles.get_mut(pane_id) {
                        handle.set_title(title.clone());
                    }
                }
                _ => {}
            }
        }
        events
    }

    /// Destroy all active WebViews. Used during graceful shutdown.
    pub fn destroy_all(&mut self) {
        for pane_id in self.active_panes() {
            self.destroy(pane_id);
        }
    }

    pub fn count(&self) -> usize {
        self.handles.len()
    }
}

impl Default for WebViewRegistry {
    fn default() -> Self {
        Self::new(WebViewManager::new())
    }
}
