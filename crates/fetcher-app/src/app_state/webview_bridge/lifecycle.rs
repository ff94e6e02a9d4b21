//! WebView lifecycle: create, destroy, sync bounds, poll events.

use fetcher_common::PaneId;
use fetcher_webview::{PageLoadState, WebViewEvent};

use crate::app_state::core::FetcherApp;
use crate::app_state::types::MAIN_PANE;

use super::bounds::{rect_to_wry, window_rect};

// =============================================================================
// WEBVIEW LIFECYCLE
// =============================================================================

impl FetcherApp {
    /// Create the WebView hosting the home page, filling the window.
    pub(in crate::app_state) fn create_main_webview(&mut self) -> bool {
        let config = self.main_webview_config();

        let window = match &self.window {
            Some(w) => w,
            None => {
                tracing::warn!(pane_id = %MAIN_PANE, "Cannot create webview: no window");
                return false;
            }
        };

        let registry = match &mut self.webviews {
            Some(r) => r,
            None => {
                tracing::warn!(pane_id = %MAIN_PANE, "Cannot create webview: registry not initialized");
                return false;
            }
        };

        let bounds = rect_to_wry(&window_rect(window.inner_size(), window.scale_factor()));
        let url = config.url.clone().unwrap_or_default();

        match registry.create(MAIN_PANE, window.as_ref(), bounds, config) {
            Ok(()) => {
                tracing::info!(pane_id = %MAIN_PANE, url = %url, "WebView created for pane");
                self.focus_main_webview();
                true
            }
            Err(e) => {
                tracing::error!(pane_id = %MAIN_PANE, error = %e, "Failed to create webview");
                false
            }
        }
    }

    /// Hand keyboard focus to the page.
    pub(in crate::app_state) fn focus_main_webview(&self) {
        let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(MAIN_PANE)) else {
            return;
        };
        if let Err(e) = handle.focus() {
            tracing::debug!(pane_id = %MAIN_PANE, error = %e, "Failed to focus webview");
        }
    }

    /// Destroy a pane's WebView and drop its in-flight bridge calls.
    pub(in crate::app_state) fn destroy_webview_for_pane(&mut self, pane_id: PaneId) {
        if let Some(ref mut registry) = self.webviews {
            if registry.destroy(pane_id) {
                tracing::info!(pane_id = %pane_id, "WebView destroyed for pane");
            }
        }
        self.bridge.reset_pane(pane_id);
    }

    /// Resize every WebView to fill the window.
    pub(in crate::app_state) fn sync_webview_bounds(&mut self) {
        let window = match &self.window {
            Some(w) => w,
            None => return,
        };
        let registry = match &self.webviews {
            Some(r) => r,
            None => return,
        };

        let bounds = window_rect(window.inner_size(), window.scale_factor());
        for pane_id in registry.active_panes() {
            if let Some(handle) = registry.get(pane_id) {
                if let Err(e) = handle.set_bounds(rect_to_wry(&bounds)) {
                    tracing::warn!(pane_id = %pane_id, error = %e, "Failed to update webview bounds");
                }
            }
        }
    }

    /// Process pending webview events (IPC messages, page loads, etc.).
    pub(in crate::app_state) fn poll_webview_events(&mut self) {
        let events: Vec<WebViewEvent> = match &mut self.webviews {
            Some(registry) => registry.drain_events(),
            None => return,
        };

        for event in events {
            self.handle_webview_event(event);
        }
    }

    pub(in crate::app_state) fn handle_webview_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::PageLoad {
                pane_id,
                state: PageLoadState::Started,
                url,
            } => {
                // the old document and its pending promises are gone
                let dropped = self.bridge.reset_pane(pane_id);
                tracing::debug!(pane_id = %pane_id, url = %url, dropped, "Page load started");
            }
            WebViewEvent::PageLoad {
                pane_id,
                state: PageLoadState::Finished,
                url,
            } => {
                tracing::info!(pane_id = %pane_id, url = %url, "Page loaded");
            }
            WebViewEvent::TitleChanged { pane_id, title } => {
                tracing::debug!(pane_id = %pane_id, title = %title, "Page title changed");
                if pane_id == MAIN_PANE {
                    self.refresh_window_title();
                }
            }
            WebViewEvent::IpcMessage { pane_id, body } => {
                self.handle_ipc_message(pane_id, &body);
            }
            WebViewEvent::NavigationRequested { pane_id, url } => {
                tracing::debug!(pane_id = %pane_id, url = %url, "Navigation");
            }
            WebViewEvent::NavigationBlocked { pane_id, url } => {
                tracing::info!(pane_id = %pane_id, url = %url, "Navigation refused");
            }
            WebViewEvent::Closed { pane_id } => {
                self.bridge.reset_pane(pane_id);
            }
        }
    }

    /// Title the window after the main page's tracked title.
    fn refresh_window_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let page_title = self
            .webviews
            .as_ref()
            .and_then(|r| r.get(MAIN_PANE))
            .map(|handle| handle.current_title())
            .unwrap_or_default();
        window.set_title(&window_title(&self.config.window.title, page_title));
    }
}

/// `"<page title> - <app title>"`, or just the app title for untitled pages.
fn window_title(app_title: &str, page_title: &str) -> String {
    let page_title = page_title.trim();
    if page_title.is_empty() {
        app_title.to_string()
    } else {
        format!("{page_title} - {app_title}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
