use fetcher_common::PaneId;
use wry::WebView;

/// Handle to a live WebView. Lives on the event-loop thread.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) pane_id: PaneId,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
    pub(super) current_title: String,
}

impl WebViewHandle {
    pub fn pane_id(&self) -> PaneId {
        self.pane_id
    }

    /// Last URL reported by the page-load and navigation handlers.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Execute JavaScript in the page.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Step back in the page's session history.
    pub fn go_back(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("window.history.back();")
    }

    /// Set the WebView bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Give the page keyboard focus.
    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Open devtools (no-op unless enabled at creation).
    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.current_url = url;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.current_title = title;
    }
}
