//! Window creation and WebView setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use fetcher_webview::{WebViewConfig, WebViewManager, WebViewRegistry};

use super::core::FetcherApp;

// =============================================================================
// INITIALIZATION
// =============================================================================

impl FetcherApp {
    /// Create the window and the WebView registry.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        self.webviews = Some(WebViewRegistry::new(WebViewManager::new()));
        self.window = Some(window);
        tracing::info!("Window created");
        true
    }

    /// WebView settings for the hosted page: home URL, bridge script,
    /// navigation allow-list.
    pub(super) fn main_webview_config(&self) -> WebViewConfig {
        let bridge = &self.config.bridge;
        let mut config = WebViewConfig::with_url(&self.config.page.home_url).init_script(
            fetcher_bridge::init_script(&bridge.object_name, &bridge.callback_fn),
        );
        config.devtools = self.config.page.devtools;
        config.user_agent = self.config.page.user_agent.clone();
        config.allowed_prefixes = self.config.navigation.allowed_prefixes.clone();
        config
    }
}

// =============================================================================
// TESTS
// =============================================================================
