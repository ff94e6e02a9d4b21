//! FetcherApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use fetcher_bridge::FetchBridge;
use fetcher_config::FetcherConfig;
use fetcher_webview::WebViewRegistry;

/// Top-level application state.
pub struct FetcherApp {
    pub(super) config: FetcherConfig,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Hosted page
    pub(super) webviews: Option<WebViewRegistry>,

    // Request bridge and the runtime its tasks run on
    pub(super) bridge: FetchBridge,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Modifier tracking (winit sends these separately)
    pub(super) modifiers: winit::keyboard::ModifiersState,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl FetcherApp {
    pub fn new(
        config: FetcherConfig,
        runtime: tokio::runtime::Runtime,
        bridge: FetchBridge,
    ) -> Self {
        Self {
            config,
            window: None,
            webviews: None,
            bridge,
            tokio_runtime: Some(runtime),
            modifiers: winit::keyboard::ModifiersState::empty(),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
