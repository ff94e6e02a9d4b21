mod app_state;
mod cli;

use std::sync::Arc;

use fetcher_bridge::{FetchBridge, HttpExecutor, PersistentCookieJar};
use fetcher_common::FetcherError;
use fetcher_config::FetcherConfig;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

/// Open the configured namespace's cookie jar, falling back to memory if
/// no data directory is available.
fn open_cookie_jar(config: &FetcherConfig) -> PersistentCookieJar {
    match fetcher_config::paths::cookie_file(&config.bridge.cookie_namespace) {
        Ok(path) => PersistentCookieJar::open(path),
        Err(e) => {
            tracing::warn!("No cookie storage location, cookies will not persist: {e}");
            PersistentCookieJar::in_memory()
        }
    }
}

/// Build the bridge and drive the event loop until the window closes.
fn run(config: FetcherConfig) -> fetcher_common::Result<()> {
    // Bridge runtime: request tasks run here, results are polled from the UI thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("fetcher-bridge")
        .enable_all()
        .build()?;

    let jar = Arc::new(open_cookie_jar(&config));
    let executor = HttpExecutor::new(jar, config.page.user_agent.as_deref())
        .map_err(|e| FetcherError::Bridge(e.to_string()))?;
    let bridge = FetchBridge::new(executor, runtime.handle().clone());

    let event_loop = EventLoop::new().map_err(|e| FetcherError::Window(e.to_string()))?;
    let mut app = app_state::FetcherApp::new(config, runtime, bridge);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| FetcherError::Window(format!("event loop error: {e}")))
}

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Load config before logging so the configured level applies; report
    // problems once the subscriber is up.
    let mut config_problems = Vec::new();
    let mut config = fetcher_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        config_problems.push(format!("Config load failed, using defaults: {e}"));
        FetcherConfig::default()
    });
    if let Err(e) = args.apply_overrides(&mut config) {
        config_problems.push(format!("Ignoring --url override: {e}"));
    }

    // Initialize logging
    let log_directive = args.log_directive(&config);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "fetcher=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Fetcher v{} starting...", env!("CARGO_PKG_VERSION"));
    for problem in &config_problems {
        tracing::warn!("{problem}");
    }
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    tracing::info!(home_url = %config.page.home_url, "Config loaded");

    // Ensure platform directories exist
    if let Err(e) = fetcher_config::paths::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    if let Err(e) = run(config) {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
