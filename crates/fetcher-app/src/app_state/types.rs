//! Internal types and constants for the app state module.

use std::time::Duration;

use fetcher_common::PaneId;

/// How often to poll for events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// The single page hosted by the window.
pub(super) const MAIN_PANE: PaneId = PaneId(1);

/// How long shutdown waits for in-flight runtime tasks.
pub(super) const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
