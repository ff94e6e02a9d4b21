//! Configuration schema types for Fetcher.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod page;
mod system;
mod window;

pub use bridge::*;
pub use page::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct FetcherConfig {
    pub page: PageConfig,
    pub bridge: BridgeConfig,
    pub navigation: NavigationConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}
