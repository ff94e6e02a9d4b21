pub mod errors;
pub mod navigation;
pub mod types;

pub use errors::{ConfigError, FetcherError};
pub use navigation::is_navigation_allowed;
pub use types::{PaneId, Rect};

pub type Result<T> = std::result::Result<T, FetcherError>;
