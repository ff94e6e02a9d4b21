//! Cross-context request bridge.
//!
//! Lets a hosted page issue HTTP requests through a native client that
//! carries a persistent cookie jar, sidestepping the engine's CORS and
//! third-party-cookie rules:
//! - The page calls `window.Fetcher(url, options)`, which registers a
//!   callback token and posts `{url, options, callbackId}` over IPC
//! - [`FetchBridge::fetch`] validates the descriptor and runs the request
//!   on a tokio worker
//! - Outcomes come back over a channel as [`Delivery`] values that the UI
//!   thread turns into `window.callback(id, "resolve" | "reject", value)`
//!   scripts

pub mod bridge;
pub mod callback;
pub mod cookie;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod form;
pub mod pending;
pub mod script;
pub mod settlement;

pub use bridge::{Delivery, FetchBridge};
pub use callback::CallbackId;
pub use cookie::{PersistentCookieJar, StoredCookie};
pub use descriptor::{FetchCall, FetchOptions, RequestDescriptor};
pub use error::{BridgeError, CookieError};
pub use executor::HttpExecutor;
pub use pending::PendingTable;
pub use script::init_script;
pub use settlement::{Rejection, Settlement};
