//! WebView hosting for the fetcher shell.
//!
//! Wraps the `wry` crate to provide:
//! - Managed WebView instances keyed by pane
//! - Page-to-host IPC (`window.ipc.postMessage`) and host-to-page script
//! - Navigation control with a URL prefix allow-list
//! - Event delivery (page load, title change, navigation) to the app loop

pub mod events;
pub mod ipc;
pub mod manager;

pub use events::{PageLoadState, WebViewEvent};
pub use ipc::{IpcError, IpcMessage};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry};
