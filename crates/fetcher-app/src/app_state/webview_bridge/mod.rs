//! Glue between the hosted WebView and the request bridge.
//!
//! Handles window-to-WebView bounds, IPC dispatch, page lifecycle events
//! and injection of settled bridge calls.

mod bounds;
mod deliveries;
mod ipc_dispatch;
mod lifecycle;
