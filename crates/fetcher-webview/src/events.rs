//! WebView event types.

use fetcher_common::PaneId;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started; the previous document is going away.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a WebView instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebViewEvent {
    PageLoad {
        pane_id: PaneId,
        state: PageLoadState,
        url: String,
    },
    TitleChanged {
        pane_id: PaneId,
        title: String,
    },
    /// A JSON message posted by the page.
    IpcMessage {
        pane_id: PaneId,
        body: String,
    },
    /// A navigation passed the allow-list.
    NavigationRequested {
        pane_id: PaneId,
        url: String,
    },
    /// A navigation was refused by the allow-list.
    NavigationBlocked {
        pane_id: PaneId,
        url: String,
    },
    Closed {
        pane_id: PaneId,
    },
}

impl WebViewEvent {
    pub fn pane_id(&self) -> PaneId {
        match self {
            Self::PageLoad { pane_id, .. }
            | Self::TitleChanged { pane_id, .. }
            | Self::IpcMessage { pane_id, .. }
            | Self::NavigationRequested { pane_id, .. }
            | Self::NavigationBlocked { pane_id, .. }
            | Self::Closed { pane_id } => *pane_id,
        }
    }
}
