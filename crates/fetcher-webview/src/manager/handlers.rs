use std::sync::Arc;

use fetcher_common::{is_navigation_allowed, PaneId};
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::{push, EventSink, WebViewManager};

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        pid: PaneId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(
                    pane_id = %pid,
                    body_len = body.len(),
                    "IPC message rejected: invalid JSON"
                );
                return;
            }

            debug!(pane_id = %pid, body_len = body.len(), "IPC message from page");
            push(&events, WebViewEvent::IpcMessage { pane_id: pid, body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        pid: PaneId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(pane_id = %pid, ?state, url = %url, "page load");
            push(
                &events,
                WebViewEvent::PageLoad {
                    pane_id: pid,
                    state,
                    url,
                },
            );
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        pid: PaneId,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(pane_id = %pid, title = %title, "title changed");
            push(
                &events,
                WebViewEvent::TitleChanged {
                    pane_id: pid,
                    title,
                },
            );
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        pid: PaneId,
        allowed_prefixes: Arc<[String]>,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&allowed_prefixes, &url) {
                warn!(pane_id = %pid, url = %url, "navigation blocked: URL not in allowlist");
                push(&events, WebViewEvent::NavigationBlocked { pane_id: pid, url });
                return false;
            }

            debug!(pane_id = %pid, url = %url, "navigation allowed");
            push(&events, WebViewEvent::NavigationRequested { pane_id: pid, url });
            true
        })
    }
}
