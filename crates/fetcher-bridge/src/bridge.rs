//! Native entry point: accepts calls from the page and hands back settlements.

use std::time::Duration;

use fetcher_common::PaneId;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::callback::CallbackId;
use crate::cookie::PersistentCookieJar;
use crate::descriptor::{FetchCall, RequestDescriptor};
use crate::error::BridgeError;
use crate::executor::HttpExecutor;
use crate::pending::{Generation, PendingTable};
use crate::settlement::Settlement;

/// How often a file-backed cookie jar is written out while calls run.
pub const COOKIE_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// A settled call, ready to be injected into the page that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub pane_id: PaneId,
    pub callback_id: CallbackId,
    pub settlement: Settlement,
    generation: Generation,
}

impl Delivery {
    pub fn to_script(&self, callback_fn: &str) -> String {
        self.settlement.to_script(callback_fn, &self.callback_id)
    }
}

/// Runs page-issued requests on the tokio runtime and queues their outcomes.
///
/// Lives on the UI thread. Requests run on worker tasks and report back
/// over a channel; [`FetchBridge::poll_deliveries`] only yields outcomes
/// whose registration is still pending, so each token settles exactly once
/// and work belonging to a page that has since navigated is dropped, even
/// when the new page reuses the token.
pub struct FetchBridge {
    executor: HttpExecutor,
    runtime: Handle,
    pending: PendingTable<AbortHandle>,
    tx: mpsc::UnboundedSender<Delivery>,
    rx: mpsc::UnboundedReceiver<Delivery>,
    cookie_flusher: Option<AbortHandle>,
}

impl FetchBridge {
    pub fn new(executor: HttpExecutor, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let jar = executor.jar();
        let cookie_flusher = jar.path().is_some().then(|| {
            PersistentCookieJar::spawn_flusher(jar.clone(), &runtime, COOKIE_FLUSH_INTERVAL)
                .abort_handle()
        });
        Self {
            executor,
            runtime,
            pending: PendingTable::new(),
            tx,
            rx,
            cookie_flusher,
        }
    }

    pub fn executor(&self) -> &HttpExecutor {
        &self.executor
    }

    /// Start a call. Returns as soon as the work is scheduled.
    ///
    /// A descriptor that fails validation still settles, as a `{400, msg}`
    /// rejection delivered like any other outcome. An unusable callback id
    /// or one already in flight for this page is refused with an error and
    /// nothing is delivered for it.
    pub fn fetch(
        &mut self,
        pane: PaneId,
        url: &str,
        json_options: &str,
        callback_id: &str,
    ) -> Result<(), BridgeError> {
        let callback_id = CallbackId::parse(callback_id)?;
        let descriptor = RequestDescriptor::parse(url, json_options);
        if let Err(e) = &descriptor {
            debug!(%pane, %callback_id, error = %e, "rejecting malformed bridge call");
        }
        self.schedule(pane, callback_id, descriptor)
    }

    /// Settle `callback_id` with a `{400, msg}` rejection without making a
    /// request. Used when an IPC payload is too broken to describe one.
    pub fn reject(
        &mut self,
        pane: PaneId,
        callback_id: &str,
        error: BridgeError,
    ) -> Result<(), BridgeError> {
        let callback_id = CallbackId::parse(callback_id)?;
        self.schedule(pane, callback_id, Err(error))
    }

    /// [`FetchBridge::fetch`] for a decoded IPC payload.
    pub fn dispatch(&mut self, pane: PaneId, call: FetchCall) -> Result<(), BridgeError> {
        self.fetch(pane, &call.url, &call.options, &call.callback_id)
    }

    /// Drain every outcome that is ready without blocking.
    pub fn poll_deliveries(&mut self) -> Vec<Delivery> {
        let mut ready = Vec::new();
        while let Ok(delivery) = self.rx.try_recv() {
            if self.accept(&delivery) {
                ready.push(delivery);
            }
        }
        ready
    }

    /// Wait for the next outcome whose token is still pending.
    ///
    /// Returns `None` only if the channel closes, which cannot happen while
    /// `self` holds a sender.
    pub async fn next_delivery(&mut self) -> Option<Delivery> {
        loop {
            let delivery = self.rx.recv().await?;
            if self.accept(&delivery) {
                return Some(delivery);
            }
        }
    }

    /// Abort and forget every in-flight call of a page. Returns how many
    /// were dropped.
    pub fn reset_pane(&mut self, pane: PaneId) -> usize {
        let aborted = self.pending.clear_pane(pane);
        for handle in &aborted {
            handle.abort();
        }
        if !aborted.is_empty() {
            debug!(%pane, count = aborted.len(), "dropped in-flight bridge calls");
        }
        aborted.len()
    }

    /// Abort all in-flight calls and stop background cookie writes. The
    /// owner saves the jar afterwards.
    pub fn shutdown(&mut self) {
        if let Some(flusher) = self.cookie_flusher.take() {
            flusher.abort();
        }
        let aborted = self.pending.drain();
        for handle in &aborted {
            handle.abort();
        }
        if !aborted.is_empty() {
            warn!(count = aborted.len(), "aborted in-flight bridge calls on shutdown");
        }
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn outstanding_for(&self, pane: PaneId) -> usize {
        self.pending.len_for(pane)
    }

    fn schedule(
        &mut self,
        pane: PaneId,
        callback_id: CallbackId,
        descriptor: Result<RequestDescriptor, BridgeError>,
    ) -> Result<(), BridgeError> {
        let executor = self.executor.clone();
        let tx = self.tx.clone();
        let runtime = self.runtime.clone();
        let task_id = callback_id.clone();
        self.pending.register(pane, callback_id, move |generation| {
            let task = runtime.spawn(async move {
                let settlement = match descriptor {
                    Ok(d) => executor.execute(&d).await,
                    Err(e) => Settlement::from(e),
                };
                let delivery = Delivery {
                    pane_id: pane,
                    callback_id: task_id,
                    settlement,
                    generation,
                };
                if tx.send(delivery).is_err() {
                    debug!(%pane, "bridge dropped before delivery");
                }
            });
            task.abort_handle()
        })?;
        Ok(())
    }

    fn accept(&mut self, delivery: &Delivery) -> bool {
        self.pending
            .settle(delivery.pane_id, &delivery.callback_id, delivery.generation)
            .is_some()
    }
}
