//! Native-side table of outstanding callback tokens.
//!
//! Mirrors the page's id → continuation map so the host can guarantee that
//! every token is settled at most once, and can drop a page's in-flight
//! work when it navigates away or is torn down.

use std::collections::HashMap;

use fetcher_common::PaneId;
use tracing::debug;

use crate::callback::CallbackId;
use crate::error::BridgeError;

type PendingKey = (PaneId, CallbackId);

/// Identifies one registration of a token. A page may reuse a token once
/// its earlier call was dropped, so the key alone cannot tell a late
/// outcome from the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generation(u64);

struct Entry<T> {
    generation: Generation,
    value: T,
}

/// Outstanding calls keyed by page and token.
///
/// `T` is whatever the owner needs to cancel the call (an `AbortHandle`
/// for [`crate::FetchBridge`]).
pub struct PendingTable<T> {
    entries: HashMap<PendingKey, Entry<T>>,
    next_generation: u64,
}

impl<T> PendingTable<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Register a new outstanding call. `make` receives the generation
    /// assigned to this registration and is only invoked once the token is
    /// accepted. A token still in flight for the same page is refused and
    /// the existing entry is left intact.
    pub fn register(
        &mut self,
        pane: PaneId,
        id: CallbackId,
        make: impl FnOnce(Generation) -> T,
    ) -> Result<Generation, BridgeError> {
        let key = (pane, id);
        if self.entries.contains_key(&key) {
            return Err(BridgeError::DuplicateCallback(key.1.to_string()));
        }
        self.next_generation += 1;
        let generation = Generation(self.next_generation);
        let value = make(generation);
        self.entries.insert(key, Entry { generation, value });
        Ok(generation)
    }

    pub fn contains(&self, pane: PaneId, id: &CallbackId) -> bool {
        self.entries.contains_key(&(pane, id.clone()))
    }

    /// Consume the entry for a token if it is still the registration
    /// `generation` refers to. Unknown, already-settled and superseded
    /// tokens return `None` and leave the table untouched.
    pub fn settle(&mut self, pane: PaneId, id: &CallbackId, generation: Generation) -> Option<T> {
        let key = (pane, id.clone());
        match self.entries.get(&key) {
            Some(entry) if entry.generation == generation => {
                self.entries.remove(&key).map(|entry| entry.value)
            }
            Some(_) => {
                debug!(%pane, callback_id = %id, "stale outcome for reused callback id ignored");
                None
            }
            None => {
                debug!(%pane, callback_id = %id, "settle for unknown callback id ignored");
                None
            }
        }
    }

    /// Forget every outstanding call of a page, returning their values.
    pub fn clear_pane(&mut self, pane: PaneId) -> Vec<T> {
        let keys: Vec<PendingKey> = self
            .entries
            .keys()
            .filter(|(p, _)| *p == pane)
            .cloned()
            .collect();
        keys.into_iter()
            .filter_map(|key| self.entries.remove(&key))
            .map(|entry| entry.value)
            .collect()
    }

    /// Forget everything.
    pub fn drain(&mut self) -> Vec<T> {
        self.entries.drain().map(|(_, entry)| entry.value).collect()
    }

    pub fn len_for(&self, pane: PaneId) -> usize {
        self.entries.keys().filter(|(p, _)| *p == pane).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for PendingTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CallbackId {
        CallbackId::parse(s).unwrap()
    }

    #[test]
    fn settle_is_exactly_once() {
        let mut table = PendingTable::new();
        let generation = table.register(PaneId(1), id("tok1"), |_| 7u32).unwrap();

        assert_eq!(table.settle(PaneId(1), &id("tok1"), generation), Some(7));
        assert_eq!(table.settle(PaneId(1), &id("tok1"), generation), None);
        assert!(table.is_empty());
    }

    #[test]
    fn unknown_token_is_noop() {
        let mut table: PendingTable<()> = PendingTable::new();
        assert_eq!(table.settle(PaneId(1), &id("never"), Generation(1)), None);
    }

    #[test]
    fn make_sees_assigned_generation() {
        let mut table = PendingTable::new();
        let generation = table.register(PaneId(1), id("tok1"), |g| g).unwrap();
        assert_eq!(table.settle(PaneId(1), &id("tok1"), generation), Some(generation));
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut table = PendingTable::new();
        let first = table.register(PaneId(1), id("tok1"), |_| "first").unwrap();
        let mut called = false;
        let err = table
            .register(PaneId(1), id("tok1"), |_| {
                called = true;
                "second"
            })
            .unwrap_err();
        assert!(matches!(err, BridgeError::DuplicateCallback(t) if t == "tok1"));
        assert!(!called);
        assert_eq!(table.settle(PaneId(1), &id("tok1"), first), Some("first"));
    }

    #[test]
    fn reused_token_ignores_earlier_generation() {
        let mut table = PendingTable::new();
        let old = table.register(PaneId(1), id("tok1"), |_| "old").unwrap();
        assert_eq!(table.clear_pane(PaneId(1)), vec!["old"]);

        let new = table.register(PaneId(1), id("tok1"), |_| "new").unwrap();
        assert_ne!(old, new);
        assert_eq!(table.settle(PaneId(1), &id("tok1"), old), None);
        assert!(table.contains(PaneId(1), &id("tok1")));
        assert_eq!(table.settle(PaneId(1), &id("tok1"), new), Some("new"));
    }

    #[test]
    fn same_token_on_different_panes_is_independent() {
        let mut table = PendingTable::new();
        table.register(PaneId(1), id("tok1"), |_| 1).unwrap();
        let second = table.register(PaneId(2), id("tok1"), |_| 2).unwrap();
        assert_eq!(table.settle(PaneId(2), &id("tok1"), second), Some(2));
        assert!(table.contains(PaneId(1), &id("tok1")));
    }

    #[test]
    fn clear_pane_only_touches_that_pane() {
        let mut table = PendingTable::new();
        let a = table.register(PaneId(1), id("a"), |_| 1).unwrap();
        table.register(PaneId(1), id("b"), |_| 2).unwrap();
        table.register(PaneId(2), id("c"), |_| 3).unwrap();

        let mut cleared = table.clear_pane(PaneId(1));
        cleared.sort();
        assert_eq!(cleared, vec![1, 2]);
        assert_eq!(table.len_for(PaneId(1)), 0);
        assert_eq!(table.len_for(PaneId(2)), 1);
        assert_eq!(table.settle(PaneId(1), &id("a"), a), None);
    }

    #[test]
    fn drain_empties_table() {
        let mut table = PendingTable::new();
        table.register(PaneId(1), id("a"), |_| 1).unwrap();
        table.register(PaneId(3), id("b"), |_| 2).unwrap();
        assert_eq!(table.drain().len(), 2);
        assert_eq!(table.len(), 0);
    }
}
