//! Tick-indexed TTL associative store for short-lived simulation memory.
//!
//! A [`TtlStore`] maps a subject key to an arbitrary payload together with a
//! time-to-live. Entries past their TTL are never visible to callers and are
//! purged lazily on the next access to that key; a bulk [`TtlStore::purge_expired`]
//! is available for owners that want to reclaim memory eagerly.
//!
//! - **No wall clock**: callers supply the current instant on every operation,
//!   so the store is deterministic and trivially testable
//! - **Zero dependencies**: pure Rust with no external crates

use std::collections::HashMap;
use std::hash::Hash;

/// A single remembered payload with its expiry bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry<P> {
    payload: P,
    stored_at: u64,
    ttl: u64,
}

impl<P> Entry<P> {
    fn is_expired(&self, now: u64) -> bool {
        now >= self.stored_at.saturating_add(self.ttl)
    }
}

/// TTL-keyed associative store.
///
/// `K` is the subject key (typically an entity handle) and `P` the opaque
/// payload (a path cursor, a sighting marker, a strike counter, ...).
///
/// All instants are caller-supplied `u64` values in whatever unit the owner
/// uses for its clock; the store only compares and adds them.
#[derive(Clone, Debug)]
pub struct TtlStore<K, P> {
    entries: HashMap<K, Entry<P>>,
}

// Manual impl: the derive would bound `K` and `P` on `Default`, which
// payloads like path cursors do not implement.
impl<K, P> Default for TtlStore<K, P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, P> TtlStore<K, P> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Stores `payload` under `key` with the given TTL, replacing any previous
    /// entry for that key (expired or not).
    pub fn remember(&mut self, key: K, payload: P, ttl: u64, now: u64) {
        self.entries.insert(
            key,
            Entry {
                payload,
                stored_at: now,
                ttl,
            },
        );
    }

    /// Returns the live payload for `key`, purging it first if its TTL has
    /// elapsed. An expired entry is indistinguishable from an absent one.
    pub fn recall(&mut self, key: &K, now: u64) -> Option<&P> {
        self.purge_if_expired(key, now);
        self.entries.get(key).map(|entry| &entry.payload)
    }

    /// Mutable variant of [`TtlStore::recall`], used by resumable payloads
    /// such as path cursors that advance in place.
    pub fn recall_mut(&mut self, key: &K, now: u64) -> Option<&mut P> {
        self.purge_if_expired(key, now);
        self.entries.get_mut(key).map(|entry| &mut entry.payload)
    }

    /// Restarts the TTL of a live entry from `now`. Returns false if the key
    /// is absent or already expired (in which case it is purged).
    pub fn refresh(&mut self, key: &K, now: u64) -> bool {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stored_at = now;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the payload for `key`, expired or not.
    pub fn forget(&mut self, key: &K) -> Option<P> {
        self.entries.remove(key).map(|entry| entry.payload)
    }

    /// Returns true if a live entry exists for `key`.
    pub fn contains(&mut self, key: &K, now: u64) -> bool {
        self.recall(key, now).is_some()
    }

    /// Drops every entry whose TTL has elapsed.
    pub fn purge_expired(&mut self, now: u64) {
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }

    /// Drops all entries regardless of expiry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including ones that have expired but not yet
    /// been purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_if_expired(&mut self, key: &K, now: u64) {
        if let Some(entry) = self.entries.get(key)
            && entry.is_expired(now)
        {
            self.entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recall_returns_live_entry() {
        let mut store = TtlStore::new();
        store.remember("door", 7u32, 10, 0);
        assert_eq!(store.recall(&"door", 5), Some(&7));
        assert_eq!(store.recall(&"door", 9), Some(&7));
    }

    #[test]
    fn expired_entry_is_invisible_and_purged() {
        let mut store = TtlStore::new();
        store.remember("door", 7u32, 10, 0);
        assert_eq!(store.recall(&"door", 10), None);
        // Lazy purge removed it entirely.
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn refresh_restarts_ttl() {
        let mut store = TtlStore::new();
        store.remember("k", (), 10, 0);
        assert!(store.refresh(&"k", 8));
        assert!(store.contains(&"k", 17));
        assert!(!store.contains(&"k", 18));
    }

    #[test]
    fn refresh_of_expired_entry_fails() {
        let mut store = TtlStore::new();
        store.remember("k", (), 10, 0);
        assert!(!store.refresh(&"k", 10));
        assert!(store.is_empty());
    }

    #[test]
    fn remember_replaces_existing_entry() {
        let mut store = TtlStore::new();
        store.remember("k", 1u32, 10, 0);
        store.remember("k", 2u32, 10, 5);
        assert_eq!(store.recall(&"k", 12), Some(&2));
    }

    #[test]
    fn purge_expired_sweeps_in_bulk() {
        let mut store = TtlStore::new();
        store.remember("a", (), 5, 0);
        store.remember("b", (), 50, 0);
        store.purge_expired(10);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&"b", 10));
    }

    #[test]
    fn recall_mut_allows_in_place_cursor_advance() {
        let mut store = TtlStore::new();
        store.remember("path", vec![1, 2, 3], 100, 0);
        if let Some(path) = store.recall_mut(&"path", 1) {
            path.pop();
        }
        assert_eq!(store.recall(&"path", 2), Some(&vec![1, 2]));
    }

    #[test]
    fn default_requires_no_default_payload() {
        struct Opaque;
        let store: TtlStore<u32, Opaque> = TtlStore::default();
        assert!(store.is_empty());
    }

    #[test]
    fn zero_ttl_is_never_visible() {
        let mut store = TtlStore::new();
        store.remember("k", (), 0, 42);
        assert_eq!(store.recall(&"k", 42), None);
    }
}
