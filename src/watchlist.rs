//! Persisted, ordered, de-duplicated set of tracked coin ids.

use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{KvStore, StorageError};

/// Storage key the serialized id list lives under.
pub const WATCHLIST_KEY: &str = "watchlist";

/// Seed used when nothing usable is stored.
pub const DEFAULT_WATCHLIST: [&str; 5] = ["bitcoin", "ethereum", "ripple", "litecoin", "cardano"];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WatchlistError {
    #[error("Already in watchlist")]
    AlreadyPresent(String),
    #[error("coin id must not be empty")]
    EmptyId,
}

pub struct WatchlistStore<S> {
    store: S,
    ids: Vec<String>,
    loaded: bool,
    storage_error: Option<StorageError>,
}

impl<S: KvStore> WatchlistStore<S> {
    pub fn new(store: S) -> Self {
        Self { store, ids: Vec::new(), loaded: false, storage_error: None }
    }

    /// Read the persisted ids. Absent, unreadable, or empty data falls back to
    /// [`DEFAULT_WATCHLIST`], which is written back immediately. Only the first
    /// call touches storage.
    pub fn load(&mut self) -> &[String] {
        if self.loaded {
            return &self.ids;
        }
        self.loaded = true;

        match self.read_persisted() {
            Some(ids) => {
                info!(count = ids.len(), "watchlist loaded");
                self.ids = ids;
            }
            None => {
                info!("seeding default watchlist");
                self.ids = DEFAULT_WATCHLIST.iter().map(|id| id.to_string()).collect();
                self.persist();
            }
        }
        &self.ids
    }

    fn read_persisted(&self) -> Option<Vec<String>> {
        let raw = match self.store.get_raw(WATCHLIST_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "watchlist read failed; using defaults");
                return None;
            }
        };
        let parsed: Vec<String> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "stored watchlist is not a list of ids; using defaults");
                return None;
            }
        };

        let mut ids: Vec<String> = Vec::with_capacity(parsed.len());
        for id in parsed {
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            None
        } else {
            Some(ids)
        }
    }

    /// Append `id`. Duplicates are rejected without touching state or storage.
    pub fn insert(&mut self, id: &str) -> Result<(), WatchlistError> {
        if id.is_empty() {
            return Err(WatchlistError::EmptyId);
        }
        if self.contains(id) {
            return Err(WatchlistError::AlreadyPresent(id.to_string()));
        }
        self.ids.push(id.to_string());
        info!(id, "added to watchlist");
        self.persist();
        Ok(())
    }

    /// Remove `id` if present; order of the rest is kept. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() == before {
            return;
        }
        info!(id, "removed from watchlist");
        self.persist();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Last persistence failure, if any, cleared on read.
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let result = if self.ids.is_empty() {
            self.store.delete_raw(WATCHLIST_KEY)
        } else {
            match serde_json::to_string(&self.ids) {
                Ok(body) => self.store.set_raw(WATCHLIST_KEY, &body),
                Err(error) => {
                    warn!(%error, "failed to serialize watchlist");
                    return;
                }
            }
        };
        if let Err(error) = result {
            warn!(%error, "failed to persist watchlist");
            self.storage_error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};

    fn stored(store: &MemoryStore) -> Option<Vec<String>> {
        store
            .get_raw(WATCHLIST_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn seeded(ids: &[&str]) -> WatchlistStore<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set_raw(WATCHLIST_KEY, &serde_json::to_string(ids).unwrap()).unwrap();
        let mut watchlist = WatchlistStore::new(store);
        watchlist.load();
        watchlist
    }

    #[test]
    fn first_load_seeds_defaults_and_persists() {
        let mut watchlist = WatchlistStore::new(MemoryStore::new());
        let ids = watchlist.load().to_vec();
        assert_eq!(ids, DEFAULT_WATCHLIST.to_vec());
        assert_eq!(stored(watchlist.store()), Some(ids));
    }

    #[test]
    fn empty_or_garbage_storage_falls_back_to_defaults() {
        for raw in ["[]", "{\"a\":1}", "not json", "[\"\"]"] {
            let mut store = MemoryStore::new();
            store.set_raw(WATCHLIST_KEY, raw).unwrap();
            let mut watchlist = WatchlistStore::new(store);
            assert_eq!(watchlist.load(), DEFAULT_WATCHLIST.map(String::from).as_slice());
        }
    }

    #[test]
    fn load_keeps_stored_order_and_drops_duplicates() {
        let watchlist = seeded(&["solana", "bitcoin", "solana", ""]);
        assert_eq!(watchlist.ids(), ["solana", "bitcoin"]);
    }

    #[test]
    fn load_touches_storage_once() {
        let mut watchlist = seeded(&["solana"]);
        watchlist.remove("solana");
        assert!(watchlist.load().is_empty());
    }

    #[test]
    fn insert_appends_and_persists() {
        let mut watchlist = seeded(&["bitcoin"]);
        watchlist.insert("dogecoin").unwrap();
        assert_eq!(watchlist.ids(), ["bitcoin", "dogecoin"]);
        assert_eq!(stored(watchlist.store()), Some(vec!["bitcoin".into(), "dogecoin".into()]));
    }

    #[test]
    fn duplicate_insert_is_rejected_without_change() {
        let mut watchlist = seeded(&["bitcoin"]);
        watchlist.insert("dogecoin").unwrap();
        let err = watchlist.insert("dogecoin").unwrap_err();
        assert_eq!(err, WatchlistError::AlreadyPresent("dogecoin".into()));
        assert_eq!(err.to_string(), "Already in watchlist");
        assert_eq!(watchlist.len(), 2);
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut watchlist = seeded(&["bitcoin"]);
        assert_eq!(watchlist.insert(""), Err(WatchlistError::EmptyId));
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn remove_keeps_order_and_ignores_absent() {
        let mut watchlist = seeded(&["a", "b", "c"]);
        watchlist.remove("b");
        assert_eq!(watchlist.ids(), ["a", "c"]);
        watchlist.remove("zzz");
        assert_eq!(watchlist.ids(), ["a", "c"]);
        assert_eq!(stored(watchlist.store()), Some(vec!["a".into(), "c".into()]));
    }

    #[test]
    fn removing_last_entry_clears_key() {
        let mut watchlist = seeded(&["bitcoin"]);
        watchlist.remove("bitcoin");
        assert!(watchlist.is_empty());
        assert_eq!(stored(watchlist.store()), None);
    }

    #[test]
    fn round_trip_through_storage() {
        let mut watchlist = seeded(&["bitcoin", "ethereum"]);
        watchlist.insert("solana").unwrap();
        watchlist.remove("bitcoin");
        watchlist.insert("bitcoin").unwrap();
        let expected = watchlist.ids().to_vec();

        let mut reloaded = WatchlistStore::new(watchlist.into_store());
        assert_eq!(reloaded.load(), expected.as_slice());
        assert_eq!(expected, ["ethereum", "solana", "bitcoin"]);
    }

    #[test]
    fn round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut first = WatchlistStore::new(FileStore::new(&path));
        first.load();
        first.remove("ripple");
        first.insert("dogecoin").unwrap();
        let expected = first.ids().to_vec();

        let mut second = WatchlistStore::new(FileStore::new(&path));
        assert_eq!(second.load(), expected.as_slice());
    }

    #[test]
    fn write_failure_is_reported_and_memory_state_kept() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("store.json");
        std::fs::create_dir_all(&path).unwrap();

        let mut watchlist = WatchlistStore::new(FileStore::new(&path));
        watchlist.load();
        assert!(watchlist.take_storage_error().is_some());
        watchlist.insert("dogecoin").unwrap();
        assert!(watchlist.contains("dogecoin"));
        assert!(watchlist.take_storage_error().is_some());
        assert!(watchlist.take_storage_error().is_none());
    }
}
