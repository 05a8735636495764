//! Reference catalog: entries, wire decoding, and the fetch-state snapshot.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// One addable coin. Immutable once decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub code: String,
    normalized_id: String,
    normalized_name: String,
    normalized_code: String,
}

impl CatalogEntry {
    #[cfg(test)]
    pub fn new(id: &str, name: &str, code: &str) -> Self {
        Self::from_owned(id.to_string(), name.to_string(), code.to_string())
    }

    pub fn from_owned(id: String, name: String, code: String) -> Self {
        Self {
            normalized_id: id.to_lowercase(),
            normalized_name: name.to_lowercase(),
            normalized_code: code.to_lowercase(),
            id,
            name,
            code,
        }
    }

    pub fn normalized_id(&self) -> &str {
        &self.normalized_id
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    pub fn normalized_code(&self) -> &str {
        &self.normalized_code
    }
}

/// Shape of one element of `GET /coins/list`. Every field is optional on the wire.
#[derive(Debug, Deserialize)]
struct RawCoin {
    id: Option<String>,
    name: Option<String>,
    symbol: Option<String>,
}

/// Decode a catalog payload element by element. Elements that are not objects
/// or that lack a usable id are skipped; missing name/code become "".
pub fn decode_entries(items: Vec<Value>) -> Vec<CatalogEntry> {
    let total = items.len();
    let entries: Vec<CatalogEntry> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawCoin>(item).ok())
        .filter_map(|raw| {
            let id = raw.id.filter(|id| !id.trim().is_empty())?;
            Some(CatalogEntry::from_owned(
                id,
                raw.name.unwrap_or_default(),
                raw.symbol.unwrap_or_default(),
            ))
        })
        .collect();
    let skipped = total - entries.len();
    if skipped > 0 {
        debug!(skipped, "skipped malformed catalog entries");
    }
    entries
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unable to load coin list: {0}")]
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    NotFetched,
    Fetching,
    Ready,
    Failed(CatalogError),
}

/// Last-fetched catalog snapshot plus the state of its fetch.
///
/// Every fetch is tagged with a generation. A response is applied only if no
/// newer response has been applied already, so a slow, superseded fetch can
/// never overwrite a fresher snapshot.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
    status: CatalogStatus,
    entries: Vec<CatalogEntry>,
    issued: u64,
    applied: u64,
    in_flight: usize,
}

impl CatalogIndex {
    /// Called on every interaction with the add-search control. Returns the
    /// generation to fetch with when a fetch should start: the first time, and
    /// again after a failure. A ready catalog is kept for the session.
    pub fn request(&mut self) -> Option<u64> {
        match self.status {
            CatalogStatus::NotFetched | CatalogStatus::Failed(_) => Some(self.begin()),
            CatalogStatus::Fetching | CatalogStatus::Ready => None,
        }
    }

    /// Start a fetch unconditionally (used for explicit reloads).
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        if self.status != CatalogStatus::Ready {
            self.status = CatalogStatus::Fetching;
        }
        info!(generation = self.issued, "catalog fetch started");
        self.issued
    }

    /// Apply the outcome of fetch `generation`. Returns true when the snapshot
    /// or status changed.
    pub fn complete(&mut self, generation: u64, outcome: Result<Vec<CatalogEntry>, CatalogError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if generation < self.applied || generation > self.issued {
            warn!(generation, applied = self.applied, "dropping superseded catalog response");
            return false;
        }
        match outcome {
            Ok(entries) => {
                info!(generation, count = entries.len(), "catalog ready");
                self.applied = generation;
                self.entries = entries;
                self.status = CatalogStatus::Ready;
                true
            }
            Err(error) => {
                warn!(generation, %error, "catalog fetch failed");
                if self.status == CatalogStatus::Ready {
                    // Keep serving the snapshot we already have.
                    return false;
                }
                if self.in_flight > 0 {
                    return false;
                }
                self.status = CatalogStatus::Failed(error);
                true
            }
        }
    }

    /// Entries to rank against. Empty while not fetched, fetching, or failed.
    pub fn entries(&self) -> &[CatalogEntry] {
        match self.status {
            CatalogStatus::Ready => &self.entries,
            _ => &[],
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Fetching
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match &self.status {
            CatalogStatus::Failed(error) => Some(error),
            _ => None,
        }
    }
}
