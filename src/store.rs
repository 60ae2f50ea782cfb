//! Session cache of fetched indicator data, keyed by country code.
//!
//! A country is fetched at most once per store. Entries are never evicted, and an
//! entry whose indicators partly failed is not re-fetched by [`ComparisonStore::ensure`];
//! [`ComparisonStore::status`] tells the two cases apart.
//!
//! Concurrent `ensure` calls for the same uncached country share one fetch batch: the
//! first caller runs it, later callers block on the same cell until it completes.

use crate::api::DataSource;
use crate::fetcher::Fetcher;
use crate::models::CountrySeries;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

type Slot = Arc<OnceLock<Arc<CountrySeries>>>;

/// Lifecycle of one store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// A fetch batch is in flight.
    Fetching,
    /// Every indicator request succeeded (some may still hold no data).
    Complete,
    /// The listed indicator requests failed; their series are empty.
    Partial { failed: Vec<String> },
}

pub struct ComparisonStore<S> {
    fetcher: Fetcher<S>,
    entries: Mutex<HashMap<String, Slot>>,
}

impl<S: DataSource> ComparisonStore<S> {
    pub fn new(fetcher: Fetcher<S>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, country_code: &str) -> Option<Slot> {
        self.lock().get(&key(country_code)).cloned()
    }

    /// Return the country's series, fetching them first if this store has never seen it.
    pub fn ensure(&self, country_code: &str) -> Arc<CountrySeries> {
        let code = key(country_code);
        // Reserve the slot under the lock; the fetch itself runs unlocked.
        let slot = self.lock().entry(code.clone()).or_default().clone();
        slot.get_or_init(|| Arc::new(self.fetcher.fetch_all(&code)))
            .clone()
    }

    /// Whether a completed fetch is stored for the country.
    pub fn has(&self, country_code: &str) -> bool {
        self.slot(country_code).is_some_and(|s| s.get().is_some())
    }

    /// Stored series without triggering a fetch.
    pub fn get(&self, country_code: &str) -> Option<Arc<CountrySeries>> {
        self.slot(country_code).and_then(|s| s.get().cloned())
    }

    /// `None` if the country was never requested.
    pub fn status(&self, country_code: &str) -> Option<EntryStatus> {
        let slot = self.slot(country_code)?;
        let status = match slot.get() {
            None => EntryStatus::Fetching,
            Some(data) => {
                let failed: Vec<String> = data
                    .failed_indicators()
                    .into_iter()
                    .map(String::from)
                    .collect();
                if failed.is_empty() {
                    EntryStatus::Complete
                } else {
                    EntryStatus::Partial { failed }
                }
            }
        };
        Some(status)
    }

    /// Number of countries with a completed fetch.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|s| s.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key(country_code: &str) -> String {
    country_code.trim().to_ascii_uppercase()
}
