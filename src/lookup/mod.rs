//! Cache-first lookups against the remote catalog.
//!
//! Each lookup checks its cache, falls back to a single remote request on a
//! miss, and stores the normalized result only when the response is good.
//! Failures are never cached, so the next call for the same key goes back to
//! the network.
//!
//! There is no single-flight: two concurrent misses for the same key both
//! fetch, and both insert. The cache then holds the key twice and lookups
//! return the older entry.

pub mod normalize;

pub use normalize::{DetailRecord, Rating, SearchResult, SearchResultSet};

use crate::cache::FixedCapacityCache;
use crate::omdb::{CatalogFetcher, FetchError};
use crate::utils::{fmt_duration, log_if_slow};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

const SLOW_LOOKUP_THRESHOLD: Duration = Duration::from_secs(3);

/// Result of [`LookupCoordinator::search`].
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Success {
        results: Arc<SearchResultSet>,
        from_cache: bool,
    },
    /// The API answered with success but no `Search` field.
    EmptyResult,
    /// The API reported a failure (`"Response": "False"`).
    ApiError(String),
    /// No usable HTTP response: timeout, non-2xx, or an undecodable body.
    NetworkError(NetworkFailure),
    /// The query was rejected before any cache or network access.
    ValidationError { min_length: usize },
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Why a search never got a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    Timeout,
    Status(u16),
    Other(String),
}

impl From<&FetchError> for NetworkFailure {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Timeout => Self::Timeout,
            FetchError::Status { status, .. } => Self::Status(*status),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Result of [`LookupCoordinator::fetch_details`].
#[derive(Debug, Clone)]
pub enum DetailOutcome {
    Success {
        record: Arc<DetailRecord>,
        from_cache: bool,
    },
    Failure,
}

impl DetailOutcome {
    pub fn record(&self) -> Option<&DetailRecord> {
        match self {
            Self::Success { record, .. } => Some(record),
            Self::Failure => None,
        }
    }
}

/// Capacities of the two caches. They are independent of each other.
#[derive(Debug, Clone, Copy)]
pub struct CacheCapacities {
    pub search: NonZeroUsize,
    pub details: NonZeroUsize,
}

impl Default for CacheCapacities {
    fn default() -> Self {
        Self {
            search: crate::cache::DEFAULT_CAPACITY,
            details: crate::cache::DEFAULT_CAPACITY,
        }
    }
}

/// Owns the search and details caches and the fetcher that fills them.
///
/// Cache locks are held only for the synchronous lookup or insert, never
/// across a request, so the coordinator can be shared through an `Arc`.
pub struct LookupCoordinator<F> {
    fetcher: F,
    search_cache: Mutex<FixedCapacityCache<Arc<SearchResultSet>>>,
    details_cache: Mutex<FixedCapacityCache<Arc<DetailRecord>>>,
}

impl<F: CatalogFetcher> LookupCoordinator<F> {
    pub fn new(fetcher: F, capacities: CacheCapacities) -> Self {
        Self {
            fetcher,
            search_cache: Mutex::new(FixedCapacityCache::new(capacities.search)),
            details_cache: Mutex::new(FixedCapacityCache::new(capacities.details)),
        }
    }

    /// Search titles, serving repeated queries from the cache.
    ///
    /// `query` is used verbatim as the cache key. It must be non-empty and at
    /// least `min_length` characters long.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str, min_length: usize) -> SearchOutcome {
        if query.is_empty() || query.chars().count() < min_length {
            debug!("rejected search input");
            return SearchOutcome::ValidationError { min_length };
        }

        let cached = lock(&self.search_cache).lookup(query).cloned();
        if let Some(results) = cached {
            debug!(results = results.len(), "search cache hit");
            return SearchOutcome::Success {
                results,
                from_cache: true,
            };
        }

        debug!("search cache miss");
        let start = Instant::now();
        let response = self.fetcher.fetch_search(query).await;
        log_if_slow(start, SLOW_LOOKUP_THRESHOLD, "title search");

        let payload = match response {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, duration = fmt_duration(start.elapsed()), "search request failed");
                return SearchOutcome::NetworkError(NetworkFailure::from(&e));
            }
        };

        if !payload.response.is_success() {
            let message = payload.error.unwrap_or_else(|| "Unknown error".to_owned());
            debug!(error = %message, "search rejected by API");
            return SearchOutcome::ApiError(message);
        }

        let Some(items) = payload.search else {
            warn!("search succeeded without a result list, not caching");
            return SearchOutcome::EmptyResult;
        };

        let results = Arc::new(SearchResultSet::from_items(query, items));
        let evicted = lock(&self.search_cache).insert(query, results.clone());
        if let Some(evicted) = evicted {
            debug!(evicted = %evicted, "search cache evicted oldest entry");
        }
        debug!(results = results.len(), "search cached");

        SearchOutcome::Success {
            results,
            from_cache: false,
        }
    }

    /// Extended details for one result, serving repeated ids from the cache.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_details(&self, asset_id: &str) -> DetailOutcome {
        let cached = lock(&self.details_cache).lookup(asset_id).cloned();
        if let Some(record) = cached {
            debug!("details cache hit");
            return DetailOutcome::Success {
                record,
                from_cache: true,
            };
        }

        debug!("details cache miss");
        let start = Instant::now();
        let response = self.fetcher.fetch_details(asset_id).await;
        log_if_slow(start, SLOW_LOOKUP_THRESHOLD, "details lookup");

        let payload = match response {
            Ok(Some(payload)) if payload.response.is_success() => payload,
            Ok(Some(payload)) => {
                debug!(error = ?payload.error, "details rejected by API");
                return DetailOutcome::Failure;
            }
            Ok(None) => {
                warn!("details response was empty");
                return DetailOutcome::Failure;
            }
            Err(e) => {
                warn!(error = %e, duration = fmt_duration(start.elapsed()), "details request failed");
                return DetailOutcome::Failure;
            }
        };

        let record = Arc::new(DetailRecord::from_payload(asset_id, payload));
        let evicted = lock(&self.details_cache).insert(asset_id, record.clone());
        if let Some(evicted) = evicted {
            debug!(evicted = %evicted, "details cache evicted oldest entry");
        }

        DetailOutcome::Success {
            record,
            from_cache: false,
        }
    }

    /// Cached search queries, oldest first.
    pub fn cached_queries(&self) -> Vec<String> {
        lock(&self.search_cache).keys().map(str::to_owned).collect()
    }

    /// Cached detail ids, oldest first.
    pub fn cached_asset_ids(&self) -> Vec<String> {
        lock(&self.details_cache).keys().map(str::to_owned).collect()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

/// Caches hold plain data, so a panic elsewhere cannot leave one half-updated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
