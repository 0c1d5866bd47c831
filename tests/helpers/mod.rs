//! Shared fixtures: a scripted in-memory catalog and payload builders.

#![allow(dead_code)]

use instant_search::lookup::{CacheCapacities, LookupCoordinator};
use instant_search::omdb::{
    ApiStatus, CatalogFetcher, DetailsPayload, FetchError, RatingItem, SearchItem, SearchPayload,
};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// A fetcher that replays queued responses in order and records every call.
///
/// Panics when called with nothing queued, so an unexpected network call
/// fails the test.
pub struct ScriptedFetcher {
    search_responses: Mutex<VecDeque<Result<SearchPayload, FetchError>>>,
    details_responses: Mutex<VecDeque<Result<Option<DetailsPayload>, FetchError>>>,
    search_calls: Mutex<Vec<String>>,
    details_calls: Mutex<Vec<String>>,
    gate: Semaphore,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_gate(Semaphore::MAX_PERMITS))
    }

    /// Every fetch blocks until [`ScriptedFetcher::open_gate`] releases it.
    pub fn gated() -> Arc<Self> {
        Arc::new(Self::with_gate(0))
    }

    fn with_gate(permits: usize) -> Self {
        Self {
            search_responses: Mutex::default(),
            details_responses: Mutex::default(),
            search_calls: Mutex::default(),
            details_calls: Mutex::default(),
            gate: Semaphore::new(permits),
        }
    }

    pub fn push_search(&self, response: Result<SearchPayload, FetchError>) {
        self.search_responses.lock().unwrap().push_back(response);
    }

    pub fn push_details(&self, response: Result<Option<DetailsPayload>, FetchError>) {
        self.details_responses.lock().unwrap().push_back(response);
    }

    pub fn open_gate(&self, permits: usize) {
        self.gate.add_permits(permits);
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn details_calls(&self) -> Vec<String> {
        self.details_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogFetcher for ScriptedFetcher {
    async fn fetch_search(&self, query: &str) -> Result<SearchPayload, FetchError> {
        self.search_calls.lock().unwrap().push(query.to_owned());
        let _permit = self.gate.acquire().await.expect("gate closed");
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected search fetch for {query:?}"))
    }

    async fn fetch_details(&self, asset_id: &str) -> Result<Option<DetailsPayload>, FetchError> {
        self.details_calls.lock().unwrap().push(asset_id.to_owned());
        let _permit = self.gate.acquire().await.expect("gate closed");
        self.details_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected details fetch for {asset_id:?}"))
    }
}

pub fn coordinator(
    fetcher: &Arc<ScriptedFetcher>,
    search: usize,
    details: usize,
) -> LookupCoordinator<Arc<ScriptedFetcher>> {
    LookupCoordinator::new(
        fetcher.clone(),
        CacheCapacities {
            search: NonZeroUsize::new(search).unwrap(),
            details: NonZeroUsize::new(details).unwrap(),
        },
    )
}

pub fn item(id: &str, title: &str, kind: &str, poster: &str) -> SearchItem {
    SearchItem {
        imdb_id: id.to_owned(),
        title: Some(title.to_owned()),
        year: None,
        kind: Some(kind.to_owned()),
        poster: Some(poster.to_owned()),
    }
}

pub fn search_ok(items: Vec<SearchItem>) -> SearchPayload {
    SearchPayload {
        response: ApiStatus::SUCCESS,
        total_results: Some(items.len().to_string()),
        search: Some(items),
        error: None,
    }
}

pub fn search_failed(message: &str) -> SearchPayload {
    SearchPayload {
        response: ApiStatus::FAILURE,
        search: None,
        error: Some(message.to_owned()),
        total_results: None,
    }
}

/// A "successful" response with no `Search` field at all.
pub fn search_without_results() -> SearchPayload {
    SearchPayload {
        response: ApiStatus::SUCCESS,
        ..Default::default()
    }
}

pub fn details_ok(title: &str, director: &str, ratings: &[(&str, &str)]) -> DetailsPayload {
    DetailsPayload {
        response: ApiStatus::SUCCESS,
        title: Some(title.to_owned()),
        year: Some("1989".to_owned()),
        director: Some(director.to_owned()),
        ratings: Some(
            ratings
                .iter()
                .map(|(source, value)| RatingItem {
                    source: (*source).to_owned(),
                    value: (*value).to_owned(),
                })
                .collect(),
        ),
        error: None,
    }
}

pub fn details_failed(message: &str) -> DetailsPayload {
    DetailsPayload {
        response: ApiStatus::FAILURE,
        error: Some(message.to_owned()),
        ..Default::default()
    }
}
