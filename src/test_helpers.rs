use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::outcome::{FailureKind, ProviderOutcome};
use crate::domain::query::SearchQuery;
use crate::domain::raw::{AggregatorHotel, LenientId, LenientNumber, RawStay, UpstreamHotel};
use crate::domain::record::{InventoryRecord, Price, SourceKind};
use crate::domain::response::SearchResponse;
use crate::error::Result;
use crate::ports::hotel_search::HotelSearch;
use crate::ports::inventory_provider::InventoryProvider;

type OutcomeFn = Box<dyn Fn(&SearchQuery) -> ProviderOutcome + Send + Sync>;
type SearchFn = Box<dyn Fn(&SearchQuery) -> Result<SearchResponse> + Send + Sync>;

/// Provider double that records how often it was called.
pub struct MockProvider {
    source: SourceKind,
    outcome_fn: Mutex<OutcomeFn>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            outcome_fn: Mutex::new(Box::new(|_| ProviderOutcome::EmptySuccess)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn with_outcome(
        self,
        f: impl Fn(&SearchQuery) -> ProviderOutcome + Send + Sync + 'static,
    ) -> Self {
        *self.outcome_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn failing(self, kind: FailureKind) -> Self {
        self.with_outcome(move |_| ProviderOutcome::failure(kind, "mock failure"))
    }

    /// Shared counter, still readable after the mock is boxed into an orchestrator.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl InventoryProvider for MockProvider {
    fn source(&self) -> SourceKind {
        self.source
    }

    async fn search(&self, query: &SearchQuery) -> ProviderOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let f = self.outcome_fn.lock().unwrap();
        f(query)
    }
}

pub struct MockHotelSearch {
    search_fn: Mutex<SearchFn>,
}

impl Default for MockHotelSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHotelSearch {
    pub fn new() -> Self {
        Self {
            search_fn: Mutex::new(Box::new(|_| {
                Ok(SearchResponse {
                    records: vec![make_record("agg-1", "Mock Hotel", SourceKind::Primary)],
                    source_used: SourceKind::Primary,
                })
            })),
        }
    }

    #[must_use]
    pub fn with_search(
        self,
        f: impl Fn(&SearchQuery) -> Result<SearchResponse> + Send + Sync + 'static,
    ) -> Self {
        *self.search_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl HotelSearch for MockHotelSearch {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let f = self.search_fn.lock().unwrap();
        f(query)
    }
}

// --- Factory functions ---

pub fn make_query() -> SearchQuery {
    SearchQuery::new(
        "NYC",
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        2,
    )
}

pub fn make_record(id: &str, name: &str, source: SourceKind) -> InventoryRecord {
    InventoryRecord {
        id: id.to_string(),
        source_kind: source,
        display_name: name.to_string(),
        location_label: "New York".to_string(),
        price: Price::quoted(199.0, "USD"),
        rating: 4.2,
        amenities: vec!["Free WiFi".to_string()],
        images: vec!["https://img.example.com/1.jpg".to_string()],
        ranking_score: None,
        synthetic: source == SourceKind::Synthetic,
    }
}

pub fn make_aggregator_hotel(id: &str, name: &str, price: f64) -> RawStay {
    RawStay::Aggregator(AggregatorHotel {
        id: Some(LenientId::Text(id.to_string())),
        name: Some(name.to_string()),
        city: Some("New York".to_string()),
        price: Some(LenientNumber::Number(price)),
        currency: Some("USD".to_string()),
        rating: Some(LenientNumber::Number(4.3)),
        amenities: Some(vec!["Free WiFi".to_string(), "Gym".to_string()]),
        images: Some(vec![format!("https://img.example.com/{id}.jpg")]),
        ..Default::default()
    })
}

pub fn make_upstream_hotel(id: &str, name: &str) -> RawStay {
    RawStay::Upstream(UpstreamHotel {
        hotel_id: id.to_string(),
        name: Some(name.to_string()),
        city_name: Some("NEW YORK".to_string()),
        ..Default::default()
    })
}
