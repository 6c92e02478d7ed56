use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::domain::locations::location_name;
use crate::domain::normalizer;
use crate::domain::outcome::ProviderOutcome;
use crate::domain::quality::QualityFilter;
use crate::domain::query::SearchQuery;
use crate::domain::record::{InventoryRecord, SourceKind};
use crate::domain::response::SearchResponse;
use crate::domain::synthetic::SyntheticGenerator;
use crate::error::Result;
use crate::ports::hotel_search::HotelSearch;
use crate::ports::inventory_provider::InventoryProvider;

/// Where fallback randomness (estimated prices, synthetic records) comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RandomSource {
    #[default]
    Entropy,
    Seeded(u64),
}

impl RandomSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::Seeded)
    }

    fn rng(self) -> StdRng {
        match self {
            Self::Entropy => StdRng::from_os_rng(),
            Self::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Runs primary, then secondary, then synthetic, stopping at the first layer
/// that yields at least one clean record.
///
/// Layers run strictly one after another. Dropping the returned future
/// cancels whichever HTTP call is in flight; nothing carries over between
/// layers except the query.
pub struct SearchOrchestrator {
    primary: Box<dyn InventoryProvider>,
    secondary: Box<dyn InventoryProvider>,
    quality: QualityFilter,
    synthetic: SyntheticGenerator,
    random: RandomSource,
}

impl SearchOrchestrator {
    pub fn new(
        primary: Box<dyn InventoryProvider>,
        secondary: Box<dyn InventoryProvider>,
        quality: QualityFilter,
        synthetic: SyntheticGenerator,
    ) -> Self {
        Self {
            primary,
            secondary,
            synthetic: synthetic.with_quality_filter(quality.clone()),
            quality,
            random: RandomSource::Entropy,
        }
    }

    #[must_use]
    pub fn with_random_source(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Resolve a query. Fails only with `InvalidQuery`; otherwise the list is never empty.
    pub async fn resolve(&self, query: &SearchQuery) -> Result<SearchResponse> {
        query.validate()?;

        let label = location_name(&query.normalized_code());
        let mut rng = self.random.rng();

        for provider in [self.primary.as_ref(), self.secondary.as_ref()] {
            if let Some(records) = self.resolve_layer(provider, query, &label, &mut rng).await {
                return Ok(SearchResponse {
                    records,
                    source_used: provider.source(),
                });
            }
        }

        let records = self.quality.score(self.synthetic.generate(query, &mut rng));
        info!(
            location = %query.normalized_code(),
            count = records.len(),
            "No real inventory available, serving synthetic placeholders"
        );
        Ok(SearchResponse {
            records,
            source_used: SourceKind::Synthetic,
        })
    }

    /// String-date convenience entry point.
    pub async fn search_stays(
        &self,
        location_code: &str,
        check_in: &str,
        check_out: &str,
        party_size: u32,
    ) -> Result<SearchResponse> {
        let query = SearchQuery::parse(location_code, check_in, check_out, party_size)?;
        self.resolve(&query).await
    }

    /// One real layer: call, normalize, filter, cap. `None` means fall through.
    async fn resolve_layer(
        &self,
        provider: &dyn InventoryProvider,
        query: &SearchQuery,
        label: &str,
        rng: &mut StdRng,
    ) -> Option<Vec<InventoryRecord>> {
        let layer = provider.source();
        let outcome = provider.search(query).await;
        match &outcome {
            ProviderOutcome::Success(stays) => {
                debug!(%layer, count = stays.len(), "Provider returned results");
            }
            ProviderOutcome::EmptySuccess => {
                info!(%layer, "Provider returned no matches, falling back");
            }
            ProviderOutcome::Failure { kind, message } => {
                warn!(%layer, %kind, error = %message, "Provider failed, falling back");
            }
        }

        let normalized = normalizer::normalize(outcome, layer, label, rng);
        if normalized.is_empty() {
            return None;
        }

        let before = normalized.len();
        let mut records = self.quality.score(normalized);
        if records.len() < before {
            info!(
                %layer,
                dropped = before - records.len(),
                "Removed sandbox fixture records"
            );
        }
        if let Some(cap) = query.max_results {
            records.truncate(cap);
        }

        if records.is_empty() {
            info!(%layer, "Every record was a fixture, falling back");
            None
        } else {
            Some(records)
        }
    }
}

#[async_trait]
impl HotelSearch for SearchOrchestrator {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.resolve(query).await
    }
}
