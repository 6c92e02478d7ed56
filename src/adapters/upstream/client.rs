use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::adapters::shared::{USER_AGENT, join_url, read_json};
use crate::config::types::UpstreamConfig;
use crate::domain::outcome::ProviderOutcome;
use crate::domain::quality::QualityFilter;
use crate::domain::query::SearchQuery;
use crate::domain::raw::{RawStay, UpstreamHotel};
use crate::domain::record::SourceKind;
use crate::error::{ResolverError, Result};
use crate::ports::inventory_provider::InventoryProvider;

use super::parser;
use super::token::TokenProvider;

const PROVIDER: &str = "upstream";
const HOTEL_LIST_PATH: &str = "/v1/reference-data/locations/hotels/by-city";
const HOTEL_OFFERS_PATH: &str = "/v3/shopping/hotel-offers";

/// Secondary provider: lists candidate hotels around a city, then prices a
/// bounded subset of them for the requested stay.
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenProvider>,
    quality: QualityFilter,
    radius_km: u32,
    max_candidates: usize,
    priced_subset: usize,
    list_timeout: Duration,
    offers_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(
        config: &UpstreamConfig,
        tokens: Arc<TokenProvider>,
        quality: QualityFilter,
    ) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            tokens,
            quality,
            radius_km: config.radius_km,
            max_candidates: config.max_candidates.max(1),
            priced_subset: config.priced_subset.max(1),
            list_timeout: Duration::from_secs(config.list_timeout_secs),
            offers_timeout: Duration::from_secs(config.offers_timeout_secs),
        })
    }

    /// Bearer-authenticated GET. A 401 drops the cached token so the next
    /// search re-authenticates; it is not retried here.
    async fn authorized_get(
        &self,
        path: &str,
        pairs: &[(&'static str, String)],
        token: &str,
        timeout: Duration,
    ) -> Result<Value> {
        let mut url = Url::parse(&join_url(&self.base_url, path))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        debug!(url = %url, "Upstream GET request");

        let response = self
            .http
            .get(url.as_str())
            .bearer_auth(token)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(ResolverError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }
        read_json(response, PROVIDER).await
    }

    async fn list_candidates(&self, token: &str, query: &SearchQuery) -> Result<Vec<UpstreamHotel>> {
        let pairs = parser::list_query_pairs(query, self.radius_km);
        let json = self
            .authorized_get(HOTEL_LIST_PATH, &pairs, token, self.list_timeout)
            .await?;
        let mut candidates = parser::parse_hotel_list(&json)?;
        candidates.truncate(self.max_candidates);
        Ok(candidates)
    }

    /// Drop fixture candidates and keep the best-ranked ones for pricing.
    fn select_for_pricing(&self, candidates: Vec<UpstreamHotel>) -> Vec<UpstreamHotel> {
        let before = candidates.len();
        let mut kept: Vec<UpstreamHotel> = candidates
            .into_iter()
            .filter(|c| !self.quality.is_fixture(c.name.as_deref().unwrap_or_default()))
            .collect();
        if kept.len() < before {
            info!(
                dropped = before - kept.len(),
                "Discarded fixture candidates before pricing"
            );
        }
        kept.sort_by_key(|c| {
            std::cmp::Reverse(self.quality.name_score(c.name.as_deref().unwrap_or_default()))
        });
        kept.truncate(self.priced_subset);
        kept
    }

    pub async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawStay>> {
        let token = self.tokens.get_token().await?;

        let candidates = self.list_candidates(&token, query).await?;
        if candidates.is_empty() {
            debug!(location = %query.normalized_code(), "Upstream listed no candidates");
            return Ok(Vec::new());
        }

        let subset = self.select_for_pricing(candidates);
        if subset.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = subset.iter().map(|c| c.hotel_id.as_str()).collect();
        let pairs = parser::offers_query_pairs(query, &ids);
        let json = self
            .authorized_get(HOTEL_OFFERS_PATH, &pairs, &token, self.offers_timeout)
            .await?;
        let offers = parser::parse_offers(&json)?;
        if offers.is_empty() {
            info!(
                candidates = subset.len(),
                "No priced offers, returning unpriced candidates"
            );
        }

        Ok(parser::attach_offers(subset, offers)
            .into_iter()
            .map(RawStay::Upstream)
            .collect())
    }
}

#[async_trait]
impl InventoryProvider for UpstreamClient {
    fn source(&self) -> SourceKind {
        SourceKind::Secondary
    }

    async fn search(&self, query: &SearchQuery) -> ProviderOutcome {
        ProviderOutcome::from_result(self.fetch(query).await)
    }
}
