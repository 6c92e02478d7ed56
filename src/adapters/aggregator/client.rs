use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::adapters::shared::{USER_AGENT, join_url, read_json};
use crate::config::types::AggregatorConfig;
use crate::domain::outcome::ProviderOutcome;
use crate::domain::query::SearchQuery;
use crate::domain::raw::RawStay;
use crate::domain::record::SourceKind;
use crate::error::{ResolverError, Result};
use crate::ports::inventory_provider::InventoryProvider;

use super::parser;

const PROVIDER: &str = "aggregator";

/// Primary provider: a single POST to the aggregator search endpoint.
pub struct AggregatorClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl AggregatorClient {
    pub fn new(config: &AggregatorConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            endpoint: join_url(&config.base_url, &config.search_path),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawStay>> {
        let body = parser::build_search_body(query);
        debug!(endpoint = %self.endpoint, location = %query.normalized_code(), "Aggregator search request");

        let mut request = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .header("Accept", "application/json")
            .json(&body);
        if let Some(ref key) = self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await.map_err(ResolverError::Http)?;
        let json = read_json(response, PROVIDER).await?;
        let hotels = parser::parse_search_response(&json)?;
        debug!(count = hotels.len(), "Aggregator hotels decoded");

        Ok(hotels.into_iter().map(RawStay::Aggregator).collect())
    }
}

#[async_trait]
impl InventoryProvider for AggregatorClient {
    fn source(&self) -> SourceKind {
        SourceKind::Primary
    }

    async fn search(&self, query: &SearchQuery) -> ProviderOutcome {
        ProviderOutcome::from_result(self.fetch(query).await)
    }
}
