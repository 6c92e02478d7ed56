use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, Result};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let s = &self.synthetic;
        if s.min_count == 0 {
            return Err(ResolverError::Config(
                "synthetic.min_count must be at least 1".into(),
            ));
        }
        if s.min_count > s.max_count {
            return Err(ResolverError::Config(format!(
                "synthetic.min_count ({}) exceeds synthetic.max_count ({})",
                s.min_count, s.max_count
            )));
        }
        if !(s.price_min > 0.0 && s.price_min <= s.price_max) {
            return Err(ResolverError::Config(format!(
                "synthetic price band {}..{} is invalid",
                s.price_min, s.price_max
            )));
        }
        if self.upstream.priced_subset == 0 || self.upstream.max_candidates == 0 {
            return Err(ResolverError::Config(
                "upstream.priced_subset and upstream.max_candidates must be at least 1".into(),
            ));
        }
        url::Url::parse(&self.aggregator.base_url)?;
        url::Url::parse(&self.upstream.base_url)?;
        Ok(())
    }
}

/// Primary aggregator API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    #[serde(default = "default_aggregator_base_url")]
    pub base_url: String,
    #[serde(default = "default_aggregator_search_path")]
    pub search_path: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_aggregator_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_aggregator_base_url(),
            search_path: default_aggregator_search_path(),
            api_key: None,
            request_timeout_secs: default_aggregator_timeout(),
        }
    }
}

/// Secondary upstream with OAuth2 client-credentials auth.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    #[serde(default = "default_token_path")]
    pub token_path: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_radius_km")]
    pub radius_km: u32,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_priced_subset")]
    pub priced_subset: usize,
    #[serde(default = "default_step_timeout")]
    pub token_timeout_secs: u64,
    #[serde(default = "default_step_timeout")]
    pub list_timeout_secs: u64,
    #[serde(default = "default_step_timeout")]
    pub offers_timeout_secs: u64,
    #[serde(default = "default_token_expiry_skew")]
    pub token_expiry_skew_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            token_path: default_token_path(),
            client_id: String::new(),
            client_secret: String::new(),
            radius_km: default_radius_km(),
            max_candidates: default_max_candidates(),
            priced_subset: default_priced_subset(),
            token_timeout_secs: default_step_timeout(),
            list_timeout_secs: default_step_timeout(),
            offers_timeout_secs: default_step_timeout(),
            token_expiry_skew_secs: default_token_expiry_skew(),
        }
    }
}

/// Fixture markers and ranking keywords. These are sandbox heuristics, so
/// deployments are expected to override them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QualityConfig {
    #[serde(default = "default_fixture_markers")]
    pub fixture_markers: Vec<String>,
    #[serde(default = "default_category_keywords")]
    pub category_keywords: Vec<String>,
    #[serde(default = "default_brand_keywords")]
    pub brand_keywords: Vec<String>,
    #[serde(default)]
    pub preferred_location: Option<String>,
    #[serde(default = "default_category_bonus")]
    pub category_bonus: i32,
    #[serde(default = "default_brand_bonus")]
    pub brand_bonus: i32,
    #[serde(default = "default_location_bonus")]
    pub location_bonus: i32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            fixture_markers: default_fixture_markers(),
            category_keywords: default_category_keywords(),
            brand_keywords: default_brand_keywords(),
            preferred_location: None,
            category_bonus: default_category_bonus(),
            brand_bonus: default_brand_bonus(),
            location_bonus: default_location_bonus(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    #[serde(default = "default_price_min")]
    pub price_min: f64,
    #[serde(default = "default_price_max")]
    pub price_max: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fixed seed for all fallback randomness; unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
            max_count: default_max_count(),
            price_min: default_price_min(),
            price_max: default_price_max(),
            currency: default_currency(),
            seed: None,
        }
    }
}

fn default_aggregator_base_url() -> String {
    "http://localhost:5000/api".into()
}

fn default_aggregator_search_path() -> String {
    "/hotels/search".into()
}

fn default_aggregator_timeout() -> u64 {
    10
}

fn default_upstream_base_url() -> String {
    "https://test.api.amadeus.com".into()
}

fn default_token_path() -> String {
    "/v1/security/oauth2/token".into()
}

fn default_radius_km() -> u32 {
    5
}

fn default_max_candidates() -> usize {
    20
}

fn default_priced_subset() -> usize {
    5
}

fn default_step_timeout() -> u64 {
    8
}

fn default_token_expiry_skew() -> u64 {
    30
}

fn default_fixture_markers() -> Vec<String> {
    [
        "test property",
        "test hotel",
        "sandbox",
        "do not book",
        "dummy",
        "for api testing",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_category_keywords() -> Vec<String> {
    ["hotel", "resort", "suites", "inn"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_brand_keywords() -> Vec<String> {
    [
        "hilton",
        "marriott",
        "hyatt",
        "sheraton",
        "westin",
        "intercontinental",
        "four seasons",
        "ritz-carlton",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_category_bonus() -> i32 {
    10
}

fn default_brand_bonus() -> i32 {
    25
}

fn default_location_bonus() -> i32 {
    5
}

fn default_min_count() -> usize {
    5
}

fn default_max_count() -> usize {
    8
}

fn default_price_min() -> f64 {
    100.0
}

fn default_price_max() -> f64 {
    500.0
}

fn default_currency() -> String {
    "USD".into()
}
