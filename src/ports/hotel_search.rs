use async_trait::async_trait;

use crate::domain::query::SearchQuery;
use crate::domain::response::SearchResponse;
use crate::error::Result;

/// The resolver's public entry point. The only error it returns is
/// `ResolverError::InvalidQuery`; every valid query yields a non-empty list.
#[async_trait]
pub trait HotelSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}
