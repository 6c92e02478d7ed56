use async_trait::async_trait;

use crate::domain::outcome::ProviderOutcome;
use crate::domain::query::SearchQuery;
use crate::domain::record::SourceKind;

/// One real inventory source. Implementations make a single attempt per call
/// and report every failure through the returned outcome instead of erroring.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// The layer this provider's records are attributed to.
    fn source(&self) -> SourceKind;

    async fn search(&self, query: &SearchQuery) -> ProviderOutcome;
}
