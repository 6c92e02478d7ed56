use serde::{Deserialize, Serialize};

use crate::domain::record::{InventoryRecord, SourceKind};

/// Final answer of one search: a non-empty record list and the layer that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub records: Vec<InventoryRecord>,
    pub source_used: SourceKind,
}

impl SearchResponse {
    pub fn is_synthetic(&self) -> bool {
        self.source_used == SourceKind::Synthetic
    }
}
