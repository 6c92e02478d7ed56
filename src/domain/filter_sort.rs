//! Caller-side refinement of a resolved result list.
//!
//! Unlike the orchestrator, this may legitimately produce an empty list.

use serde::{Deserialize, Serialize};

use crate::domain::record::InventoryRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    /// Every entry must match some amenity (case-insensitive substring).
    pub required_amenities: Vec<String>,
}

impl ResultFilter {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        if let Some(min) = self.min_price
            && record.price.amount < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && record.price.amount > max
        {
            return false;
        }
        if let Some(min) = self.min_rating
            && record.rating < min
        {
            return false;
        }
        self.required_amenities.iter().all(|wanted| {
            let wanted = wanted.to_lowercase();
            record
                .amenities
                .iter()
                .any(|a| a.to_lowercase().contains(&wanted))
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the resolver's ranking order.
    #[default]
    Recommended,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    Name,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "" | "recommended" => Ok(Self::Recommended),
            "price_asc" | "price" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "rating_desc" | "rating" => Ok(Self::RatingDesc),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

pub fn apply(
    records: &[InventoryRecord],
    filter: &ResultFilter,
    sort: SortOrder,
) -> Vec<InventoryRecord> {
    let mut out: Vec<InventoryRecord> = records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    match sort {
        SortOrder::Recommended => {}
        SortOrder::PriceAsc => out.sort_by(|a, b| a.price.amount.total_cmp(&b.price.amount)),
        SortOrder::PriceDesc => out.sort_by(|a, b| b.price.amount.total_cmp(&a.price.amount)),
        SortOrder::RatingDesc => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOrder::Name => out.sort_by_key(|r| r.display_name.to_lowercase()),
    }
    out
}
