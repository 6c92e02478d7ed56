use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::types::SyntheticConfig;
use crate::domain::locations::location_name;
use crate::domain::normalizer::round_cents;
use crate::domain::quality::QualityFilter;
use crate::domain::query::SearchQuery;
use crate::domain::record::{InventoryRecord, Price, SourceKind};

const NAME_PREFIXES: &[&str] = &[
    "The Grand",
    "Royal",
    "Park View",
    "Harbor",
    "City Center",
    "Riverside",
    "Skyline",
    "Heritage",
];

const NAME_SUFFIXES: &[&str] = &["Hotel", "Resort", "Suites", "Inn", "Palace"];

const AMENITY_POOL: &[&str] = &[
    "Free WiFi",
    "Swimming Pool",
    "Fitness Center",
    "Spa",
    "Restaurant",
    "Bar",
    "Room Service",
    "Parking",
    "Airport Shuttle",
    "Business Center",
];

const IMAGE_POOL: &[&str] = &[
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=800",
    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800",
    "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800",
    "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800",
];

/// Stands in for a location name that itself looks like a fixture.
const NEUTRAL_LOCATION: &str = "Downtown";

const MIN_SYNTHETIC_RATING: f64 = 3.5;
const MAX_SYNTHETIC_RATING: f64 = 5.0;

/// Produces placeholder inventory when no real provider returned anything usable.
///
/// Names are checked against the fixture markers of the attached
/// [`QualityFilter`], so a marker smuggled in through the location code never
/// shows up in a placeholder.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    config: SyntheticConfig,
    quality: QualityFilter,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new(SyntheticConfig::default())
    }
}

impl SyntheticGenerator {
    pub fn new(config: SyntheticConfig) -> Self {
        Self {
            config,
            quality: QualityFilter::default(),
        }
    }

    #[must_use]
    pub fn with_quality_filter(mut self, quality: QualityFilter) -> Self {
        self.quality = quality;
        self
    }

    /// Number of records for one call: uniform in the configured range,
    /// capped by the query's `max_results`, never zero.
    pub fn pick_count<R: Rng>(&self, query: &SearchQuery, rng: &mut R) -> usize {
        let min = self.config.min_count.max(1);
        let max = self.config.max_count.max(min);
        let count = rng.random_range(min..=max);
        query.max_results.map_or(count, |cap| count.min(cap.max(1)))
    }

    pub fn generate<R: Rng>(&self, query: &SearchQuery, rng: &mut R) -> Vec<InventoryRecord> {
        let count = self.pick_count(query, rng);
        let location = self.location_label(query);
        let prefix_offset = rng.random_range(0..NAME_PREFIXES.len());

        (0..count)
            .map(|i| {
                let prefix = NAME_PREFIXES[(prefix_offset + i) % NAME_PREFIXES.len()];
                let suffix_index = rng.random_range(0..NAME_SUFFIXES.len());
                let amount = rng.random_range(self.config.price_min..=self.config.price_max);
                let rating = rng.random_range(MIN_SYNTHETIC_RATING..=MAX_SYNTHETIC_RATING);

                InventoryRecord {
                    id: format!("{}-{}-{}", SourceKind::Synthetic.id_prefix(), query.normalized_code(), i + 1),
                    source_kind: SourceKind::Synthetic,
                    display_name: self.display_name(prefix, &location, suffix_index),
                    location_label: location.clone(),
                    price: Price::estimated(round_cents(amount), self.config.currency.clone()),
                    rating: (rating * 10.0).round() / 10.0,
                    amenities: sample(AMENITY_POOL, 4..=6, rng),
                    images: sample(IMAGE_POOL, 1..=3, rng),
                    ranking_score: None,
                    synthetic: true,
                }
            })
            .collect()
    }

    fn location_label(&self, query: &SearchQuery) -> String {
        let location = location_name(&query.normalized_code());
        if location.is_empty() || self.quality.is_fixture(&location) {
            NEUTRAL_LOCATION.to_string()
        } else {
            location
        }
    }

    /// First combination that is not fixture-marked, trying the drawn suffix
    /// first, then the others, then the same with the neutral location.
    fn display_name(&self, prefix: &str, location: &str, suffix_index: usize) -> String {
        let suffixes = NAME_SUFFIXES
            .iter()
            .cycle()
            .skip(suffix_index)
            .take(NAME_SUFFIXES.len());
        let drawn = format!("{prefix} {location} {}", NAME_SUFFIXES[suffix_index]);
        suffixes
            .clone()
            .map(|suffix| format!("{prefix} {location} {suffix}"))
            .chain(suffixes.map(|suffix| format!("{prefix} {NEUTRAL_LOCATION} {suffix}")))
            .find(|name| !self.quality.is_fixture(name))
            .unwrap_or(drawn)
    }
}

fn sample<R: Rng>(
    pool: &[&str],
    size: std::ops::RangeInclusive<usize>,
    rng: &mut R,
) -> Vec<String> {
    let mut items: Vec<&str> = pool.to_vec();
    items.shuffle(rng);
    let take = rng.random_range(size).clamp(1, items.len());
    items.into_iter().take(take).map(String::from).collect()
}
