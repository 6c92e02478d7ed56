//! Conversion from provider-native records to [`InventoryRecord`].
//!
//! The normalizer never fails: any field an upstream omits or mangles is
//! replaced by a backfill value so the record invariants always hold
//! (non-empty name, amenities and images, rating within 1.0–5.0, a price).

use std::collections::HashSet;

use rand::Rng;

use crate::domain::outcome::ProviderOutcome;
use crate::domain::raw::{AggregatorHotel, LenientNumber, RawStay, UpstreamHotel};
use crate::domain::record::{InventoryRecord, Price, SourceKind};

/// Suffixes used to build a name when upstream sends none.
pub const NAME_TEMPLATES: &[&str] = &[
    "Grand Hotel",
    "Plaza Resort",
    "Central Suites",
    "Boutique Inn",
    "Harbor View Hotel",
    "Park Residences",
];

pub const DEFAULT_AMENITIES: &[&str] = &[
    "Free WiFi",
    "Air Conditioning",
    "24-Hour Front Desk",
    "Non-Smoking Rooms",
];

pub const DEFAULT_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=800",
    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800",
];

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_RATING: f64 = 4.0;
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Band for prices fabricated when upstream quotes none, in the provider's base currency.
pub const ESTIMATED_PRICE_MIN: f64 = 100.0;
pub const ESTIMATED_PRICE_MAX: f64 = 500.0;

/// Field values pulled out of either provider shape before backfilling.
struct Extracted {
    raw_id: Option<String>,
    name: Option<String>,
    location: Option<String>,
    amount: Option<f64>,
    currency: Option<String>,
    rating: Option<f64>,
    amenities: Vec<String>,
    images: Vec<String>,
}

/// Normalize every raw record of `outcome`; non-success outcomes yield nothing.
pub fn normalize<R: Rng>(
    outcome: ProviderOutcome,
    source: SourceKind,
    location_label: &str,
    rng: &mut R,
) -> Vec<InventoryRecord> {
    let ProviderOutcome::Success(stays) = outcome else {
        return Vec::new();
    };

    let mut seen_ids = HashSet::with_capacity(stays.len());
    stays
        .into_iter()
        .enumerate()
        .map(|(index, stay)| {
            let fields = match stay {
                RawStay::Aggregator(hotel) => extract_aggregator(hotel),
                RawStay::Upstream(hotel) => extract_upstream(hotel),
            };
            build_record(fields, index, source, location_label, &mut seen_ids, rng)
        })
        .collect()
}

fn extract_aggregator(hotel: AggregatorHotel) -> Extracted {
    Extracted {
        raw_id: hotel.id.and_then(|id| id.as_text()),
        name: hotel.name,
        location: hotel.city.or(hotel.address),
        amount: hotel.price.as_ref().and_then(LenientNumber::value),
        currency: hotel.currency,
        rating: hotel.rating.as_ref().and_then(LenientNumber::value),
        amenities: hotel.amenities.unwrap_or_default(),
        images: hotel.images.unwrap_or_default(),
    }
}

fn extract_upstream(hotel: UpstreamHotel) -> Extracted {
    let (amount, currency) = hotel.offer.map_or((None, None), |offer| {
        (offer.total.as_ref().and_then(LenientNumber::value), offer.currency)
    });
    Extracted {
        raw_id: Some(hotel.hotel_id).filter(|id| !id.trim().is_empty()),
        name: hotel.name,
        location: hotel.city_name,
        amount,
        currency,
        rating: hotel.rating.as_ref().and_then(LenientNumber::value),
        amenities: hotel.amenities.unwrap_or_default(),
        images: hotel.images.unwrap_or_default(),
    }
}

fn build_record<R: Rng>(
    fields: Extracted,
    index: usize,
    source: SourceKind,
    location_label: &str,
    seen_ids: &mut HashSet<String>,
    rng: &mut R,
) -> InventoryRecord {
    let location_label = fields
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map_or_else(|| location_label.trim().to_string(), title_case_if_shouting);

    let display_name = resolve_name(fields.name.as_deref(), &location_label, index);

    let currency = fields
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map_or_else(|| DEFAULT_CURRENCY.to_string(), str::to_uppercase);
    let price = match fields.amount.map(round_cents) {
        Some(amount) if amount > 0.0 => Price::quoted(amount, currency),
        _ => Price::estimated(estimate_price(rng), currency),
    };

    InventoryRecord {
        id: unique_id(source, fields.raw_id.as_deref(), index, seen_ids),
        source_kind: source,
        display_name,
        location_label,
        price,
        rating: resolve_rating(fields.rating),
        amenities: resolve_amenities(fields.amenities),
        images: resolve_images(fields.images),
        ranking_score: None,
        synthetic: false,
    }
}

fn resolve_name(name: Option<&str>, location_label: &str, index: usize) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => title_case_if_shouting(name),
        _ => {
            let suffix = NAME_TEMPLATES[index % NAME_TEMPLATES.len()];
            if location_label.is_empty() {
                suffix.to_string()
            } else {
                format!("{location_label} {suffix}")
            }
        }
    }
}

fn unique_id(
    source: SourceKind,
    raw_id: Option<&str>,
    index: usize,
    seen: &mut HashSet<String>,
) -> String {
    let prefix = source.id_prefix();
    let mut id = match raw_id {
        Some(raw) => format!("{prefix}-{raw}"),
        None => format!("{prefix}-anon-{index}"),
    };
    while seen.contains(&id) {
        id = format!("{id}-{index}");
    }
    seen.insert(id.clone());
    id
}

/// Ratings on a 10-point review scale are halved; the rest is clamped to 1–5.
pub fn resolve_rating(rating: Option<f64>) -> f64 {
    let value = match rating {
        Some(r) if r.is_finite() && r > 0.0 => {
            if r > MAX_RATING && r <= 10.0 {
                r / 2.0
            } else {
                r.clamp(MIN_RATING, MAX_RATING)
            }
        }
        _ => DEFAULT_RATING,
    };
    (value * 10.0).round() / 10.0
}

fn resolve_amenities(amenities: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let cleaned: Vec<String> = amenities
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(humanize_amenity)
        .filter(|a| !a.is_empty() && seen.insert(a.to_lowercase()))
        .collect();
    if cleaned.is_empty() {
        DEFAULT_AMENITIES.iter().map(|a| (*a).to_string()).collect()
    } else {
        cleaned
    }
}

fn resolve_images(images: Vec<String>) -> Vec<String> {
    let cleaned: Vec<String> = images
        .into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
        .collect();
    if cleaned.is_empty() {
        DEFAULT_IMAGES.iter().map(|u| (*u).to_string()).collect()
    } else {
        cleaned
    }
}

pub(crate) fn estimate_price<R: Rng>(rng: &mut R) -> f64 {
    round_cents(rng.random_range(ESTIMATED_PRICE_MIN..=ESTIMATED_PRICE_MAX))
}

pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `SWIMMING_POOL` → `Swimming Pool`; already readable text is kept.
fn humanize_amenity(raw: &str) -> String {
    if raw.contains('_') || is_shouting(raw) {
        title_case(&raw.replace('_', " "))
    } else {
        raw.to_string()
    }
}

fn title_case_if_shouting(raw: &str) -> String {
    if is_shouting(raw) {
        title_case(raw)
    } else {
        raw.to_string()
    }
}

fn is_shouting(raw: &str) -> bool {
    raw.chars().any(char::is_alphabetic) && !raw.chars().any(char::is_lowercase)
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
