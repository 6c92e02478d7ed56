use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::query::SearchQuery;
use crate::domain::raw::{LenientNumber, UpstreamHotel, UpstreamOffer};
use crate::error::{ResolverError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelListEntry {
    hotel_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    rating: Option<LenientNumber>,
    #[serde(default)]
    amenities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Address {
    #[serde(default)]
    city_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferEntry {
    hotel: OfferHotel,
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferHotel {
    hotel_id: String,
}

#[derive(Debug, Deserialize)]
struct Offer {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    price: Option<OfferPrice>,
}

#[derive(Debug, Deserialize)]
struct OfferPrice {
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    total: Option<LenientNumber>,
}

/// Query pairs for the by-city hotel listing call.
pub fn list_query_pairs(query: &SearchQuery, radius_km: u32) -> Vec<(&'static str, String)> {
    vec![
        ("cityCode", query.normalized_code()),
        ("radius", radius_km.to_string()),
        ("radiusUnit", "KM".to_string()),
        ("hotelSource", "ALL".to_string()),
    ]
}

/// Query pairs for the hotel-offers pricing call.
pub fn offers_query_pairs(query: &SearchQuery, hotel_ids: &[&str]) -> Vec<(&'static str, String)> {
    vec![
        ("hotelIds", hotel_ids.join(",")),
        ("checkInDate", query.check_in_str()),
        ("checkOutDate", query.check_out_str()),
        ("adults", query.party_size.to_string()),
        ("roomQuantity", "1".to_string()),
        ("bestRateOnly", "true".to_string()),
    ]
}

/// Parse the candidate listing. Entries without a hotel id are skipped.
pub fn parse_hotel_list(json: &Value) -> Result<Vec<UpstreamHotel>> {
    check_error_payload(json)?;
    Ok(data_entries(json)
        .filter_map(|entry| decode::<HotelListEntry>(entry, "hotel list entry"))
        .filter(|entry| !entry.hotel_id.trim().is_empty())
        .map(|entry| UpstreamHotel {
            hotel_id: entry.hotel_id.trim().to_string(),
            name: entry.name,
            city_name: entry.address.and_then(|a| a.city_name),
            rating: entry.rating,
            amenities: entry.amenities,
            images: None,
            offer: None,
        })
        .collect())
}

/// Parse the offers response into `hotel_id -> first priced offer`.
/// Unavailable hotels and offers without a positive total are left out.
pub fn parse_offers(json: &Value) -> Result<HashMap<String, UpstreamOffer>> {
    check_error_payload(json)?;
    let mut priced = HashMap::new();
    for entry in data_entries(json).filter_map(|e| decode::<OfferEntry>(e, "offer entry")) {
        if entry.available == Some(false) {
            continue;
        }
        let offer = entry.offers.into_iter().find_map(|offer| {
            let price = offer.price?;
            let total = price.total?;
            total.value().filter(|v| *v > 0.0)?;
            Some(UpstreamOffer {
                offer_id: offer.id,
                total: Some(total),
                currency: price.currency,
            })
        });
        if let Some(offer) = offer {
            priced.entry(entry.hotel.hotel_id).or_insert(offer);
        }
    }
    Ok(priced)
}

/// Join priced offers onto the candidates that were priced.
///
/// When at least one candidate has an offer, only priced candidates are
/// returned. When none has, every candidate is returned unpriced.
pub fn attach_offers(
    candidates: Vec<UpstreamHotel>,
    mut offers: HashMap<String, UpstreamOffer>,
) -> Vec<UpstreamHotel> {
    if !candidates.iter().any(|c| offers.contains_key(&c.hotel_id)) {
        return candidates;
    }
    candidates
        .into_iter()
        .filter_map(|mut candidate| {
            let offer = offers.remove(&candidate.hotel_id)?;
            candidate.offer = Some(offer);
            Some(candidate)
        })
        .collect()
}

/// The upstream reports request errors as `{"errors": [{"title", "detail"}]}`,
/// sometimes with a 2xx status.
fn check_error_payload(json: &Value) -> Result<()> {
    let Some(first) = json
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    else {
        return Ok(());
    };
    if json.get("data").and_then(Value::as_array).is_some_and(|d| !d.is_empty()) {
        // partial success: keep the data, the warnings are logged
        warn!(error = %first, "Upstream returned data with errors");
        return Ok(());
    }
    let title = first.get("title").and_then(Value::as_str).unwrap_or("error");
    let detail = first.get("detail").and_then(Value::as_str).unwrap_or_default();
    Err(ResolverError::Upstream {
        reason: format!("upstream reported {title}: {detail}").trim_end_matches(": ").to_string(),
    })
}

fn data_entries(json: &Value) -> impl Iterator<Item = &Value> {
    json.get("data")
        .and_then(Value::as_array)
        .map(|d| d.iter())
        .into_iter()
        .flatten()
}

fn decode<T: serde::de::DeserializeOwned>(entry: &Value, what: &str) -> Option<T> {
    match serde_json::from_value(entry.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(error = %e, what, "Skipping undecodable upstream entry");
            None
        }
    }
}
