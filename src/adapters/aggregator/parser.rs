use serde_json::Value;
use tracing::warn;

use crate::domain::query::SearchQuery;
use crate::domain::raw::AggregatorHotel;
use crate::error::{ResolverError, Result};

/// Places the aggregator has been seen to put its hotel array.
const RESULT_POINTERS: &[&str] = &["/data/hotels", "/data/results", "/data", "/hotels", "/results"];

/// Keys an entry may carry its price under, matching the decoder's aliases.
const PRICE_KEYS: &[&str] = &["price", "totalPrice", "pricePerNight"];

/// JSON body for the aggregator search call.
pub fn build_search_body(query: &SearchQuery) -> Value {
    let mut body = serde_json::json!({
        "location": query.normalized_code(),
        "checkIn": query.check_in_str(),
        "checkOut": query.check_out_str(),
        "guests": query.party_size,
        "rooms": 1,
    });
    if let Some(limit) = query.max_results {
        body["limit"] = Value::from(limit);
    }
    body
}

/// Parse the aggregator response into hotel entries.
///
/// `success: false` is an upstream error. `success: true` without a result
/// array is an empty result. Odd field types degrade to missing fields; only
/// entries that are not objects or carry neither id nor name are skipped.
pub fn parse_search_response(json: &Value) -> Result<Vec<AggregatorHotel>> {
    let success = json.get("success").and_then(Value::as_bool);
    if success == Some(false) {
        return Err(ResolverError::Upstream {
            reason: format!("aggregator reported failure: {}", error_message(json)),
        });
    }

    let Some(results) = RESULT_POINTERS
        .iter()
        .find_map(|p| json.pointer(p).and_then(Value::as_array))
    else {
        if success == Some(true) {
            return Ok(Vec::new());
        }
        return Err(ResolverError::Upstream {
            reason: "aggregator response has no hotel results array".into(),
        });
    };

    Ok(results
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| decode_entry(index, entry))
        .collect())
}

fn decode_entry(index: usize, entry: &Value) -> Option<AggregatorHotel> {
    if !entry.is_object() {
        warn!(index, "Skipping aggregator hotel that is not an object");
        return None;
    }
    let mut hotel = match serde_json::from_value::<AggregatorHotel>(entry.clone()) {
        Ok(hotel) => hotel,
        Err(e) => {
            warn!(index, error = %e, "Skipping undecodable aggregator hotel");
            return None;
        }
    };
    if !hotel.has_identity() {
        warn!(index, "Skipping aggregator hotel with neither id nor name");
        return None;
    }
    if hotel.currency.is_none() {
        hotel.currency = PRICE_KEYS
            .iter()
            .find_map(|key| entry.get(*key)?.get("currency")?.as_str())
            .map(String::from);
    }
    Some(hotel)
}

fn error_message(json: &Value) -> String {
    json.get("error")
        .and_then(Value::as_str)
        .or_else(|| json.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| json.get("message").and_then(Value::as_str))
        .unwrap_or("no error message")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_query;
    use serde_json::json;

    #[test]
    fn body_carries_location_dates_and_guests() {
        let body = build_search_body(&make_query().with_max_results(4));
        assert_eq!(body["location"], "NYC");
        assert_eq!(body["checkIn"], "2025-06-01");
        assert_eq!(body["checkOut"], "2025-06-04");
        assert_eq!(body["guests"], 2);
        assert_eq!(body["limit"], 4);
    }

    #[test]
    fn body_omits_limit_when_unset() {
        let body = build_search_body(&make_query());
        assert!(body.get("limit").is_none());
    }

    #[test]
    fn parses_nested_hotels() {
        let body = json!({
            "success": true,
            "data": {"hotels": [
                {"id": "h1", "name": "The Plaza", "price": 650.0, "currency": "USD"},
                {"hotelId": 2, "hotelName": "Pod 51", "totalPrice": "189.00"}
            ]}
        });
        let hotels = parse_search_response(&body).unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[1].name.as_deref(), Some("Pod 51"));
    }

    #[test]
    fn parses_flat_data_array() {
        let body = json!({"success": true, "data": [{"id": "h1", "name": "A"}]});
        assert_eq!(parse_search_response(&body).unwrap().len(), 1);
    }

    #[test]
    fn success_false_is_error_with_message() {
        let body = json!({"success": false, "error": "supplier timeout"});
        let err = parse_search_response(&body).unwrap_err();
        assert!(err.to_string().contains("supplier timeout"));
    }

    #[test]
    fn success_false_with_nested_message() {
        let body = json!({"success": false, "error": {"message": "quota exceeded"}});
        let err = parse_search_response(&body).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn success_without_results_is_empty() {
        let body = json!({"success": true, "data": {}});
        assert!(parse_search_response(&body).unwrap().is_empty());
    }

    #[test]
    fn unknown_shape_is_error() {
        let body = json!({"status": "ok"});
        assert!(parse_search_response(&body).is_err());
    }

    #[test]
    fn non_objects_and_anonymous_entries_are_skipped() {
        let body = json!({
            "success": true,
            "data": {"hotels": [
                {"id": "h1", "name": "Good"},
                {"id": 1.5, "name": "Float id"},
                {"id": "  ", "name": null, "price": 120},
                {"rating": 4.2},
                "not an object",
                null
            ]}
        });
        let hotels = parse_search_response(&body).unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].name.as_deref(), Some("Good"));
        assert_eq!(hotels[1].name.as_deref(), Some("Float id"));
    }

    #[test]
    fn odd_field_types_keep_the_hotel() {
        let body = json!({
            "success": true,
            "data": {"hotels": [
                {"id": "1", "name": "The Plaza", "price": {"amount": 650, "currency": "USD"}},
                {"id": "2", "name": "Pod 51", "amenities": "Free WiFi"}
            ]}
        });
        let hotels = parse_search_response(&body).unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].price.as_ref().and_then(|p| p.value()), Some(650.0));
        assert_eq!(hotels[0].currency.as_deref(), Some("USD"));
        assert_eq!(hotels[1].amenities, Some(vec!["Free WiFi".to_string()]));
    }

    #[test]
    fn top_level_currency_wins_over_nested() {
        let body = json!({
            "success": true,
            "data": [{"id": "1", "name": "A", "currency": "EUR",
                      "totalPrice": {"value": "210.00", "currency": "USD"}}]
        });
        let hotels = parse_search_response(&body).unwrap();
        assert_eq!(hotels[0].currency.as_deref(), Some("EUR"));
        assert_eq!(hotels[0].price.as_ref().and_then(|p| p.value()), Some(210.0));
    }
}
