//! Provider-native records, decoded once at the adapter boundary.
//!
//! Every field an upstream may omit is an `Option`; the normalizer decides
//! what to backfill. Scalars that some providers send as strings go through
//! [`LenientNumber`] and [`LenientId`]. Aggregator fields with an unexpected
//! JSON type decode to `None` instead of failing the whole entry.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A number that may arrive as JSON number or as a string like `"$1,234.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => extract_number(s),
        }
    }
}

impl From<f64> for LenientNumber {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// An identifier that may arrive as JSON string or integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientId {
    Text(String),
    Number(i64),
}

impl LenientId {
    /// The id as text, or `None` when it is blank.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

/// One hotel entry from the aggregator's result array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorHotel {
    #[serde(default, alias = "hotelId", alias = "_id", deserialize_with = "lenient::id")]
    pub id: Option<LenientId>,
    #[serde(default, alias = "hotelName", alias = "title", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(
        default,
        alias = "totalPrice",
        alias = "pricePerNight",
        deserialize_with = "lenient::number"
    )]
    pub price: Option<LenientNumber>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(
        default,
        alias = "starRating",
        alias = "stars",
        deserialize_with = "lenient::number"
    )]
    pub rating: Option<LenientNumber>,
    #[serde(default, alias = "facilities", deserialize_with = "lenient::text_list")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, alias = "photos", deserialize_with = "lenient::text_list")]
    pub images: Option<Vec<String>>,
}

impl AggregatorHotel {
    /// Whether the entry carries an id or a name to anchor a record on.
    pub fn has_identity(&self) -> bool {
        self.id.as_ref().and_then(LenientId::as_text).is_some()
            || self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Field decoders that map a wrong-typed value to `None`.
mod lenient {
    use super::*;

    /// Keys a nested price object has been seen to carry its amount under.
    const AMOUNT_KEYS: &[&str] = &["amount", "value", "total"];

    /// Keys tried when a list item is an object rather than a string.
    const ITEM_KEYS: &[&str] = &["url", "name", "title"];

    pub(super) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LenientId>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(LenientId::Text(s)),
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| LenientId::Text(n.to_string()), LenientId::Number),
            ),
            _ => None,
        })
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<LenientNumber>, D::Error> {
        Ok(number_from(Value::deserialize(d)?))
    }

    fn number_from(value: Value) -> Option<LenientNumber> {
        match value {
            Value::Number(n) => n.as_f64().map(LenientNumber::Number),
            Value::String(s) => Some(LenientNumber::Text(s)),
            Value::Object(mut map) => AMOUNT_KEYS
                .iter()
                .find_map(|key| map.remove(*key))
                .and_then(number_from),
            _ => None,
        }
    }

    pub(super) fn text_list<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(vec![s]),
            Value::Array(items) => Some(items.into_iter().filter_map(list_item).collect()),
            _ => None,
        })
    }

    fn list_item(item: Value) -> Option<String> {
        match item {
            Value::String(s) => Some(s),
            Value::Object(map) => ITEM_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(String::from),
            _ => None,
        }
    }
}

/// A live offer attached to an upstream hotel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamOffer {
    pub offer_id: Option<String>,
    pub total: Option<LenientNumber>,
    pub currency: Option<String>,
}

/// An upstream candidate hotel, optionally joined with its priced offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamHotel {
    pub hotel_id: String,
    pub name: Option<String>,
    pub city_name: Option<String>,
    pub rating: Option<LenientNumber>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub offer: Option<UpstreamOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawStay {
    Aggregator(AggregatorHotel),
    Upstream(UpstreamHotel),
}

/// Pull the first number out of a display string.
///
/// Leading text such as a currency symbol is skipped. Commas inside the
/// number are thousands separators. The number ends at the first character
/// that cannot continue it, so `"4.5/5"` reads as 4.5.
fn extract_number(s: &str) -> Option<f64> {
    let chars: Vec<char> = s.chars().collect();
    let digit_at = |i: usize| chars.get(i).is_some_and(char::is_ascii_digit);
    let starts_number = |i: usize| match chars[i] {
        c if c.is_ascii_digit() => true,
        '.' => digit_at(i + 1),
        '-' => digit_at(i + 1) || (chars.get(i + 1) == Some(&'.') && digit_at(i + 2)),
        _ => false,
    };
    let start = (0..chars.len()).find(|&i| starts_number(i))?;

    let mut number = String::new();
    let mut seen_dot = false;
    for (offset, &c) in chars[start..].iter().enumerate() {
        match c {
            '-' if offset == 0 => number.push(c),
            '0'..='9' => number.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                number.push(c);
            }
            ',' if number.chars().any(|d| d.is_ascii_digit()) => {}
            _ => break,
        }
    }
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}
