use serde::{Deserialize, Serialize};

/// Which layer of the pipeline produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Primary,
    Secondary,
    Synthetic,
}

impl SourceKind {
    /// Prefix applied to record ids so ids from different layers never collide.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Primary => "agg",
            Self::Secondary => "upl",
            Self::Synthetic => "syn",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Synthetic => "synthetic",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
    /// Set when the amount was generated locally instead of quoted upstream.
    #[serde(skip)]
    estimated: bool,
}

impl Price {
    pub fn quoted(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            estimated: false,
        }
    }

    pub(crate) fn estimated(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            estimated: true,
        }
    }

    pub fn is_estimated(&self) -> bool {
        self.estimated
    }
}

/// The canonical record every provider response is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub source_kind: SourceKind,
    pub display_name: String,
    pub location_label: String,
    pub price: Price,
    pub rating: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    #[serde(default)]
    pub ranking_score: Option<i32>,
    #[serde(default)]
    pub synthetic: bool,
}

impl InventoryRecord {
    pub fn is_synthetic(&self) -> bool {
        self.synthetic || self.source_kind == SourceKind::Synthetic
    }
}

impl std::fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({} {:.2}, {:.1}*",
            self.display_name, self.location_label, self.price.currency, self.price.amount, self.rating
        )?;
        if let Some(score) = self.ranking_score {
            write!(f, " | score {score}")?;
        }
        if self.is_synthetic() {
            write!(f, " | placeholder")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> InventoryRecord {
        InventoryRecord {
            id: "agg-1".into(),
            source_kind: SourceKind::Primary,
            display_name: "Hilton Midtown".into(),
            location_label: "New York".into(),
            price: Price::quoted(289.5, "USD"),
            rating: 4.4,
            amenities: vec!["Free WiFi".into()],
            images: vec!["https://img.example.com/1.jpg".into()],
            ranking_score: None,
            synthetic: false,
        }
    }

    #[test]
    fn id_prefixes_are_distinct() {
        let prefixes = [
            SourceKind::Primary.id_prefix(),
            SourceKind::Secondary.id_prefix(),
            SourceKind::Synthetic.id_prefix(),
        ];
        assert_ne!(prefixes[0], prefixes[1]);
        assert_ne!(prefixes[1], prefixes[2]);
        assert_ne!(prefixes[0], prefixes[2]);
    }

    #[test]
    fn source_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SourceKind::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
    }

    #[test]
    fn estimated_flag_is_not_serialized() {
        let price = Price::estimated(120.0, "USD");
        assert!(price.is_estimated());
        let json = serde_json::to_string(&price).unwrap();
        assert!(!json.contains("estimated"));
        let restored: Price = serde_json::from_str(&json).unwrap();
        assert!(!restored.is_estimated());
    }

    #[test]
    fn display_includes_price_and_score() {
        let mut record = make_record();
        record.ranking_score = Some(35);
        let text = record.to_string();
        assert!(text.contains("Hilton Midtown"));
        assert!(text.contains("USD 289.50"));
        assert!(text.contains("score 35"));
        assert!(!text.contains("placeholder"));
    }

    #[test]
    fn display_flags_synthetic_records() {
        let mut record = make_record();
        record.source_kind = SourceKind::Synthetic;
        record.synthetic = true;
        assert!(record.to_string().contains("placeholder"));
    }
}
