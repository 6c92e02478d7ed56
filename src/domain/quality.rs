use crate::config::types::QualityConfig;
use crate::domain::record::{InventoryRecord, SourceKind};

/// Drops sandbox fixture records and ranks the rest by name keywords.
///
/// All matching is case-insensitive. Markers and keywords are lower-cased once
/// at construction.
#[derive(Debug, Clone)]
pub struct QualityFilter {
    fixture_markers: Vec<String>,
    category_keywords: Vec<String>,
    brand_keywords: Vec<String>,
    preferred_location: Option<String>,
    category_bonus: i32,
    brand_bonus: i32,
    location_bonus: i32,
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::new(&QualityConfig::default())
    }
}

impl QualityFilter {
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            fixture_markers: lowercase_all(&config.fixture_markers),
            category_keywords: lowercase_all(&config.category_keywords),
            brand_keywords: lowercase_all(&config.brand_keywords),
            preferred_location: config
                .preferred_location
                .as_deref()
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty()),
            category_bonus: config.category_bonus,
            brand_bonus: config.brand_bonus,
            location_bonus: config.location_bonus,
        }
    }

    pub fn is_fixture(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.fixture_markers.iter().any(|m| name.contains(m.as_str()))
    }

    /// Keyword score of a bare name, without the location bonus.
    pub fn name_score(&self, name: &str) -> i32 {
        let name = name.to_lowercase();
        let mut score = 0;
        if self.category_keywords.iter().any(|k| name.contains(k.as_str())) {
            score += self.category_bonus;
        }
        if self.brand_keywords.iter().any(|k| name.contains(k.as_str())) {
            score += self.brand_bonus;
        }
        score
    }

    fn record_score(&self, record: &InventoryRecord) -> i32 {
        let mut score = self.name_score(&record.display_name);
        if let Some(ref preferred) = self.preferred_location {
            let name = record.display_name.to_lowercase();
            let location = record.location_label.to_lowercase();
            if name.contains(preferred.as_str()) || location.contains(preferred.as_str()) {
                score += self.location_bonus;
            }
        }
        score
    }

    /// Remove fixture records and return the rest sorted by descending score.
    ///
    /// Synthetic records are never removed. The sort is stable, so equal
    /// scores keep their input order.
    pub fn score(&self, records: Vec<InventoryRecord>) -> Vec<InventoryRecord> {
        let mut kept: Vec<InventoryRecord> = records
            .into_iter()
            .filter(|r| r.source_kind == SourceKind::Synthetic || !self.is_fixture(&r.display_name))
            .map(|mut r| {
                r.ranking_score = Some(self.record_score(&r));
                r
            })
            .collect();
        kept.sort_by_key(|r| std::cmp::Reverse(r.ranking_score.unwrap_or(0)));
        kept
    }
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_record;

    fn filter() -> QualityFilter {
        QualityFilter::new(&QualityConfig {
            fixture_markers: vec!["Test Property".into(), "sandbox".into()],
            category_keywords: vec!["hotel".into()],
            brand_keywords: vec!["hilton".into(), "marriott".into()],
            preferred_location: Some("Midtown".into()),
            category_bonus: 10,
            brand_bonus: 25,
            location_bonus: 5,
        })
    }

    fn names(records: &[InventoryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.display_name.as_str()).collect()
    }

    #[test]
    fn fixture_markers_match_case_insensitively() {
        let f = filter();
        assert!(f.is_fixture("TEST PROPERTY for API"));
        assert!(f.is_fixture("Amadeus Sandbox Inn"));
        assert!(!f.is_fixture("The Plaza"));
    }

    #[test]
    fn fixtures_are_dropped() {
        let records = vec![
            make_record("1", "Test Property Hotel", SourceKind::Primary),
            make_record("2", "The Plaza", SourceKind::Primary),
            make_record("3", "sandbox suites", SourceKind::Secondary),
        ];
        let scored = filter().score(records);
        assert_eq!(names(&scored), vec!["The Plaza"]);
    }

    #[test]
    fn synthetic_records_are_never_dropped() {
        let records = vec![make_record("1", "Sandbox Grand Hotel", SourceKind::Synthetic)];
        let scored = filter().score(records);
        assert_eq!(scored.len(), 1);
        assert!(scored[0].ranking_score.is_some());
    }

    #[test]
    fn brand_outranks_category() {
        let records = vec![
            make_record("1", "Budget Stay", SourceKind::Primary),
            make_record("2", "City Hotel", SourceKind::Primary),
            make_record("3", "Hilton Garden Inn", SourceKind::Primary),
            make_record("4", "Marriott Marquis Hotel", SourceKind::Primary),
        ];
        let scored = filter().score(records);
        assert_eq!(
            names(&scored),
            vec!["Marriott Marquis Hotel", "Hilton Garden Inn", "City Hotel", "Budget Stay"]
        );
        assert_eq!(scored[0].ranking_score, Some(35));
        assert_eq!(scored[1].ranking_score, Some(25));
        assert_eq!(scored[2].ranking_score, Some(10));
        assert_eq!(scored[3].ranking_score, Some(0));
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            make_record("1", "Alpha", SourceKind::Primary),
            make_record("2", "Bravo", SourceKind::Primary),
            make_record("3", "Charlie", SourceKind::Primary),
        ];
        let scored = filter().score(records);
        assert_eq!(names(&scored), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn preferred_location_adds_bonus() {
        let mut near = make_record("1", "Quiet Rooms", SourceKind::Primary);
        near.location_label = "Midtown Manhattan".into();
        let far = make_record("2", "Loud Rooms", SourceKind::Primary);
        let scored = filter().score(vec![far, near]);
        assert_eq!(scored[0].display_name, "Quiet Rooms");
        assert_eq!(scored[0].ranking_score, Some(5));
    }

    #[test]
    fn empty_marker_entries_are_ignored() {
        let f = QualityFilter::new(&QualityConfig {
            fixture_markers: vec![String::new(), "  ".into()],
            ..QualityConfig::default()
        });
        assert!(!f.is_fixture("Anything"));
    }
}
