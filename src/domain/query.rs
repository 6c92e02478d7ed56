use chrono::NaiveDate;

use crate::error::{ResolverError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An immutable hotel search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub location_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub party_size: u32,
    pub max_results: Option<usize>,
}

impl SearchQuery {
    pub fn new(
        location_code: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        party_size: u32,
    ) -> Self {
        Self {
            location_code: location_code.into(),
            check_in,
            check_out,
            party_size,
            max_results: None,
        }
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Build a query from `YYYY-MM-DD` date strings and validate it.
    pub fn parse(
        location_code: &str,
        check_in: &str,
        check_out: &str,
        party_size: u32,
    ) -> Result<Self> {
        let check_in = parse_date("check-in", check_in)?;
        let check_out = parse_date("check-out", check_out)?;
        let query = Self::new(location_code, check_in, check_out, party_size);
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<()> {
        if self.location_code.trim().is_empty() {
            return Err(ResolverError::InvalidQuery {
                reason: "location code is required".into(),
            });
        }

        if self.check_out <= self.check_in {
            return Err(ResolverError::InvalidQuery {
                reason: format!(
                    "check-out {} must be after check-in {}",
                    self.check_out, self.check_in
                ),
            });
        }

        if self.party_size == 0 {
            return Err(ResolverError::InvalidQuery {
                reason: "party size must be at least 1".into(),
            });
        }

        if self.max_results == Some(0) {
            return Err(ResolverError::InvalidQuery {
                reason: "max_results must be at least 1 when provided".into(),
            });
        }

        Ok(())
    }

    /// Location code as sent to providers: trimmed and upper-cased.
    pub fn normalized_code(&self) -> String {
        self.location_code.trim().to_uppercase()
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn check_in_str(&self) -> String {
        self.check_in.format(DATE_FORMAT).to_string()
    }

    pub fn check_out_str(&self) -> String {
        self.check_out.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ResolverError::InvalidQuery {
            reason: format!("invalid {field} date '{value}', expected YYYY-MM-DD"),
        }
    })
}
