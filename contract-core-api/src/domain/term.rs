use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Jurisdictions the engine issues contracts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    IE,
    UK,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::IE => "IE",
            Jurisdiction::UK => "UK",
        }
    }

    pub fn default_currency(&self) -> &'static str {
        match self {
            Jurisdiction::IE => "EUR",
            Jurisdiction::UK => "GBP",
        }
    }

    /// Latest allowed term end for a term starting at `start`, or `None`
    /// when the jurisdiction does not cap term length. IE caps at three
    /// years: a term starting 2025-01-01 may run to 2027-12-31 at most.
    pub fn term_cap(&self, start: NaiveDate) -> CoreResult<Option<NaiveDate>> {
        match self {
            Jurisdiction::IE => start
                .checked_add_months(Months::new(36))
                .and_then(|d| d.pred_opt())
                .map(Some)
                .ok_or_else(|| {
                    CoreError::TermPolicy(format!("term start {start} is out of range"))
                }),
            Jurisdiction::UK => Ok(None),
        }
    }

    /// Check a proposed term against this jurisdiction's rules.
    pub fn check_term(&self, start: NaiveDate, end: NaiveDate) -> CoreResult<()> {
        if end < start {
            return Err(CoreError::TermPolicy(format!(
                "term end {end} is before start {start}"
            )));
        }
        if let Some(cap) = self.term_cap(start)? {
            if end > cap {
                return Err(CoreError::TermPolicy(format!(
                    "{self} terms may not exceed 3 years (latest allowed end {cap})"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IE" => Ok(Jurisdiction::IE),
            "UK" => Ok(Jurisdiction::UK),
            _ => Err(format!("unknown jurisdiction: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ie_cap_lands_the_day_before_the_third_anniversary() {
        let cap = Jurisdiction::IE.term_cap(date(2025, 1, 1)).unwrap();
        assert_eq!(cap, Some(date(2027, 12, 31)));
    }

    #[test]
    fn ie_accepts_the_boundary_and_rejects_one_past_it() {
        let start = date(2025, 1, 1);
        assert!(Jurisdiction::IE.check_term(start, date(2027, 12, 31)).is_ok());
        let err = Jurisdiction::IE
            .check_term(start, date(2028, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::TermPolicy(_)));
        assert!(err.to_string().contains("2027-12-31"));
    }

    #[test]
    fn uk_terms_are_uncapped() {
        assert_eq!(Jurisdiction::UK.term_cap(date(2025, 1, 1)).unwrap(), None);
        assert!(Jurisdiction::UK
            .check_term(date(2025, 1, 1), date(2045, 1, 1))
            .is_ok());
    }

    #[test]
    fn end_before_start_is_rejected_everywhere() {
        for jurisdiction in [Jurisdiction::IE, Jurisdiction::UK] {
            let err = jurisdiction
                .check_term(date(2025, 6, 1), date(2025, 5, 31))
                .unwrap_err();
            assert!(matches!(err, CoreError::TermPolicy(_)));
        }
    }

    #[test]
    fn single_day_terms_are_allowed() {
        assert!(Jurisdiction::IE
            .check_term(date(2025, 1, 1), date(2025, 1, 1))
            .is_ok());
    }

    #[test]
    fn currency_follows_jurisdiction() {
        assert_eq!(Jurisdiction::IE.default_currency(), "EUR");
        assert_eq!(Jurisdiction::UK.default_currency(), "GBP");
    }

    #[test]
    fn jurisdiction_round_trips_through_strings() {
        assert_eq!("IE".parse::<Jurisdiction>().unwrap(), Jurisdiction::IE);
        assert_eq!("UK".parse::<Jurisdiction>().unwrap(), Jurisdiction::UK);
        assert!("FR".parse::<Jurisdiction>().is_err());
    }

    #[test]
    fn leap_day_start_caps_cleanly() {
        let cap = Jurisdiction::IE.term_cap(date(2024, 2, 29)).unwrap();
        assert_eq!(cap, Some(date(2027, 2, 27)));
    }
}
