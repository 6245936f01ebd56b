//! Inclusive date ranges with optional ends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};

/// An inclusive `[from, to]` range where either end may be open.
///
/// Used for scoring-method validity windows, MultiQ validity and the
/// caller's date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// The unbounded range.
    pub const ALL: DateRange = DateRange {
        from: None,
        to: None,
    };

    /// Build a range, rejecting `from > to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        let range = Self { from, to };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(ModelError::InvertedDateRange { from, to });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns the overlap of two ranges, or `None` when they are disjoint.
    /// Open ends defer to the other range's bound.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let from = match (self.from, other.from) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let to = match (self.to, other.to) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        match (from, to) {
            (Some(from), Some(to)) if from > to => None,
            _ => Some(DateRange { from, to }),
        }
    }

    /// True when the whole span `[start, end]` lies inside the range.
    pub fn covers_span(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.from.is_none_or(|from| start >= from) && self.to.is_none_or(|to| end <= to)
    }

    /// True when the span `[start, end]` touches the range at all.
    pub fn touches_span(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.from.is_none_or(|from| end >= from) && self.to.is_none_or(|to| start <= to)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (None, None) => write!(f, "all dates"),
            (Some(from), None) => write!(f, "{from} onward"),
            (None, Some(to)) => write!(f, "through {to}"),
            (Some(from), Some(to)) => write!(f, "{from} to {to}"),
        }
    }
}
