//! Caller-supplied options for one aggregation pass.
//!
//! `AggregationFilters` carries everything a pass depends on besides the
//! configuration and the dog: the date window, which venues (and optionally
//! which divisions/levels) are in view, which runs are listed, how lifetime
//! points are broken down, and the event sort order. A pass is a pure
//! function of those three inputs.

use agility_model::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, Result};

/// One entry of the venue filter: `VENUE[/DIVISION[/LEVEL]]`.
///
/// An absent division or level matches any.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueFilter {
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl VenueFilter {
    pub fn venue(name: impl Into<String>) -> Self {
        Self {
            venue: name.into(),
            division: None,
            level: None,
        }
    }

    #[must_use]
    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn matches_division(&self, division: &str) -> bool {
        self.division.as_deref().is_none_or(|name| name == division)
    }

    pub fn matches_level(&self, division: &str, level: &str) -> bool {
        self.matches_division(division) && self.level.as_deref().is_none_or(|name| name == level)
    }
}

impl fmt::Display for VenueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.venue)?;
        if let Some(division) = &self.division {
            write!(f, "/{division}")?;
            if let Some(level) = &self.level {
                write!(f, "/{level}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for VenueFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        if parts.len() > 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(FilterError::MalformedVenueFilter(s.to_string()));
        }
        let mut filter = VenueFilter::venue(parts[0]);
        if let Some(division) = parts.get(1) {
            filter = filter.with_division(*division);
        }
        if let Some(level) = parts.get(2) {
            filter = filter.with_level(*level);
        }
        Ok(filter)
    }
}

/// Which runs are listed. Q tallies ignore this; it only affects what a
/// caller would show run by run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunsView {
    #[default]
    All,
    Qualifying,
    NonQualifying,
}

impl RunsView {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunsView::All => "all",
            RunsView::Qualifying => "qualifying",
            RunsView::NonQualifying => "non-qualifying",
        }
    }
}

impl fmt::Display for RunsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RunsView {
    type Err = FilterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "all" => Ok(RunsView::All),
            "qualifying" | "q" => Ok(RunsView::Qualifying),
            "non-qualifying" | "nq" => Ok(RunsView::NonQualifying),
            _ => Err(FilterError::UnknownRunsView(s.to_string())),
        }
    }
}

/// A component of the event sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Division,
    Level,
    Event,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Division => "division",
            SortKey::Level => "level",
            SortKey::Event => "event",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "division" | "div" => Ok(SortKey::Division),
            "level" => Ok(SortKey::Level),
            "event" => Ok(SortKey::Event),
            _ => Err(FilterError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Three distinct sort keys, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<SortKey>", into = "Vec<SortKey>")]
pub struct SortOrder([SortKey; 3]);

impl SortOrder {
    pub fn new(keys: [SortKey; 3]) -> Result<Self> {
        for (index, key) in keys.iter().enumerate() {
            if keys[..index].contains(key) {
                return Err(FilterError::DuplicateSortKey(*key));
            }
        }
        Ok(Self(keys))
    }

    pub fn keys(&self) -> [SortKey; 3] {
        self.0
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self([SortKey::Division, SortKey::Level, SortKey::Event])
    }
}

impl TryFrom<Vec<SortKey>> for SortOrder {
    type Error = FilterError;

    fn try_from(keys: Vec<SortKey>) -> std::result::Result<Self, Self::Error> {
        let count = keys.len();
        let keys: [SortKey; 3] = keys
            .try_into()
            .map_err(|_| FilterError::SortKeyCount(count))?;
        SortOrder::new(keys)
    }
}

impl From<SortOrder> for Vec<SortKey> {
    fn from(order: SortOrder) -> Self {
        order.0.to_vec()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second, third] = self.0;
        write!(f, "{first},{second},{third}")
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    /// Parse `division,level,event` style lists.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let keys = s
            .split(',')
            .map(str::parse::<SortKey>)
            .collect::<Result<Vec<_>>>()?;
        SortOrder::try_from(keys)
    }
}

/// Options controlling one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationFilters {
    /// Only runs, titles and existing points inside this window are shown.
    pub dates: DateRange,

    /// Venues in view. Empty means all venues.
    pub venues: Vec<VenueFilter>,

    /// Which runs are listed.
    pub runs_view: RunsView,

    /// Break lifetime points down by event name instead of by level.
    pub lifetime_by_event: bool,

    /// Sort priority for event lines within a venue.
    pub sort: SortOrder,

    /// Include titles flagged as hidden.
    pub show_hidden_titles: bool,

    /// Report date shown on the dog line.
    pub as_of: Option<NaiveDate>,
}

impl AggregationFilters {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    #[must_use]
    pub fn with_venue(mut self, venue: VenueFilter) -> Self {
        self.venues.push(venue);
        self
    }

    #[must_use]
    pub fn with_runs_view(mut self, view: RunsView) -> Self {
        self.runs_view = view;
        self
    }

    #[must_use]
    pub fn with_lifetime_by_event(mut self, enable: bool) -> Self {
        self.lifetime_by_event = enable;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_show_hidden_titles(mut self, enable: bool) -> Self {
        self.show_hidden_titles = enable;
        self
    }

    #[must_use]
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Checks what deserialization cannot: the date window must be ordered.
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.dates.from, self.dates.to)
            && from > to
        {
            return Err(FilterError::InvertedDateRange { from, to });
        }
        Ok(())
    }
}
