//! Competition configuration: venues and everything hanging off them.
//!
//! The hierarchy is Venue -> Division -> Level (-> sub-level) and, in
//! parallel, Venue -> Event -> ScoringMethod. A scoring method names the
//! division/level it applies to (or leaves either open as a wildcard) and
//! carries a validity window, so the rules for an event can change over
//! time without rewriting history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::dog::Run;
use crate::enums::{ScoringStyle, TallyStrategy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub other_points: Vec<OtherPointsDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub long_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Label for the venue's lifetime points ("ACH", "Lifetime", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_name: Option<String>,
    #[serde(default)]
    pub divisions: Vec<Division>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub multi_qs: Vec<MultiQDef>,
    #[serde(default)]
    pub titles: Vec<TitleDef>,
}

impl Venue {
    pub fn find_division(&self, name: &str) -> Option<&Division> {
        self.divisions.iter().find(|division| division.name == name)
    }

    /// Complete display name of a title: `Long Name [NAME]`, or just the
    /// name when the title is not configured or has no long name.
    pub fn title_complete_name(&self, name: &str) -> String {
        match self.titles.iter().find(|title| title.name == name) {
            Some(def) if !def.long_name.is_empty() => format!("{} [{}]", def.long_name, def.name),
            _ => name.to_string(),
        }
    }

    /// Label of the lifetime-points rollup line.
    pub fn lifetime_label(&self) -> String {
        let name = self
            .lifetime_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Lifetime");
        format!("{name} Points")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    #[serde(default)]
    pub levels: Vec<Level>,
}

impl Division {
    /// Finds the configured level a run's level name rolls into, along
    /// with its index. Sub-level names resolve to their parent level.
    pub fn level_for(&self, name: &str) -> Option<(usize, &Level)> {
        self.levels
            .iter()
            .enumerate()
            .find(|(_, level)| level.matches(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    #[serde(default)]
    pub sub_levels: Vec<String>,
}

impl Level {
    /// True for the level's own name or any of its sub-levels.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.sub_levels.iter().any(|sub| sub == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub has_partner: bool,
    #[serde(default)]
    pub scorings: Vec<ScoringMethod>,
}

impl Event {
    /// Resolves the scoring method that governs a run on `date`.
    ///
    /// Exact (division, level) matches win over a level wildcard, which
    /// wins over a division wildcard, which wins over a method open on
    /// both. Within one rank the first method in configuration order whose
    /// window contains the date is chosen.
    pub fn find_scoring(&self, division: &str, level: &str, date: NaiveDate) -> Option<&ScoringMethod> {
        self.scorings
            .iter()
            .filter(|method| method.valid.contains(date))
            .filter_map(|method| method.specificity(division, level).map(|rank| (rank, method)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, method)| method)
    }

    /// All point-bearing scoring methods that apply to (division, level),
    /// regardless of date, in configuration order.
    pub fn titling_scorings(&self, division: &str, level: &str) -> Vec<&ScoringMethod> {
        self.scorings
            .iter()
            .filter(|method| method.applies_to(division, level) && method.is_titling())
            .collect()
    }
}

/// A table row mapping a fault ceiling to points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointsRow {
    pub faults: f64,
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifetimeRow {
    pub faults: f64,
    pub points: f64,
    /// Award the run's speed points instead of a fixed value.
    #[serde(default)]
    pub use_speed_points: bool,
}

/// A per-placement value: placement points or a speed multiplier.
/// Place 0 acts as the catch-all for unlisted placements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceValue {
    pub place: u16,
    pub value: f64,
}

fn default_true() -> bool {
    true
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringMethod {
    /// Division this method applies to; `None` matches any division.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    /// Level this method applies to; `None` matches any level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub valid: DateRange,
    #[serde(default)]
    pub style: ScoringStyle,
    #[serde(default)]
    pub has_super_q: bool,
    #[serde(default)]
    pub has_speed_points: bool,
    #[serde(default)]
    pub has_bonus_points: bool,
    #[serde(default)]
    pub qs_must_be_clean: bool,
    #[serde(default = "default_true")]
    pub time_faults_over: bool,
    #[serde(default)]
    pub time_faults_under: bool,
    #[serde(default = "default_multiplier")]
    pub time_fault_multiplier: f64,
    #[serde(default)]
    pub title_points: Vec<PointsRow>,
    #[serde(default)]
    pub lifetime_points: Vec<LifetimeRow>,
    #[serde(default)]
    pub placements: Vec<PlaceValue>,
    #[serde(default)]
    pub speed_multipliers: Vec<PlaceValue>,
}

impl Default for ScoringMethod {
    fn default() -> Self {
        Self {
            division: None,
            level: None,
            valid: DateRange::ALL,
            style: ScoringStyle::default(),
            has_super_q: false,
            has_speed_points: false,
            has_bonus_points: false,
            qs_must_be_clean: false,
            time_faults_over: true,
            time_faults_under: false,
            time_fault_multiplier: 1.0,
            title_points: Vec::new(),
            lifetime_points: Vec::new(),
            placements: Vec::new(),
            speed_multipliers: Vec::new(),
        }
    }
}

impl ScoringMethod {
    pub fn applies_to(&self, division: &str, level: &str) -> bool {
        self.specificity(division, level).is_some()
    }

    /// Match rank for (division, level): 0 exact, 1 level wildcard,
    /// 2 division wildcard, 3 both open. `None` when it does not apply.
    pub fn specificity(&self, division: &str, level: &str) -> Option<u8> {
        let division_rank = match self.division.as_deref() {
            Some(name) if name == division => 0,
            Some(_) => return None,
            None => 2,
        };
        let level_rank = match self.level.as_deref() {
            Some(name) if name == level => 0,
            Some(_) => return None,
            None => 1,
        };
        Some(division_rank + level_rank)
    }

    /// A method is titling when runs scored under it can earn title or
    /// lifetime points.
    pub fn is_titling(&self) -> bool {
        !self.title_points.is_empty() || !self.lifetime_points.is_empty()
    }

    pub fn has_lifetime_points(&self) -> bool {
        !self.lifetime_points.is_empty()
    }

    pub fn has_placements(&self) -> bool {
        !self.placements.is_empty()
    }

    /// Points of the tightest row whose fault ceiling admits `score`.
    pub fn title_points_for(&self, score: f64) -> f64 {
        self.title_points
            .iter()
            .filter(|row| score <= row.faults)
            .min_by(|a, b| a.faults.total_cmp(&b.faults))
            .map_or(0.0, |row| row.points)
    }

    pub fn lifetime_points_for(&self, score: f64, speed_points: u32) -> f64 {
        self.lifetime_points
            .iter()
            .filter(|row| score <= row.faults)
            .min_by(|a, b| a.faults.total_cmp(&b.faults))
            .map_or(0.0, |row| {
                if row.use_speed_points {
                    f64::from(speed_points)
                } else {
                    row.points
                }
            })
    }

    pub fn placement_points_for(&self, place: u16) -> f64 {
        self.placements
            .iter()
            .find(|entry| entry.place == place)
            .map_or(0.0, |entry| entry.value)
    }

    /// Speed multiplier for a placement, falling back to the place-0 entry.
    pub fn speed_multiplier_for(&self, place: u16) -> Option<f64> {
        self.speed_multipliers
            .iter()
            .find(|entry| entry.place == place)
            .or_else(|| self.speed_multipliers.iter().find(|entry| entry.place == 0))
            .map(|entry| entry.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiQItem {
    pub division: String,
    pub level: String,
    pub event: String,
}

/// A combination award (e.g. "Double Q") earned by qualifying in several
/// events on the same day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiQDef {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub valid: DateRange,
    #[serde(default)]
    pub items: Vec<MultiQItem>,
}

impl MultiQDef {
    /// True when `run` is dated inside the award's validity window and sits
    /// in one of its (division, level, event) items. A definition with no
    /// items accepts any run of the venue.
    ///
    /// Item levels may name either the configured level or the run's
    /// sub-level.
    pub fn accepts(&self, venue: &Venue, run: &Run) -> bool {
        if !self.valid.contains(run.date) {
            return false;
        }
        if self.items.is_empty() {
            return true;
        }
        let Some((_, level)) = venue
            .find_division(&run.division)
            .and_then(|division| division.level_for(&run.level))
        else {
            return false;
        };
        self.items.iter().any(|item| {
            item.division == run.division
                && item.event == run.event
                && (item.level == level.name || item.level == run.level)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleDef {
    pub name: String,
    #[serde(default)]
    pub long_name: String,
}

/// A secondary points system tallied across all venues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherPointsDef {
    pub name: String,
    #[serde(default)]
    pub tally: TallyStrategy,
    #[serde(default)]
    pub description: String,
}
