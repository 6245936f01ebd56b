//! Type-safe enumerations for run outcomes and points bookkeeping.
//!
//! These enums replace the short string tokens used in exported run
//! records ("Q", "NQ", "SQ", ...) with closed sets the engine can match on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Qualification outcome of a single run.
///
/// - **NotApplicable**: the run does not count toward any tally (fun runs, FEO).
/// - **Qualified**: a qualifying run.
/// - **NotQualified**: completed without qualifying.
/// - **Eliminated**: whistled off or otherwise eliminated.
/// - **SuperQ**: a qualifying run that also earned a Super-Q.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QStatus {
    #[serde(rename = "NA")]
    #[default]
    NotApplicable,
    #[serde(rename = "Q")]
    Qualified,
    #[serde(rename = "NQ")]
    NotQualified,
    #[serde(rename = "E")]
    Eliminated,
    #[serde(rename = "SQ")]
    SuperQ,
}

impl QStatus {
    /// Returns the short token used in run records.
    pub fn as_str(&self) -> &'static str {
        match self {
            QStatus::NotApplicable => "NA",
            QStatus::Qualified => "Q",
            QStatus::NotQualified => "NQ",
            QStatus::Eliminated => "E",
            QStatus::SuperQ => "SQ",
        }
    }

    /// Returns true for Q and SuperQ.
    pub fn is_qualified(&self) -> bool {
        matches!(self, QStatus::Qualified | QStatus::SuperQ)
    }

    /// Returns true when the run may be counted in event tallies.
    /// N/A runs are excluded from every tally.
    pub fn allows_tally(&self) -> bool {
        !matches!(self, QStatus::NotApplicable)
    }
}

impl fmt::Display for QStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QStatus {
    type Err = ModelError;

    /// Parse a Q token (case-insensitive). Accepts the short tokens and
    /// the spelled-out forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "NA" | "N/A" | "" => Ok(QStatus::NotApplicable),
            "Q" | "QUALIFIED" => Ok(QStatus::Qualified),
            "NQ" | "NOT QUALIFIED" => Ok(QStatus::NotQualified),
            "E" | "ELIMINATED" => Ok(QStatus::Eliminated),
            "SQ" | "SUPERQ" | "SUPER Q" => Ok(QStatus::SuperQ),
            _ => Err(ModelError::UnknownToken {
                kind: "Q status",
                value: s.to_string(),
            }),
        }
    }
}

/// Kind of a manual existing-points adjustment.
///
/// Existing points let a competitor carry history that predates their
/// records (or was never entered run by run) into the tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingPointsKind {
    /// Points for a configured other-points definition.
    OtherPoints,
    /// Title points for a (venue, division, level, event).
    Runs,
    /// Speed points for a (venue, division, level).
    Speed,
    /// Additional MultiQ awards for a venue's MultiQ definition.
    MultiQ,
    /// Additional Super-Q counts for a (venue, division, level, event).
    SuperQ,
}

impl ExistingPointsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExistingPointsKind::OtherPoints => "Other Points",
            ExistingPointsKind::Runs => "Runs",
            ExistingPointsKind::Speed => "Speed",
            ExistingPointsKind::MultiQ => "MultiQ",
            ExistingPointsKind::SuperQ => "SuperQ",
        }
    }

    /// Returns true for kinds that belong to a venue's runs section.
    pub fn is_venue_scoped(&self) -> bool {
        !matches!(self, ExistingPointsKind::OtherPoints)
    }
}

impl fmt::Display for ExistingPointsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExistingPointsKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "OTHER POINTS" | "OTHERPOINTS" | "OTHER" => Ok(ExistingPointsKind::OtherPoints),
            "RUNS" | "RUN" | "TITLE" => Ok(ExistingPointsKind::Runs),
            "SPEED" => Ok(ExistingPointsKind::Speed),
            "MULTIQ" | "MULTI Q" | "MQ" => Ok(ExistingPointsKind::MultiQ),
            "SUPERQ" | "SUPER Q" | "SQ" => Ok(ExistingPointsKind::SuperQ),
            _ => Err(ModelError::UnknownToken {
                kind: "existing points kind",
                value: s.to_string(),
            }),
        }
    }
}

/// How an other-points definition groups its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyStrategy {
    /// A single running total.
    #[default]
    All,
    /// One subtotal per event name.
    AllByEvent,
    /// One subtotal per level name.
    Level,
    /// One subtotal per (level, event) pair.
    LevelByEvent,
}

impl TallyStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TallyStrategy::All => "All",
            TallyStrategy::AllByEvent => "All by event",
            TallyStrategy::Level => "Level",
            TallyStrategy::LevelByEvent => "Level by event",
        }
    }

    /// Grouped strategies emit a header line before their subtotals.
    pub fn has_header(&self) -> bool {
        !matches!(self, TallyStrategy::All)
    }
}

impl fmt::Display for TallyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TallyStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "ALL" => Ok(TallyStrategy::All),
            "ALL BY EVENT" | "ALLBYEVENT" => Ok(TallyStrategy::AllByEvent),
            "LEVEL" => Ok(TallyStrategy::Level),
            "LEVEL BY EVENT" | "LEVELBYEVENT" => Ok(TallyStrategy::LevelByEvent),
            _ => Err(ModelError::UnknownToken {
                kind: "tally strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// Scoring style of a scoring method.
///
/// Only the styles that change points arithmetic are distinguished;
/// placement ordering rules are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStyle {
    /// Faults decide, time breaks ties.
    #[default]
    FaultsThenTime,
    /// Time plus faults, compared against standard course time.
    TimePlusFaults,
    /// Points earned decide, time breaks ties.
    ScoreThenTime,
    /// Opening and closing points decide, time breaks ties.
    OpenCloseThenTime,
    /// Qualification only.
    PassFail,
}

impl ScoringStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStyle::FaultsThenTime => "Faults then time",
            ScoringStyle::TimePlusFaults => "Time plus faults",
            ScoringStyle::ScoreThenTime => "Score then time",
            ScoringStyle::OpenCloseThenTime => "Opening/closing points then time",
            ScoringStyle::PassFail => "Pass/fail",
        }
    }
}

impl fmt::Display for ScoringStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
