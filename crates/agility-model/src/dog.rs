//! A dog's recorded history: titles, trials with their runs, and manual
//! existing-points adjustments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{ExistingPointsKind, QStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub call_name: String,
    #[serde(default)]
    pub registered_name: String,
    #[serde(default)]
    pub reg_nums: Vec<RegNum>,
    #[serde(default)]
    pub titles: Vec<Title>,
    #[serde(default)]
    pub trials: Vec<Trial>,
    #[serde(default)]
    pub existing_points: Vec<ExistingPoints>,
}

impl Dog {
    pub fn reg_num_for(&self, venue: &str) -> Option<&RegNum> {
        self.reg_nums.iter().find(|reg| reg.venue == venue)
    }

    /// True when any non-other-points adjustment is recorded for `venue`.
    pub fn has_existing_points_in(&self, venue: &str) -> bool {
        self.existing_points
            .iter()
            .any(|existing| existing.kind.is_venue_scoped() && existing.venue == venue)
    }

    /// Trials held (at least partly) under `venue`, with their index.
    pub fn trials_in<'a>(&'a self, venue: &'a str) -> impl Iterator<Item = (usize, &'a Trial)> + 'a {
        self.trials
            .iter()
            .enumerate()
            .filter(move |(_, trial)| trial.has_venue(venue))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegNum {
    pub venue: String,
    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub venue: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub received: bool,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub name: String,
    pub venue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub clubs: Vec<Club>,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Trial {
    /// The first club's venue; a trial without clubs has none.
    pub fn primary_venue(&self) -> Option<&str> {
        self.clubs.first().map(|club| club.venue.as_str())
    }

    pub fn has_venue(&self, venue: &str) -> bool {
        self.clubs.iter().any(|club| club.venue == venue)
    }

    pub fn venues(&self) -> impl Iterator<Item = &str> {
        self.clubs.iter().map(|club| club.venue.as_str())
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.runs.iter().map(|run| run.date).min()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.runs.iter().map(|run| run.date).max()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(default)]
    pub handler: String,
    pub dog: String,
    #[serde(default)]
    pub reg_num: String,
}

impl Partner {
    /// Identity used when counting distinct partners.
    pub fn key(&self) -> String {
        format!("{}{}", self.dog, self.reg_num)
    }
}

/// Raw scoring inputs as recorded for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunScoring {
    ByTime {
        #[serde(default)]
        course_faults: f64,
        #[serde(default)]
        time: f64,
        #[serde(default)]
        sct: f64,
    },
    ByPoints {
        #[serde(default)]
        need_open: f64,
        #[serde(default)]
        open: f64,
        #[serde(default)]
        course_faults: f64,
        #[serde(default)]
        time: f64,
        #[serde(default)]
        sct: f64,
    },
    ByOpenClose {
        #[serde(default)]
        need_open: f64,
        #[serde(default)]
        need_close: f64,
        #[serde(default)]
        open: f64,
        #[serde(default)]
        close: f64,
        #[serde(default)]
        course_faults: f64,
        #[serde(default)]
        time: f64,
        #[serde(default)]
        sct: f64,
    },
    PassFail,
}

impl Default for RunScoring {
    fn default() -> Self {
        RunScoring::ByTime {
            course_faults: 0.0,
            time: 0.0,
            sct: 0.0,
        }
    }
}

impl RunScoring {
    pub fn time(&self) -> f64 {
        match *self {
            RunScoring::ByTime { time, .. }
            | RunScoring::ByPoints { time, .. }
            | RunScoring::ByOpenClose { time, .. } => time,
            RunScoring::PassFail => 0.0,
        }
    }

    pub fn sct(&self) -> f64 {
        match *self {
            RunScoring::ByTime { sct, .. }
            | RunScoring::ByPoints { sct, .. }
            | RunScoring::ByOpenClose { sct, .. } => sct,
            RunScoring::PassFail => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOtherPoints {
    pub name: String,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub date: NaiveDate,
    pub division: String,
    pub level: String,
    pub event: String,
    #[serde(default)]
    pub sub_name: String,
    #[serde(default)]
    pub q: QStatus,
    /// Placement; 0 when unplaced.
    #[serde(default)]
    pub place: u16,
    #[serde(default)]
    pub in_class: u16,
    #[serde(default)]
    pub judge: String,
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub scoring: RunScoring,
    #[serde(default)]
    pub bonus_points: f64,
    #[serde(default)]
    pub other_points: Vec<RunOtherPoints>,
    /// Names of MultiQ awards this run contributed to.
    #[serde(default)]
    pub multi_qs: Vec<String>,
}

/// A manual points adjustment.
///
/// Which fields matter depends on `kind`: Runs and SuperQ use the full
/// (venue, division, level, event) scope, Speed stops at level, MultiQ
/// uses venue and `multi_q`, OtherPoints uses `other_points` and carries
/// the rest only for grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingPoints {
    pub kind: ExistingPointsKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub multi_q: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub sub_name: String,
    #[serde(default)]
    pub other_points: String,
    pub points: f64,
    #[serde(default)]
    pub comment: String,
}
