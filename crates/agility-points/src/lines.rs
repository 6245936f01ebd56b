//! Line items produced by an aggregation pass.
//!
//! A report is a flat sequence of heterogeneous lines. Each kind exposes
//! the same contract:
//!
//! - `text(column)`: display text for one of the nine report columns;
//! - `is_same_item(other)`: identity equality, used by callers to restore
//!   a selection after the report is rebuilt;
//! - `details()`: the runs and existing-points records behind the line.
//!
//! Column layout (0-based): 0 venue, 1-3 division/level/event or labels,
//! 4 run counts, 5 Q counts, 6 points, 7 Super-Q/speed/MultiQ, 8 speed
//! when column 7 holds Super-Qs.

use agility_model::{DateRange, Dog, ExistingPoints, RegNum, Run, Title, Trial, Venue};
use chrono::NaiveDate;

/// Number of text columns a line can fill.
pub const COLUMN_COUNT: usize = 9;

/// Render a points value: rounded to three decimals, no trailing zeros.
pub fn format_points(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// A record contributing to a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailRecord<'a> {
    Run { trial: &'a Trial, run: &'a Run },
    Existing(&'a ExistingPoints),
}

/// Invisible lines delimiting report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionMarker {
    TitlesStart,
    RunsStart,
    OtherPointsStart,
    TableEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub first: String,
    pub second: String,
    /// Whether the HTML renderer emits a row for this line.
    pub in_html: bool,
}

impl TextLine {
    pub fn blank() -> Self {
        Self {
            first: String::new(),
            second: String::new(),
            in_html: false,
        }
    }

    fn text(&self, column: usize) -> String {
        match column {
            0 => self.first.clone(),
            1 => self.second.clone(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DogLine<'a> {
    pub dog: &'a Dog,
    pub as_of: Option<NaiveDate>,
}

impl DogLine<'_> {
    fn text(&self, column: usize) -> String {
        match column {
            1 => self.dog.call_name.clone(),
            2 => self.dog.registered_name.clone(),
            7 => self.as_of.map(|date| date.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueLine<'a> {
    pub venue: &'a Venue,
    pub reg_num: Option<&'a RegNum>,
}

impl VenueLine<'_> {
    fn text(&self, column: usize) -> String {
        match column {
            0 => self.venue.name.clone(),
            1 => self
                .reg_num
                .map(|reg| format!("[{}]", reg.number))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleLine<'a> {
    pub title: &'a Title,
    /// `Long Name [NAME]` as configured for the venue.
    pub complete_name: String,
}

impl TitleLine<'_> {
    fn text(&self, column: usize) -> String {
        match column {
            1 => self.title.date.map(|date| date.to_string()).unwrap_or_default(),
            2 => {
                let mut name = self.complete_name.clone();
                if self.title.received {
                    name.push('*');
                }
                name
            }
            _ => String::new(),
        }
    }
}

/// Tally for one (venue, division, level, event) under one scoring method.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLine<'a> {
    pub venue: String,
    pub division: String,
    pub division_index: usize,
    pub level: String,
    pub level_index: usize,
    pub event: String,
    pub event_index: usize,
    /// Validity of the scoring method, set when the event has more than
    /// one method in range and lines need telling apart.
    pub window: Option<DateRange>,
    pub runs: usize,
    pub judges: usize,
    /// Distinct partners, for partner events only.
    pub partners: Option<usize>,
    pub qs: usize,
    pub clean_qs: usize,
    pub q_judges: usize,
    pub q_partners: Option<usize>,
    pub points: f64,
    /// Super-Q count when the method awards them.
    pub super_qs: Option<u32>,
    /// Speed points when the method awards them.
    pub speed_points: Option<u32>,
    pub records: Vec<DetailRecord<'a>>,
}

impl EventLine<'_> {
    /// Percentage of visible runs that qualified, truncated.
    pub fn q_percent(&self) -> usize {
        if self.runs == 0 {
            0
        } else {
            self.qs * 100 / self.runs
        }
    }

    fn super_q_text(&self) -> Option<String> {
        self.super_qs.map(|count| format!("{count} SQs"))
    }

    fn speed_text(&self) -> Option<String> {
        self.speed_points
            .filter(|points| *points > 0)
            .map(|points| format!("{points} Speed Points"))
    }

    fn text(&self, column: usize) -> String {
        match column {
            1 => self.division.clone(),
            2 => self.level.clone(),
            3 => match &self.window {
                Some(window) => format!("{} ({window})", self.event),
                None => self.event.clone(),
            },
            4 => {
                let mut text = format!("{} Runs, {} Judges", self.runs, self.judges);
                if let Some(partners) = self.partners.filter(|count| *count > 0) {
                    text.push_str(&format!(", {partners} Partners"));
                }
                text
            }
            5 => {
                let mut text = format!("{} Qs ({}%)", self.qs, self.q_percent());
                if self.clean_qs > 0 {
                    text.push_str(&format!(", {} Clean", self.clean_qs));
                }
                if self.q_judges > 0 {
                    text.push_str(&format!(", {} Judges", self.q_judges));
                }
                if let Some(partners) = self.q_partners.filter(|count| *count > 0) {
                    text.push_str(&format!(", {partners} Partners"));
                }
                text
            }
            6 => format_points(self.points),
            7 => self
                .super_q_text()
                .or_else(|| self.speed_text())
                .unwrap_or_default(),
            8 => match (self.super_q_text(), self.speed_text()) {
                (Some(_), Some(speed)) => speed,
                _ => String::new(),
            },
            _ => String::new(),
        }
    }
}

/// Which rollup a lifetime line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifetimeKind {
    Lifetime,
    Placement,
}

/// One row of a lifetime breakdown: (division, level) or (event, "").
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeInfo {
    pub first: String,
    pub second: String,
    /// True total, filtered share included.
    pub points: f64,
    /// Share earned by runs currently hidden.
    pub filtered: f64,
}

fn split_total(total: f64, filtered: f64) -> String {
    if filtered > 0.0 {
        format!("{} ({})", format_points(total - filtered), format_points(total))
    } else {
        format_points(total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeLine {
    pub venue: String,
    pub kind: LifetimeKind,
    pub label: String,
    pub entries: Vec<LifetimeInfo>,
    pub points: f64,
    pub filtered: f64,
}

impl LifetimeLine {
    pub fn visible(&self) -> f64 {
        self.points - self.filtered
    }

    fn text(&self, column: usize) -> String {
        match column {
            1 => self.label.clone(),
            2 => format!("Total: {}", split_total(self.points, self.filtered)),
            _ => String::new(),
        }
    }
}

/// Per-division lifetime subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeByNameLine {
    pub venue: String,
    pub kind: LifetimeKind,
    pub name: String,
    pub entries: Vec<LifetimeInfo>,
    pub points: f64,
    pub filtered: f64,
}

impl LifetimeByNameLine {
    pub fn visible(&self) -> f64 {
        self.points - self.filtered
    }

    fn text(&self, column: usize) -> String {
        match column {
            2 => format!("{}: {}", self.name, split_total(self.points, self.filtered)),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedPointsLine<'a> {
    pub venue: String,
    pub division: String,
    pub points: f64,
    pub records: Vec<DetailRecord<'a>>,
}

impl SpeedPointsLine<'_> {
    fn text(&self, column: usize) -> String {
        match column {
            1 => self.division.clone(),
            7 => format!("{} Speed Points", format_points(self.points)),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiQLine<'a> {
    pub venue: String,
    pub name: String,
    pub short_name: String,
    /// Distinct (date, trial) awards from visible runs.
    pub awards: usize,
    pub existing: f64,
    pub records: Vec<DetailRecord<'a>>,
}

impl MultiQLine<'_> {
    pub fn total(&self) -> f64 {
        self.awards as f64 + self.existing
    }

    fn text(&self, column: usize) -> String {
        match column {
            7 => format!("{} {}", format_points(self.total()), self.short_name),
            _ => String::new(),
        }
    }
}

/// Normalized other-points entry, from a run or an existing-points record.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherPtInfo<'a> {
    pub date: NaiveDate,
    pub venue: String,
    pub division: String,
    pub level: String,
    pub event: String,
    pub score: f64,
    pub source: DetailRecord<'a>,
}

impl<'a> OtherPtInfo<'a> {
    pub fn from_run(trial: &'a Trial, run: &'a Run, score: f64) -> Self {
        Self {
            date: run.date,
            venue: trial.primary_venue().unwrap_or_default().to_string(),
            division: run.division.clone(),
            level: run.level.clone(),
            event: run.event.clone(),
            score,
            source: DetailRecord::Run { trial, run },
        }
    }

    pub fn from_existing(existing: &'a ExistingPoints) -> Self {
        Self {
            date: existing.date,
            venue: existing.venue.clone(),
            division: existing.division.clone(),
            level: existing.level.clone(),
            event: existing.event.clone(),
            score: existing.points,
            source: DetailRecord::Existing(existing),
        }
    }
}

/// Grouping bucket of an other-points line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OtherPointsBucket {
    All,
    Event(String),
    Level(String),
    LevelEvent { level: String, event: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherPointsLine<'a> {
    pub definition: String,
    pub bucket: OtherPointsBucket,
    pub score: f64,
    pub entries: Vec<OtherPtInfo<'a>>,
}

impl OtherPointsLine<'_> {
    fn text(&self, column: usize) -> String {
        let score = format_points(self.score);
        match (&self.bucket, column) {
            (OtherPointsBucket::All, 1) => self.definition.clone(),
            (OtherPointsBucket::All, 2) => score,
            (OtherPointsBucket::Event(event), 2) => event.clone(),
            (OtherPointsBucket::Event(_), 3) => score,
            (OtherPointsBucket::Level(level), 2) => level.clone(),
            (OtherPointsBucket::Level(_), 3) => score,
            (OtherPointsBucket::LevelEvent { level, .. }, 2) => level.clone(),
            (OtherPointsBucket::LevelEvent { event, .. }, 3) => event.clone(),
            (OtherPointsBucket::LevelEvent { .. }, 4) => score,
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointsLine<'a> {
    Marker(SectionMarker),
    Text(TextLine),
    Dog(DogLine<'a>),
    Venue(VenueLine<'a>),
    Title(TitleLine<'a>),
    Event(EventLine<'a>),
    Lifetime(LifetimeLine),
    LifetimeByName(LifetimeByNameLine),
    SpeedPoints(SpeedPointsLine<'a>),
    MultiQ(MultiQLine<'a>),
    OtherPoints(OtherPointsLine<'a>),
}

impl<'a> PointsLine<'a> {
    /// Display text for `column`; empty for columns the line does not use.
    pub fn text(&self, column: usize) -> String {
        match self {
            PointsLine::Marker(_) => String::new(),
            PointsLine::Text(line) => line.text(column),
            PointsLine::Dog(line) => line.text(column),
            PointsLine::Venue(line) => line.text(column),
            PointsLine::Title(line) => line.text(column),
            PointsLine::Event(line) => line.text(column),
            PointsLine::Lifetime(line) => line.text(column),
            PointsLine::LifetimeByName(line) => line.text(column),
            PointsLine::SpeedPoints(line) => line.text(column),
            PointsLine::MultiQ(line) => line.text(column),
            PointsLine::OtherPoints(line) => line.text(column),
        }
    }

    /// All columns, for tabular output.
    pub fn columns(&self) -> [String; COLUMN_COUNT] {
        std::array::from_fn(|column| self.text(column))
    }

    /// Identity equality: the "same" line across two passes, even if its
    /// numbers changed. Text lines and markers are never the same item.
    pub fn is_same_item(&self, other: &PointsLine<'_>) -> bool {
        match (self, other) {
            (PointsLine::Dog(a), PointsLine::Dog(b)) => a.dog.call_name == b.dog.call_name,
            (PointsLine::Venue(a), PointsLine::Venue(b)) => a.venue.name == b.venue.name,
            (PointsLine::Title(a), PointsLine::Title(b)) => {
                a.title.venue == b.title.venue && a.title.name == b.title.name
            }
            (PointsLine::Event(a), PointsLine::Event(b)) => {
                a.venue == b.venue
                    && a.division == b.division
                    && a.level == b.level
                    && a.event == b.event
                    && a.window == b.window
            }
            (PointsLine::Lifetime(a), PointsLine::Lifetime(b)) => {
                a.venue == b.venue && a.kind == b.kind
            }
            (PointsLine::LifetimeByName(a), PointsLine::LifetimeByName(b)) => {
                a.venue == b.venue && a.kind == b.kind && a.name == b.name
            }
            (PointsLine::SpeedPoints(a), PointsLine::SpeedPoints(b)) => {
                a.venue == b.venue && a.division == b.division
            }
            (PointsLine::MultiQ(a), PointsLine::MultiQ(b)) => a.venue == b.venue && a.name == b.name,
            (PointsLine::OtherPoints(a), PointsLine::OtherPoints(b)) => {
                a.definition == b.definition && a.bucket == b.bucket
            }
            _ => false,
        }
    }

    /// Runs and existing-points records behind the line.
    pub fn details(&self) -> Vec<DetailRecord<'a>> {
        match self {
            PointsLine::Event(line) => line.records.clone(),
            PointsLine::SpeedPoints(line) => line.records.clone(),
            PointsLine::MultiQ(line) => line.records.clone(),
            PointsLine::OtherPoints(line) => line.entries.iter().map(|entry| entry.source).collect(),
            _ => Vec::new(),
        }
    }

    /// Markers carry no text and are skipped by tabular output.
    pub fn is_marker(&self) -> bool {
        matches!(self, PointsLine::Marker(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PointsLine::Marker(_) => "marker",
            PointsLine::Text(_) => "text",
            PointsLine::Dog(_) => "dog",
            PointsLine::Venue(_) => "venue",
            PointsLine::Title(_) => "title",
            PointsLine::Event(_) => "event",
            PointsLine::Lifetime(_) => "lifetime",
            PointsLine::LifetimeByName(_) => "lifetime-by-name",
            PointsLine::SpeedPoints(_) => "speed",
            PointsLine::MultiQ(_) => "multi-q",
            PointsLine::OtherPoints(_) => "other-points",
        }
    }
}
