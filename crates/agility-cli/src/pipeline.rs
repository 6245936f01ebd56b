//! Input loading and filter assembly for the CLI commands.
//!
//! A report run has three stages: load the snapshot, build the filters
//! (optional JSON file, then command-line overrides), and flatten the
//! aggregated lines into table rows.

use std::fs;
use std::path::Path;

use agility_model::{DateRange, Snapshot};
use agility_points::{
    AggregationFilters, COLUMN_COUNT, PointsReport, RunsView, SortOrder, VenueFilter,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Read and validate a configuration-plus-dog snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&text)
        .with_context(|| format!("parse snapshot {}", path.display()))?;
    debug!(
        path = %path.display(),
        venues = snapshot.config.venues.len(),
        trials = snapshot.dog.trials.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Read a filters file. Absent keys take their defaults.
pub fn load_filters(path: &Path) -> Result<AggregationFilters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read filters {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse filters {}", path.display()))
}

/// Command-line settings layered over the filters file.
#[derive(Debug, Clone, Default)]
pub struct FilterOverrides {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Replaces the file's venue list when non-empty.
    pub venues: Vec<VenueFilter>,
    pub runs_view: Option<RunsView>,
    pub lifetime_by_event: bool,
    pub sort: Option<SortOrder>,
    pub show_hidden_titles: bool,
    pub as_of: Option<NaiveDate>,
}

impl FilterOverrides {
    /// Apply the overrides. Boolean switches can only turn a setting on.
    pub fn apply(&self, mut filters: AggregationFilters) -> AggregationFilters {
        if self.from.is_some() || self.to.is_some() {
            filters.dates = DateRange {
                from: self.from.or(filters.dates.from),
                to: self.to.or(filters.dates.to),
            };
        }
        if !self.venues.is_empty() {
            filters.venues.clone_from(&self.venues);
        }
        if let Some(view) = self.runs_view {
            filters.runs_view = view;
        }
        filters.lifetime_by_event |= self.lifetime_by_event;
        if let Some(sort) = self.sort {
            filters.sort = sort;
        }
        filters.show_hidden_titles |= self.show_hidden_titles;
        if let Some(as_of) = self.as_of {
            filters.as_of = Some(as_of);
        }
        filters
    }
}

/// Filters from an optional file plus overrides, validated.
pub fn build_filters(
    path: Option<&Path>,
    overrides: &FilterOverrides,
) -> Result<AggregationFilters> {
    let base = match path {
        Some(path) => load_filters(path)?,
        None => AggregationFilters::default(),
    };
    let filters = overrides.apply(base);
    filters.validate().context("invalid filters")?;
    Ok(filters)
}

/// One printable line of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub kind: &'static str,
    pub columns: [String; COLUMN_COUNT],
}

/// Table rows for every non-marker line, in report order.
pub fn report_rows(report: &PointsReport<'_>) -> Vec<ReportRow> {
    report
        .iter()
        .filter(|line| !line.is_marker())
        .map(|line| ReportRow {
            kind: line.kind_name(),
            columns: line.columns(),
        })
        .collect()
}
