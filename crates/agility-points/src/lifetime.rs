//! Lifetime and placement points rollups.
//!
//! Points are accumulated per (division, level) as tuples tagged with the
//! event name and whether the contributing run is currently hidden. The
//! rollup keeps hidden points in the true total and reports them as a
//! separate filtered share, so `visible + filtered == total` holds at
//! every grouping level.

use std::collections::{BTreeMap, BTreeSet};

use crate::lines::{LifetimeByNameLine, LifetimeInfo, LifetimeKind, LifetimeLine, PointsLine};

#[derive(Debug, Clone, PartialEq)]
pub struct LifetimePoint {
    pub event: String,
    pub points: f64,
    pub filtered: bool,
}

/// Accumulator for one (division, level).
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimePoints {
    pub division: String,
    pub level: String,
    pub points: Vec<LifetimePoint>,
}

impl LifetimePoints {
    pub fn new(division: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            division: division.into(),
            level: level.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, event: &str, points: f64, filtered: bool) {
        self.points.push(LifetimePoint {
            event: event.to_string(),
            points,
            filtered,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|point| point.points).sum()
    }

    pub fn filtered(&self) -> f64 {
        self.points
            .iter()
            .filter(|point| point.filtered)
            .map(|point| point.points)
            .sum()
    }
}

/// Build the rollup lines for one venue.
///
/// The venue line breaks down by (division, level), or by event name when
/// `by_event` is set. Division subtotal lines follow only when more than
/// one division contributed.
pub fn rollup_lines<'a>(
    venue: &str,
    kind: LifetimeKind,
    label: &str,
    accumulators: &[LifetimePoints],
    by_event: bool,
) -> Vec<PointsLine<'a>> {
    let accumulators: Vec<&LifetimePoints> = accumulators.iter().filter(|acc| !acc.is_empty()).collect();
    if accumulators.is_empty() {
        return Vec::new();
    }

    let entries = if by_event {
        let names: BTreeSet<&str> = accumulators
            .iter()
            .flat_map(|acc| acc.points.iter().map(|point| point.event.as_str()))
            .collect();
        names
            .into_iter()
            .map(|name| {
                let (points, filtered) = accumulators
                    .iter()
                    .flat_map(|acc| acc.points.iter())
                    .filter(|point| point.event == name)
                    .fold((0.0, 0.0), |(total, hidden), point| {
                        let hidden = if point.filtered { hidden + point.points } else { hidden };
                        (total + point.points, hidden)
                    });
                LifetimeInfo {
                    first: name.to_string(),
                    second: String::new(),
                    points,
                    filtered,
                }
            })
            .collect()
    } else {
        accumulators.iter().copied().map(level_info).collect()
    };

    let mut by_division: BTreeMap<&str, Vec<LifetimeInfo>> = BTreeMap::new();
    for acc in &accumulators {
        by_division
            .entry(acc.division.as_str())
            .or_default()
            .push(level_info(acc));
    }

    let points = accumulators.iter().copied().map(LifetimePoints::total).sum();
    let filtered = accumulators.iter().copied().map(LifetimePoints::filtered).sum();
    let mut lines = vec![PointsLine::Lifetime(LifetimeLine {
        venue: venue.to_string(),
        kind,
        label: label.to_string(),
        entries,
        points,
        filtered,
    })];

    if by_division.len() > 1 {
        lines.extend(by_division.into_iter().map(|(division, entries)| {
            let points = entries.iter().map(|info| info.points).sum();
            let filtered = entries.iter().map(|info| info.filtered).sum();
            PointsLine::LifetimeByName(LifetimeByNameLine {
                venue: venue.to_string(),
                kind,
                name: division.to_string(),
                entries,
                points,
                filtered,
            })
        }));
    }
    lines
}

fn level_info(acc: &LifetimePoints) -> LifetimeInfo {
    LifetimeInfo {
        first: acc.division.clone(),
        second: acc.level.clone(),
        points: acc.total(),
        filtered: acc.filtered(),
    }
}
