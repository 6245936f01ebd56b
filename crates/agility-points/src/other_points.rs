//! Other-points tallies.
//!
//! Other points are a secondary, venue-independent system: each definition
//! collects scores recorded on runs under its name plus any existing-points
//! records naming it, then groups them according to its tally strategy.
//! Existing records are never filtered.

use std::collections::BTreeSet;

use agility_model::{Dog, ExistingPointsKind, OtherPointsDef, TallyStrategy};
use tracing::debug;

use crate::filters::AggregationFilters;
use crate::lines::{OtherPointsBucket, OtherPointsLine, OtherPtInfo, PointsLine, TextLine};
use crate::visibility::{is_trial_visible, run_visibility};

/// Every entry contributing to `def`, runs first, then existing records.
pub fn collect_entries<'a>(
    def: &OtherPointsDef,
    dog: &'a Dog,
    filters: &AggregationFilters,
) -> Vec<OtherPtInfo<'a>> {
    let mut entries = Vec::new();
    for trial in dog.trials.iter().filter(|trial| is_trial_visible(filters, trial)) {
        for run in &trial.runs {
            if !run_visibility(filters, trial, run).counts_for_q {
                continue;
            }
            entries.extend(
                run.other_points
                    .iter()
                    .filter(|points| points.name == def.name)
                    .map(|points| OtherPtInfo::from_run(trial, run, points.points)),
            );
        }
    }
    entries.extend(
        dog.existing_points
            .iter()
            .filter(|existing| {
                existing.kind == ExistingPointsKind::OtherPoints && existing.other_points == def.name
            })
            .map(OtherPtInfo::from_existing),
    );
    entries
}

/// Lines for one definition: an optional header followed by one line per
/// bucket. Nothing at all when the definition has no entries.
pub fn tally_definition<'a>(
    def: &OtherPointsDef,
    entries: Vec<OtherPtInfo<'a>>,
) -> Vec<PointsLine<'a>> {
    if entries.is_empty() {
        return Vec::new();
    }

    let bucket_of = |entry: &OtherPtInfo<'_>| match def.tally {
        TallyStrategy::All => OtherPointsBucket::All,
        TallyStrategy::AllByEvent => OtherPointsBucket::Event(entry.event.clone()),
        TallyStrategy::Level => OtherPointsBucket::Level(entry.level.clone()),
        TallyStrategy::LevelByEvent => OtherPointsBucket::LevelEvent {
            level: entry.level.clone(),
            event: entry.event.clone(),
        },
    };
    let buckets: BTreeSet<OtherPointsBucket> = entries.iter().map(bucket_of).collect();

    let mut lines = Vec::with_capacity(buckets.len() + 1);
    if def.tally.has_header() {
        lines.push(PointsLine::Text(TextLine {
            first: String::new(),
            second: def.name.clone(),
            in_html: true,
        }));
    }
    for bucket in buckets {
        let members: Vec<OtherPtInfo<'a>> = entries
            .iter()
            .filter(|entry| bucket_of(entry) == bucket)
            .cloned()
            .collect();
        let score = members.iter().map(|entry| entry.score).sum();
        lines.push(PointsLine::OtherPoints(OtherPointsLine {
            definition: def.name.clone(),
            bucket,
            score,
            entries: members,
        }));
    }
    debug!(
        definition = def.name.as_str(),
        strategy = def.tally.as_str(),
        entries = entries.len(),
        lines = lines.len(),
        "other points tallied"
    );
    lines
}
