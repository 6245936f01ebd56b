//! MultiQ tallies.

use std::collections::BTreeSet;

use agility_model::{Dog, ExistingPointsKind, Trial, Venue};
use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::existing::{ExistingScope, existing_records, existing_total};
use crate::filters::AggregationFilters;
use crate::lines::{DetailRecord, MultiQLine};
use crate::visibility::is_run_tallied;

/// One line per MultiQ definition of `venue` that was earned or adjusted,
/// in configuration order.
///
/// Awards are counted once per (date, trial): a dog cannot earn the same
/// MultiQ twice on one day at one trial, however many runs carry it. A run
/// only counts when the definition accepts it (validity window and items).
pub(crate) fn tally_multi_qs<'a>(
    venue: &'a Venue,
    dog: &'a Dog,
    trials: &[(usize, &'a Trial)],
    filters: &AggregationFilters,
) -> Vec<MultiQLine<'a>> {
    let mut lines = Vec::new();
    for def in &venue.multi_qs {
        let mut awarded: BTreeSet<(NaiveDate, usize)> = BTreeSet::new();
        let mut records = Vec::new();

        for &(trial_index, trial) in trials {
            for run in &trial.runs {
                if !run.multi_qs.iter().any(|name| *name == def.name) {
                    continue;
                }
                if !def.accepts(venue, run) {
                    trace!(
                        venue = venue.name.as_str(),
                        multi_q = def.name.as_str(),
                        date = %run.date,
                        event = run.event.as_str(),
                        "multi-q award outside its definition; skipped"
                    );
                    continue;
                }
                if !is_run_tallied(filters, &venue.name, trial, run) {
                    continue;
                }
                records.push(DetailRecord::Run { trial, run });
                awarded.insert((run.date, trial_index));
            }
        }

        let scope = ExistingScope::venue(&venue.name)
            .with_multi_q(&def.name)
            .within(filters.dates);
        let existing = existing_total(dog, ExistingPointsKind::MultiQ, &scope);
        records.extend(
            existing_records(dog, ExistingPointsKind::MultiQ, &scope).map(DetailRecord::Existing),
        );

        if awarded.is_empty() && existing == 0.0 {
            continue;
        }
        debug!(
            venue = venue.name.as_str(),
            multi_q = def.name.as_str(),
            awards = awarded.len(),
            existing,
            "multi-q tallied"
        );
        lines.push(MultiQLine {
            venue: venue.name.clone(),
            name: def.name.clone(),
            short_name: def.short_name.clone(),
            awards: awarded.len(),
            existing,
            records,
        });
    }
    lines
}
