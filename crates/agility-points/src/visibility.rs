//! Visibility predicates.
//!
//! Every predicate is a pure function of the filters and the item; nothing
//! is cached on the model. The engine asks on demand and only consumes the
//! boolean answers.

use agility_model::{Run, Title, Trial};
use chrono::NaiveDate;

use crate::filters::{AggregationFilters, RunsView};

/// Outcome of [`run_visibility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunVisibility {
    /// The run would be listed under the current runs view.
    pub shown: bool,
    /// The run passes the date and venue filters and so counts toward Q
    /// tallies, whatever the runs view says.
    pub counts_for_q: bool,
}

/// The span `[start, end]` lies inside the date filter.
pub fn is_date_visible(filters: &AggregationFilters, start: NaiveDate, end: NaiveDate) -> bool {
    filters.dates.covers_span(start, end)
}

pub fn is_venue_visible(filters: &AggregationFilters, venue: &str) -> bool {
    filters.venues.is_empty() || filters.venues.iter().any(|entry| entry.venue == venue)
}

pub fn is_venue_division_visible(filters: &AggregationFilters, venue: &str, division: &str) -> bool {
    filters.venues.is_empty()
        || filters
            .venues
            .iter()
            .any(|entry| entry.venue == venue && entry.matches_division(division))
}

pub fn is_venue_level_visible(
    filters: &AggregationFilters,
    venue: &str,
    division: &str,
    level: &str,
) -> bool {
    filters.venues.is_empty()
        || filters
            .venues
            .iter()
            .any(|entry| entry.venue == venue && entry.matches_level(division, level))
}

/// Hidden titles need `show_hidden_titles`; undated titles are never shown.
pub fn is_title_visible(filters: &AggregationFilters, title: &Title) -> bool {
    if title.hidden && !filters.show_hidden_titles {
        return false;
    }
    match title.date {
        Some(date) if is_date_visible(filters, date, date) => is_venue_visible(filters, &title.venue),
        _ => false,
    }
}

/// A trial is visible when its span touches the date filter and at least
/// one of its clubs belongs to a visible venue.
pub fn is_trial_visible(filters: &AggregationFilters, trial: &Trial) -> bool {
    if !trial_touches_dates(filters, trial) {
        return false;
    }
    filters.venues.is_empty() || trial.venues().any(|venue| is_venue_visible(filters, venue))
}

fn trial_touches_dates(filters: &AggregationFilters, trial: &Trial) -> bool {
    match (trial.start_date(), trial.end_date()) {
        (Some(start), Some(end)) => filters.dates.touches_span(start, end),
        _ => true,
    }
}

/// Visibility of a run within its trial.
///
/// With a venue filter in place, some filter entry must name a venue of one
/// of the trial's clubs *and* match the run's division and level. Matching
/// the venue too keeps a run from leaking into view when another venue
/// happens to use the same division/level names.
pub fn run_visibility(filters: &AggregationFilters, trial: &Trial, run: &Run) -> RunVisibility {
    if !is_date_visible(filters, run.date, run.date) {
        return RunVisibility::default();
    }
    if !filters.venues.is_empty() {
        let matched = trial_touches_dates(filters, trial)
            && filters.venues.iter().any(|entry| {
                trial.has_venue(&entry.venue) && entry.matches_level(&run.division, &run.level)
            });
        if !matched {
            return RunVisibility::default();
        }
    }
    let shown = match filters.runs_view {
        RunsView::All => true,
        RunsView::Qualifying => run.q.is_qualified(),
        RunsView::NonQualifying => !run.q.is_qualified(),
    };
    RunVisibility {
        shown,
        counts_for_q: true,
    }
}

/// Extra check for trials co-sanctioned by several venues: the run must be
/// in view for `venue` specifically, not just for one of the trial's venues.
pub fn is_run_visible_in_venue(
    filters: &AggregationFilters,
    venue: &str,
    trial: &Trial,
    run: &Run,
) -> bool {
    if trial.clubs.len() <= 1 || filters.venues.is_empty() {
        return true;
    }
    trial.has_venue(venue)
        && filters
            .venues
            .iter()
            .any(|entry| entry.venue == venue && entry.matches_level(&run.division, &run.level))
}

/// The visibility the tallies use: counts for Q and visible in this venue.
pub fn is_run_tallied(filters: &AggregationFilters, venue: &str, trial: &Trial, run: &Run) -> bool {
    run_visibility(filters, trial, run).counts_for_q
        && is_run_visible_in_venue(filters, venue, trial, run)
}
