//! Per-venue event tallies: title points, Q counts, Super-Qs, speed points,
//! and the lifetime/placement accumulation that rides along.

use std::collections::BTreeSet;
use std::ptr;

use agility_model::{
    DateRange, Division, Dog, Event, ExistingPoints, ExistingPointsKind, Level, QStatus,
    ScoringMethod, Trial, Venue,
};
use tracing::trace;

use crate::existing::{ExistingScope, existing_records};
use crate::filters::{AggregationFilters, SortKey};
use crate::lifetime::LifetimePoints;
use crate::lines::{DetailRecord, EventLine, SpeedPointsLine};
use crate::scorer::RunScorer;
use crate::visibility::{is_run_tallied, is_venue_level_visible};

/// Everything the runs section of one venue needs.
#[derive(Debug, Default)]
pub(crate) struct VenueTally<'a> {
    pub events: Vec<EventLine<'a>>,
    pub speed: Vec<SpeedPointsLine<'a>>,
    pub lifetime: Vec<LifetimePoints>,
    pub placement: Vec<LifetimePoints>,
}

/// The (division, level, event, method) being tallied, resolved up front.
struct TallyTarget<'a> {
    venue: &'a Venue,
    division: &'a Division,
    division_index: usize,
    level: &'a Level,
    level_index: usize,
    event: &'a Event,
    event_index: usize,
    method: &'a ScoringMethod,
    /// Method validity clamped to the date filter; `None` when the method
    /// lies wholly outside it and only feeds the lifetime rollups.
    window: Option<DateRange>,
}

impl TallyTarget<'_> {
    /// True when `method` is the one that governs (division, level) on `date`.
    fn owns_date(&self, date: chrono::NaiveDate) -> bool {
        self.event
            .find_scoring(&self.division.name, &self.level.name, date)
            .is_some_and(|found| ptr::eq(found, self.method))
    }
}

struct SpeedTotal<'a> {
    awarded: bool,
    points: f64,
    records: Vec<DetailRecord<'a>>,
}

pub(crate) fn tally_venue<'a, S: RunScorer>(
    scorer: &S,
    venue: &'a Venue,
    dog: &'a Dog,
    trials: &[(usize, &'a Trial)],
    filters: &AggregationFilters,
) -> VenueTally<'a> {
    let mut tally = VenueTally::default();

    for (division_index, division) in venue.divisions.iter().enumerate() {
        let mut speed = SpeedTotal {
            awarded: false,
            points: 0.0,
            records: Vec::new(),
        };

        for (level_index, level) in division.levels.iter().enumerate() {
            let mut lifetime = LifetimePoints::new(&division.name, &level.name);
            let mut placement = LifetimePoints::new(&division.name, &level.name);

            for (event_index, event) in venue.events.iter().enumerate() {
                let methods: Vec<(&ScoringMethod, Option<DateRange>)> = event
                    .titling_scorings(&division.name, &level.name)
                    .into_iter()
                    .map(|method| (method, method.valid.intersect(&filters.dates)))
                    .collect();
                let labelled = methods.iter().filter(|(_, window)| window.is_some()).count() > 1;

                for (method, window) in methods {
                    let target = TallyTarget {
                        venue,
                        division,
                        division_index,
                        level,
                        level_index,
                        event,
                        event_index,
                        method,
                        window,
                    };
                    let Some(mut line) = tally_event(
                        scorer,
                        &target,
                        dog,
                        trials,
                        filters,
                        &mut lifetime,
                        &mut placement,
                    ) else {
                        continue;
                    };
                    if labelled {
                        line.window = Some(method.valid);
                    }
                    if method.has_speed_points {
                        speed.awarded = true;
                        speed.points += f64::from(line.speed_points.unwrap_or(0));
                        speed.records.extend(
                            line.records
                                .iter()
                                .copied()
                                .filter(|record| matches!(record, DetailRecord::Run { .. })),
                        );
                    }
                    tally.events.push(line);
                }
            }

            if !lifetime.is_empty() {
                tally.lifetime.push(lifetime);
            }
            if !placement.is_empty() {
                tally.placement.push(placement);
            }
        }

        if speed.awarded {
            for level in &division.levels {
                if !is_venue_level_visible(filters, &venue.name, &division.name, &level.name) {
                    continue;
                }
                let scope = ExistingScope::venue(&venue.name)
                    .with_division(&division.name)
                    .with_level(level)
                    .within(filters.dates);
                for existing in existing_records(dog, ExistingPointsKind::Speed, &scope) {
                    speed.points += existing.points;
                    speed.records.push(DetailRecord::Existing(existing));
                }
            }
            tally.speed.push(SpeedPointsLine {
                venue: venue.name.clone(),
                division: division.name.clone(),
                points: speed.points,
                records: speed.records,
            });
        }
    }

    tally
}

/// Tally one scoring method of one (division, level, event).
///
/// Returns `None` when nothing is visible, no adjustment applies and no
/// lifetime points were earned, and always for a method outside the date
/// filter, whose runs only reach the lifetime and placement accumulators.
fn tally_event<'a, S: RunScorer>(
    scorer: &S,
    target: &TallyTarget<'a>,
    dog: &'a Dog,
    trials: &[(usize, &'a Trial)],
    filters: &AggregationFilters,
    lifetime: &mut LifetimePoints,
    placement: &mut LifetimePoints,
) -> Option<EventLine<'a>> {
    let TallyTarget {
        venue,
        division,
        level,
        event,
        method,
        ..
    } = *target;

    let level_visible = is_venue_level_visible(filters, &venue.name, &division.name, &level.name);
    let adjustments = |kind: ExistingPointsKind| -> Vec<&'a ExistingPoints> {
        let Some(window) = target.window.filter(|_| level_visible) else {
            return Vec::new();
        };
        let scope = ExistingScope::venue(&venue.name)
            .with_division(&division.name)
            .with_level(level)
            .with_event(&event.name)
            .within(window);
        existing_records(dog, kind, &scope)
            .filter(|existing| target.owns_date(existing.date))
            .collect()
    };
    let existing_runs = adjustments(ExistingPointsKind::Runs);
    let existing_super_q = if method.has_super_q {
        adjustments(ExistingPointsKind::SuperQ)
    } else {
        Vec::new()
    };
    let existing_points: f64 = existing_runs.iter().map(|existing| existing.points).sum();
    let existing_super_qs: f64 = existing_super_q.iter().map(|existing| existing.points).sum();

    let mut records = Vec::new();
    let mut runs = 0usize;
    let mut qs = 0usize;
    let mut clean_qs = 0usize;
    let mut points = 0.0;
    let mut super_qs = 0u32;
    let mut speed_points = 0u32;
    let mut judges = BTreeSet::new();
    let mut q_judges = BTreeSet::new();
    let mut partners = BTreeSet::new();
    let mut q_partners = BTreeSet::new();
    let lifetime_before = lifetime.points.len();
    let placement_before = placement.points.len();

    for &(_, trial) in trials {
        for run in &trial.runs {
            if run.division != division.name
                || !level.matches(&run.level)
                || run.event != event.name
            {
                continue;
            }
            if event.find_scoring(&division.name, &level.name, run.date).is_none() {
                trace!(
                    venue = venue.name.as_str(),
                    division = division.name.as_str(),
                    level = run.level.as_str(),
                    event = event.name.as_str(),
                    date = %run.date,
                    "no scoring method for run; skipped"
                );
                continue;
            }
            if !target.owns_date(run.date) || !run.q.allows_tally() {
                continue;
            }

            let visible =
                target.window.is_some() && is_run_tallied(filters, &venue.name, trial, run);
            let qualified = run.q.is_qualified();
            if visible {
                runs += 1;
                records.push(DetailRecord::Run { trial, run });
                judges.insert(run.judge.as_str());
                if qualified {
                    q_judges.insert(run.judge.as_str());
                    let earned = scorer.title_points(method, run);
                    points += earned.points;
                    qs += 1;
                    if earned.clean {
                        clean_qs += 1;
                    }
                }
                if method.has_super_q && run.q == QStatus::SuperQ {
                    super_qs += 1;
                }
                if method.has_speed_points {
                    speed_points += scorer.speed_points(method, run);
                }
                // Pairs only; relays with several partners are not tallied.
                if event.has_partner && run.partners.len() == 1 {
                    for partner in &run.partners {
                        partners.insert(partner.key());
                        if qualified {
                            q_partners.insert(partner.key());
                        }
                    }
                }
            }

            if qualified {
                if method.has_lifetime_points() {
                    let earned = scorer.lifetime_points(method, run);
                    if earned > 0.0 {
                        lifetime.push(&event.name, earned, !visible);
                    }
                }
                if method.has_placements() {
                    let earned = scorer.placement_points(method, run);
                    if earned > 0.0 {
                        placement.push(&event.name, earned, !visible);
                    }
                }
            }
        }
    }

    let adjustment = existing_points + existing_super_qs;
    if method.has_lifetime_points() && adjustment != 0.0 {
        lifetime.push(&event.name, adjustment, false);
    }

    if target.window.is_none() {
        return None;
    }
    let has_existing = existing_points != 0.0 || existing_super_qs != 0.0;
    let has_lifetime =
        lifetime.points.len() > lifetime_before || placement.points.len() > placement_before;
    if runs == 0 && !has_existing && !has_lifetime {
        return None;
    }

    points += existing_points;
    records.extend(
        existing_runs
            .iter()
            .chain(existing_super_q.iter())
            .copied()
            .map(DetailRecord::Existing),
    );
    let existing_super_qs = existing_super_qs.max(0.0).round() as u32;

    Some(EventLine {
        venue: venue.name.clone(),
        division: division.name.clone(),
        division_index: target.division_index,
        level: level.name.clone(),
        level_index: target.level_index,
        event: event.name.clone(),
        event_index: target.event_index,
        window: None,
        runs,
        judges: judges.len(),
        partners: event.has_partner.then_some(partners.len()),
        qs,
        clean_qs,
        q_judges: q_judges.len(),
        q_partners: event.has_partner.then_some(q_partners.len()),
        points,
        super_qs: method.has_super_q.then_some(super_qs + existing_super_qs),
        speed_points: method.has_speed_points.then_some(speed_points),
        records,
    })
}

/// Stable sort of a venue's event lines by the caller's key priority.
pub(crate) fn sort_event_lines(lines: &mut [EventLine<'_>], keys: [SortKey; 3]) {
    let index = |line: &EventLine<'_>, key: SortKey| match key {
        SortKey::Division => line.division_index,
        SortKey::Level => line.level_index,
        SortKey::Event => line.event_index,
    };
    lines.sort_by_key(|line| (index(line, keys[0]), index(line, keys[1]), index(line, keys[2])));
}
