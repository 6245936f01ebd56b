//! Tests for lifetime rollups and the filtered-share invariant.

mod common;

use std::collections::BTreeMap;

use agility_model::{Configuration, DateRange, QStatus};
use agility_points::{
    AggregationFilters, LifetimeKind, LifetimeLine, LifetimePoints, PointsLine, PointsReport,
    aggregate, rollup_lines,
};
use chrono::{Days, NaiveDate};
use common::*;
use proptest::prelude::*;

fn accumulator(division: &str, level: &str, points: &[(&str, f64, bool)]) -> LifetimePoints {
    let mut acc = LifetimePoints::new(division, level);
    for &(event, value, filtered) in points {
        acc.push(event, value, filtered);
    }
    acc
}

// --- Rollup shape tests ---

#[test]
fn empty_accumulators_produce_nothing() {
    let lines = rollup_lines(
        VENUE,
        LifetimeKind::Lifetime,
        "Lifetime Points",
        &[LifetimePoints::new(DIVISION, NOVICE)],
        false,
    );
    assert!(lines.is_empty());
}

#[test]
fn single_division_has_no_subtotals() {
    let accs = [
        accumulator(DIVISION, NOVICE, &[(STANDARD, 3.0, false)]),
        accumulator(DIVISION, EXCELLENT, &[(STANDARD, 4.0, true)]),
    ];
    let lines = rollup_lines(VENUE, LifetimeKind::Lifetime, "ACH Points", &accs, false);
    assert_eq!(lines.len(), 1);
    let PointsLine::Lifetime(line) = &lines[0] else {
        panic!("expected a lifetime line");
    };
    assert_eq!(line.points, 7.0);
    assert_eq!(line.filtered, 4.0);
    assert_eq!(line.entries.len(), 2);
    assert_eq!(lines[0].text(1), "ACH Points");
    assert_eq!(lines[0].text(2), "Total: 3 (7)");
}

#[test]
fn several_divisions_add_subtotals_in_name_order() {
    let accs = [
        accumulator("Regular", NOVICE, &[(STANDARD, 3.0, false)]),
        accumulator("Preferred", NOVICE, &[(JUMPERS, 2.0, false), (STANDARD, 1.0, true)]),
    ];
    let lines = rollup_lines(VENUE, LifetimeKind::Placement, "Placement Points", &accs, false);
    assert_eq!(lines.len(), 3);

    let names: Vec<String> = lines.iter().skip(1).map(|line| line.text(2)).collect();
    assert_eq!(names, vec!["Preferred: 2 (3)", "Regular: 3"]);
}

#[test]
fn by_event_groups_across_levels() {
    let accs = [
        accumulator(DIVISION, NOVICE, &[(STANDARD, 3.0, false), (JUMPERS, 1.0, false)]),
        accumulator(DIVISION, EXCELLENT, &[(STANDARD, 4.0, true)]),
    ];
    let lines = rollup_lines(VENUE, LifetimeKind::Lifetime, "Lifetime Points", &accs, true);
    let PointsLine::Lifetime(line) = &lines[0] else {
        panic!("expected a lifetime line");
    };
    let entries: Vec<_> = line
        .entries
        .iter()
        .map(|info| (info.first.as_str(), info.points, info.filtered))
        .collect();
    assert_eq!(entries, vec![(JUMPERS, 1.0, 0.0), (STANDARD, 7.0, 4.0)]);
}

// --- Invariant tests ---

fn point_strategy() -> impl Strategy<Value = (usize, usize, f64, bool)> {
    (0usize..2, 0usize..2, 1u32..20, any::<bool>())
        .prop_map(|(division, event, points, filtered)| (division, event, f64::from(points), filtered))
}

/// 2022-01-01 plus `offset` days.
fn day(offset: u64) -> NaiveDate {
    date(2022, 1, 1) + Days::new(offset)
}

/// Standard and Jumpers each scored by three yearly methods, 2022 to 2024.
fn dated_methods_config() -> Configuration {
    let mut config = config();
    let yearly = |from: Option<NaiveDate>, to: Option<NaiveDate>| {
        let mut method = points_method();
        method.valid = DateRange { from, to };
        method
    };
    for event in &mut config.venues[0].events {
        event.scorings = vec![
            yearly(None, Some(date(2022, 12, 31))),
            yearly(Some(date(2023, 1, 1)), Some(date(2023, 12, 31))),
            yearly(Some(date(2024, 1, 1)), None),
        ];
    }
    config
}

fn dated_run_strategy() -> impl Strategy<Value = (u64, &'static str, &'static str, f64)> {
    (
        0u64..1096,
        prop::sample::select(vec![NOVICE, EXCELLENT_B]),
        prop::sample::select(vec![STANDARD, JUMPERS]),
        prop::sample::select(vec![0.0, 5.0, 10.0]),
    )
}

/// The lifetime line and its per-(division, level) entries as (points, filtered).
fn level_totals(report: &PointsReport<'_>) -> (LifetimeLine, BTreeMap<(String, String), (f64, f64)>) {
    let total = report
        .iter()
        .find_map(|line| match line {
            PointsLine::Lifetime(total) if total.kind == LifetimeKind::Lifetime => {
                Some(total.clone())
            }
            _ => None,
        })
        .expect("lifetime line");
    let levels = total
        .entries
        .iter()
        .map(|info| ((info.first.clone(), info.second.clone()), (info.points, info.filtered)))
        .collect();
    (total, levels)
}

proptest! {
    #[test]
    fn visible_plus_filtered_is_total(points in prop::collection::vec(point_strategy(), 1..30)) {
        let divisions = ["Regular", "Preferred"];
        let events = [STANDARD, JUMPERS];
        let mut accs = vec![
            LifetimePoints::new(divisions[0], NOVICE),
            LifetimePoints::new(divisions[1], NOVICE),
        ];
        for &(division, event, value, filtered) in &points {
            accs[division].push(events[event], value, filtered);
        }
        let expected: f64 = points.iter().map(|point| point.2).sum();
        let hidden: f64 = points.iter().filter(|point| point.3).map(|point| point.2).sum();

        for by_event in [false, true] {
            let lines = rollup_lines(VENUE, LifetimeKind::Lifetime, "Lifetime Points", &accs, by_event);
            for line in &lines {
                match line {
                    PointsLine::Lifetime(total) => {
                        prop_assert_eq!(total.points, expected);
                        prop_assert_eq!(total.filtered, hidden);
                        prop_assert_eq!(total.visible() + total.filtered, total.points);
                        let entry_sum: f64 = total.entries.iter().map(|info| info.points).sum();
                        prop_assert_eq!(entry_sum, total.points);
                    }
                    PointsLine::LifetimeByName(division) => {
                        prop_assert_eq!(division.visible() + division.filtered, division.points);
                        let entry_sum: f64 = division.entries.iter().map(|info| info.points).sum();
                        prop_assert_eq!(entry_sum, division.points);
                    }
                    other => prop_assert!(false, "unexpected line {:?}", other.kind_name()),
                }
            }
        }
    }

    #[test]
    fn hiding_runs_keeps_true_lifetime_total(
        faults in prop::collection::vec(prop::sample::select(vec![0.0, 5.0, 10.0]), 1..8),
        cutoff in 1u32..28,
    ) {
        let config = config();
        let runs = faults
            .iter()
            .enumerate()
            .map(|(index, &course_faults)| {
                let day = u32::try_from(index).expect("small index") + 1;
                run(date(2024, 2, day), EXCELLENT, STANDARD, QStatus::Qualified, course_faults)
            })
            .collect();
        let dog = dog(vec![trial(VENUE, runs)]);

        let open = aggregate(&config, &dog, &AggregationFilters::new());
        let filters = AggregationFilters::new().with_dates(DateRange {
            from: Some(date(2024, 2, cutoff)),
            to: None,
        });
        let filtered = aggregate(&config, &dog, &filters);

        let lifetime = |report: &PointsReport<'_>| {
            report.iter().find_map(|line| match line {
                PointsLine::Lifetime(total) => Some((total.points, total.filtered)),
                _ => None,
            })
        };
        let (open_total, open_hidden) = lifetime(&open).expect("open lifetime");
        let (total, hidden) = lifetime(&filtered).expect("filtered lifetime");
        prop_assert_eq!(open_total, total);
        prop_assert_eq!(open_hidden, 0.0);
        prop_assert!(hidden <= total);
    }

    #[test]
    fn dated_methods_keep_level_totals_under_filter(
        runs in prop::collection::vec(dated_run_strategy(), 1..12),
        bounds in (0u64..1096, 0u64..1096),
    ) {
        let config = dated_methods_config();
        let runs = runs
            .into_iter()
            .map(|(offset, level, event, course_faults)| {
                run(day(offset), level, event, QStatus::Qualified, course_faults)
            })
            .collect();
        let dog = dog(vec![trial(VENUE, runs)]);

        let open = aggregate(&config, &dog, &AggregationFilters::new());
        let filters = AggregationFilters::new().with_dates(DateRange {
            from: Some(day(bounds.0.min(bounds.1))),
            to: Some(day(bounds.0.max(bounds.1))),
        });
        let filtered = aggregate(&config, &dog, &filters);

        let (open_total, open_levels) = level_totals(&open);
        let (total, levels) = level_totals(&filtered);
        prop_assert_eq!(open_total.points, total.points);
        prop_assert_eq!(open_total.filtered, 0.0);
        prop_assert_eq!(total.visible() + total.filtered, total.points);
        prop_assert_eq!(
            levels.iter().map(|(key, info)| (key, info.0)).collect::<Vec<_>>(),
            open_levels.iter().map(|(key, info)| (key, info.0)).collect::<Vec<_>>()
        );
        for (points, hidden) in levels.values() {
            prop_assert!(hidden <= points);
        }
    }

    #[test]
    fn aggregation_is_repeatable(
        qs in prop::collection::vec(prop::sample::select(vec![
            QStatus::Qualified,
            QStatus::NotQualified,
            QStatus::SuperQ,
            QStatus::NotApplicable,
        ]), 0..10),
    ) {
        let config = config();
        let runs = qs
            .iter()
            .map(|&q| with_multi_q(run(date(2024, 3, 2), EXCELLENT, JUMPERS, q, 0.0), DOUBLE_Q))
            .collect();
        let dog = dog(vec![trial(VENUE, runs)]);
        let filters = AggregationFilters::new();
        prop_assert_eq!(aggregate(&config, &dog, &filters), aggregate(&config, &dog, &filters));
    }
}
