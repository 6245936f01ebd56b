//! Tests for agility-model types.

use agility_model::{
    Configuration, DateRange, Division, Event, ExistingPointsKind, Level, LifetimeRow, ModelError,
    MultiQDef, MultiQItem, PlaceValue, PointsRow, QStatus, Run, ScoringMethod, Snapshot,
    TallyStrategy, TitleDef, Trial, Venue,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn method(division: Option<&str>, level: Option<&str>, valid: DateRange) -> ScoringMethod {
    ScoringMethod {
        division: division.map(str::to_string),
        level: level.map(str::to_string),
        valid,
        title_points: vec![PointsRow {
            faults: 0.0,
            points: 1.0,
        }],
        ..ScoringMethod::default()
    }
}

// --- QStatus tests ---

#[test]
fn q_status_qualified_includes_super_q() {
    assert!(QStatus::Qualified.is_qualified());
    assert!(QStatus::SuperQ.is_qualified());
    assert!(!QStatus::NotQualified.is_qualified());
    assert!(!QStatus::Eliminated.is_qualified());
    assert!(!QStatus::NotApplicable.is_qualified());
}

#[test]
fn q_status_na_never_tallies() {
    assert!(!QStatus::NotApplicable.allows_tally());
    assert!(QStatus::NotQualified.allows_tally());
    assert!(QStatus::Eliminated.allows_tally());
}

#[test]
fn q_status_parses_tokens_case_insensitively() {
    assert_eq!("q".parse::<QStatus>().expect("parse"), QStatus::Qualified);
    assert_eq!(" sq ".parse::<QStatus>().expect("parse"), QStatus::SuperQ);
    assert_eq!("N/A".parse::<QStatus>().expect("parse"), QStatus::NotApplicable);
    assert_eq!("Eliminated".parse::<QStatus>().expect("parse"), QStatus::Eliminated);
    assert!(matches!(
        "maybe".parse::<QStatus>(),
        Err(ModelError::UnknownToken { kind: "Q status", .. })
    ));
}

#[test]
fn q_status_serializes_as_short_token() {
    let json = serde_json::to_string(&QStatus::SuperQ).expect("serialize");
    assert_eq!(json, "\"SQ\"");
    let parsed: QStatus = serde_json::from_str("\"NQ\"").expect("deserialize");
    assert_eq!(parsed, QStatus::NotQualified);
}

// --- Existing points / tally strategy tests ---

#[test]
fn existing_kind_parses_aliases() {
    assert_eq!(
        "other_points".parse::<ExistingPointsKind>().expect("parse"),
        ExistingPointsKind::OtherPoints
    );
    assert_eq!(
        "Super Q".parse::<ExistingPointsKind>().expect("parse"),
        ExistingPointsKind::SuperQ
    );
    assert!(!ExistingPointsKind::OtherPoints.is_venue_scoped());
    assert!(ExistingPointsKind::Speed.is_venue_scoped());
}

#[test]
fn tally_strategy_header_rule() {
    assert!(!TallyStrategy::All.has_header());
    assert!(TallyStrategy::AllByEvent.has_header());
    assert!(TallyStrategy::Level.has_header());
    assert!(TallyStrategy::LevelByEvent.has_header());
    assert_eq!(
        "level-by-event".parse::<TallyStrategy>().expect("parse"),
        TallyStrategy::LevelByEvent
    );
}

// --- Configuration lookup tests ---

#[test]
fn level_matches_sub_levels() {
    let division = Division {
        name: "Standard".to_string(),
        levels: vec![
            Level {
                name: "Novice".to_string(),
                sub_levels: vec![],
            },
            Level {
                name: "Excellent".to_string(),
                sub_levels: vec!["Excellent A".to_string(), "Excellent B".to_string()],
            },
        ],
    };
    let (index, level) = division.level_for("Excellent B").expect("sub-level resolves");
    assert_eq!(index, 1);
    assert_eq!(level.name, "Excellent");
    assert!(division.level_for("Masters").is_none());
}

#[test]
fn find_scoring_prefers_exact_over_wildcards() {
    let event = Event {
        name: "Standard".to_string(),
        has_partner: false,
        scorings: vec![
            method(None, None, DateRange::ALL),
            method(Some("Standard"), None, DateRange::ALL),
            method(None, Some("Excellent"), DateRange::ALL),
            method(Some("Standard"), Some("Excellent"), DateRange::ALL),
        ],
    };
    let day = date(2024, 5, 1);

    let exact = event.find_scoring("Standard", "Excellent", day).expect("exact");
    assert_eq!(exact.division.as_deref(), Some("Standard"));
    assert_eq!(exact.level.as_deref(), Some("Excellent"));

    let level_wild = event.find_scoring("Standard", "Novice", day).expect("level wildcard");
    assert_eq!(level_wild.division.as_deref(), Some("Standard"));
    assert!(level_wild.level.is_none());

    let division_wild = event.find_scoring("Preferred", "Excellent", day).expect("division wildcard");
    assert!(division_wild.division.is_none());
    assert_eq!(division_wild.level.as_deref(), Some("Excellent"));

    let open = event.find_scoring("Preferred", "Novice", day).expect("open");
    assert!(open.division.is_none() && open.level.is_none());
}

#[test]
fn find_scoring_respects_validity_windows() {
    let old = DateRange::new(None, Some(date(2019, 12, 31))).expect("range");
    let new = DateRange::new(Some(date(2020, 1, 1)), None).expect("range");
    let mut old_method = method(Some("Standard"), Some("Novice"), old);
    old_method.title_points[0].points = 1.0;
    let mut new_method = method(Some("Standard"), Some("Novice"), new);
    new_method.title_points[0].points = 2.0;
    let event = Event {
        name: "Jumpers".to_string(),
        has_partner: false,
        scorings: vec![old_method, new_method],
    };

    let before = event.find_scoring("Standard", "Novice", date(2019, 6, 1)).expect("old");
    assert_eq!(before.title_points_for(0.0), 1.0);
    let after = event.find_scoring("Standard", "Novice", date(2021, 6, 1)).expect("new");
    assert_eq!(after.title_points_for(0.0), 2.0);
    assert_eq!(event.titling_scorings("Standard", "Novice").len(), 2);
}

#[test]
fn points_tables_pick_tightest_row() {
    let method = ScoringMethod {
        title_points: vec![
            PointsRow {
                faults: 5.0,
                points: 1.0,
            },
            PointsRow {
                faults: 0.0,
                points: 3.0,
            },
        ],
        lifetime_points: vec![
            LifetimeRow {
                faults: 0.0,
                points: 10.0,
                use_speed_points: false,
            },
            LifetimeRow {
                faults: 3.0,
                points: 0.0,
                use_speed_points: true,
            },
        ],
        placements: vec![PlaceValue {
            place: 1,
            value: 4.0,
        }],
        speed_multipliers: vec![
            PlaceValue {
                place: 1,
                value: 2.0,
            },
            PlaceValue {
                place: 0,
                value: 1.5,
            },
        ],
        ..ScoringMethod::default()
    };
    assert_eq!(method.title_points_for(0.0), 3.0);
    assert_eq!(method.title_points_for(2.0), 1.0);
    assert_eq!(method.title_points_for(6.0), 0.0);
    assert_eq!(method.lifetime_points_for(0.0, 7), 10.0);
    assert_eq!(method.lifetime_points_for(1.0, 7), 7.0);
    assert_eq!(method.placement_points_for(1), 4.0);
    assert_eq!(method.placement_points_for(2), 0.0);
    assert_eq!(method.speed_multiplier_for(1), Some(2.0));
    assert_eq!(method.speed_multiplier_for(3), Some(1.5));
}

#[test]
fn multi_q_accepts_runs_in_its_items_and_window() {
    let venue = Venue {
        name: "AKC".to_string(),
        divisions: vec![Division {
            name: "Regular".to_string(),
            levels: vec![Level {
                name: "Excellent".to_string(),
                sub_levels: vec!["Excellent B".to_string()],
            }],
        }],
        ..Venue::default()
    };
    let double_q = MultiQDef {
        name: "Double Q".to_string(),
        short_name: "QQ".to_string(),
        valid: DateRange::new(Some(date(2024, 1, 1)), None).expect("range"),
        items: vec![MultiQItem {
            division: "Regular".to_string(),
            level: "Excellent".to_string(),
            event: "Standard".to_string(),
        }],
    };
    let run = |on: NaiveDate, level: &str, event: &str| Run {
        date: on,
        division: "Regular".to_string(),
        level: level.to_string(),
        event: event.to_string(),
        ..Run::default()
    };

    assert!(double_q.accepts(&venue, &run(date(2024, 3, 2), "Excellent B", "Standard")));
    assert!(!double_q.accepts(&venue, &run(date(2023, 12, 31), "Excellent B", "Standard")));
    assert!(!double_q.accepts(&venue, &run(date(2024, 3, 2), "Excellent B", "Hoopers")));
    assert!(!double_q.accepts(&venue, &run(date(2024, 3, 2), "Masters", "Standard")));

    let any_run = MultiQDef {
        items: Vec::new(),
        ..double_q
    };
    assert!(any_run.accepts(&venue, &run(date(2024, 3, 2), "Masters", "Hoopers")));
}

#[test]
fn venue_labels() {
    let venue = Venue {
        name: "USDAA".to_string(),
        lifetime_name: Some("Lifetime".to_string()),
        titles: vec![TitleDef {
            name: "MAD".to_string(),
            long_name: "Master Agility Dog".to_string(),
        }],
        ..Venue::default()
    };
    assert_eq!(venue.title_complete_name("MAD"), "Master Agility Dog [MAD]");
    assert_eq!(venue.title_complete_name("ADCH"), "ADCH");
    assert_eq!(venue.lifetime_label(), "Lifetime Points");

    let akc = Venue {
        name: "AKC".to_string(),
        lifetime_name: Some("ACH".to_string()),
        ..Venue::default()
    };
    assert_eq!(akc.lifetime_label(), "ACH Points");
    assert_eq!(Venue::default().lifetime_label(), "Lifetime Points");
}

#[test]
fn trial_span_comes_from_runs() {
    let trial: Trial = serde_json::from_str(
        r#"{
            "clubs": [{"name": "Club A", "venue": "AKC"}, {"name": "Club B", "venue": "UKI"}],
            "runs": [
                {"date": "2024-03-02", "division": "Standard", "level": "Novice", "event": "Jumpers"},
                {"date": "2024-03-01", "division": "Standard", "level": "Novice", "event": "Standard"}
            ]
        }"#,
    )
    .expect("deserialize trial");
    assert_eq!(trial.primary_venue(), Some("AKC"));
    assert!(trial.has_venue("UKI"));
    assert_eq!(trial.start_date(), Some(date(2024, 3, 1)));
    assert_eq!(trial.end_date(), Some(date(2024, 3, 2)));
    assert_eq!(trial.runs[0].q, QStatus::NotApplicable);
}

// --- Snapshot tests ---

#[test]
fn snapshot_round_trips_through_json() {
    let json = r#"{
        "config": {
            "venues": [{
                "name": "AKC",
                "divisions": [{"name": "Standard", "levels": [{"name": "Novice"}]}],
                "events": [{"name": "Jumpers", "scorings": [{
                    "division": "Standard",
                    "valid": {"from": "2020-01-01"},
                    "title_points": [{"faults": 0, "points": 1}]
                }]}]
            }],
            "other_points": [{"name": "Versatility", "tally": "all"}]
        },
        "dog": {
            "call_name": "Rex",
            "existing_points": [{"kind": "runs", "date": "2023-01-01", "venue": "AKC", "points": 5}]
        }
    }"#;
    let snapshot = Snapshot::from_json(json).expect("parse snapshot");
    let method = &snapshot.config.venues[0].events[0].scorings[0];
    assert!(method.time_faults_over);
    assert_eq!(method.time_fault_multiplier, 1.0);
    assert_eq!(method.valid.from, Some(date(2020, 1, 1)));

    let text = serde_json::to_string_pretty(&snapshot).expect("serialize");
    let round = Snapshot::from_json(&text).expect("reparse");
    assert_eq!(round, snapshot);
}

#[test]
fn snapshot_rejects_blank_names() {
    let json = r#"{"config": {"venues": [{"name": "  "}]}, "dog": {"call_name": "Rex"}}"#;
    let err = Snapshot::from_json(json).expect_err("blank venue");
    assert!(matches!(err, ModelError::BlankName { kind: "venue", .. }));

    let json = r#"{"config": {}, "dog": {"call_name": ""}}"#;
    assert!(Snapshot::from_json(json).is_err());
}

#[test]
fn snapshot_rejects_inverted_scoring_window() {
    let config = Configuration {
        venues: vec![Venue {
            name: "AKC".to_string(),
            events: vec![Event {
                name: "Jumpers".to_string(),
                has_partner: false,
                scorings: vec![ScoringMethod {
                    valid: DateRange {
                        from: Some(date(2022, 1, 1)),
                        to: Some(date(2021, 1, 1)),
                    },
                    ..ScoringMethod::default()
                }],
            }],
            ..Venue::default()
        }],
        other_points: vec![],
    };
    let snapshot = Snapshot {
        config,
        dog: agility_model::Dog {
            call_name: "Rex".to_string(),
            ..Default::default()
        },
    };
    assert!(matches!(
        snapshot.validate(),
        Err(ModelError::InvertedDateRange { .. })
    ));
}

#[test]
fn malformed_json_reports_json_error() {
    let err = Snapshot::from_json("{not json").expect_err("malformed");
    assert!(matches!(err, ModelError::Json(_)));
}
