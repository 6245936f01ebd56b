//! Shared fixtures for agility-points integration tests.
#![allow(dead_code)]

use agility_model::{
    Club, Configuration, DateRange, Division, Dog, Event, ExistingPoints, ExistingPointsKind,
    Level, LifetimeRow, MultiQDef, MultiQItem, OtherPointsDef, Partner, PointsRow, QStatus,
    RegNum, Run, RunOtherPoints, RunScoring, ScoringMethod, TallyStrategy, Title, TitleDef, Trial,
    Venue,
};
use chrono::NaiveDate;

pub const VENUE: &str = "AKC";
pub const DIVISION: &str = "Regular";
pub const EXCELLENT: &str = "Excellent";
pub const EXCELLENT_B: &str = "Excellent B";
pub const NOVICE: &str = "Novice";
pub const STANDARD: &str = "Standard";
pub const JUMPERS: &str = "Jumpers";
pub const DOUBLE_Q: &str = "Double Q";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Clean run earns 4, five faults 3, ten faults 2; the same table feeds
/// lifetime points.
pub fn points_method() -> ScoringMethod {
    let rows = [(0.0, 4.0), (5.0, 3.0), (10.0, 2.0)];
    ScoringMethod {
        division: Some(DIVISION.to_string()),
        title_points: rows
            .iter()
            .map(|&(faults, points)| PointsRow { faults, points })
            .collect(),
        lifetime_points: rows
            .iter()
            .map(|&(faults, points)| LifetimeRow {
                faults,
                points,
                use_speed_points: false,
            })
            .collect(),
        ..ScoringMethod::default()
    }
}

pub fn venue() -> Venue {
    Venue {
        name: VENUE.to_string(),
        long_name: "American Kennel Club".to_string(),
        url: Some("https://www.akc.org".to_string()),
        lifetime_name: None,
        divisions: vec![Division {
            name: DIVISION.to_string(),
            levels: vec![
                Level {
                    name: NOVICE.to_string(),
                    sub_levels: Vec::new(),
                },
                Level {
                    name: EXCELLENT.to_string(),
                    sub_levels: vec!["Excellent A".to_string(), EXCELLENT_B.to_string()],
                },
            ],
        }],
        events: vec![
            Event {
                name: STANDARD.to_string(),
                has_partner: false,
                scorings: vec![points_method()],
            },
            Event {
                name: JUMPERS.to_string(),
                has_partner: false,
                scorings: vec![points_method()],
            },
        ],
        multi_qs: vec![MultiQDef {
            name: DOUBLE_Q.to_string(),
            short_name: "QQ".to_string(),
            valid: DateRange::ALL,
            items: vec![
                MultiQItem {
                    division: DIVISION.to_string(),
                    level: EXCELLENT.to_string(),
                    event: STANDARD.to_string(),
                },
                MultiQItem {
                    division: DIVISION.to_string(),
                    level: EXCELLENT.to_string(),
                    event: JUMPERS.to_string(),
                },
            ],
        }],
        titles: vec![TitleDef {
            name: "MX".to_string(),
            long_name: "Master Agility Excellent".to_string(),
        }],
    }
}

pub fn config() -> Configuration {
    Configuration {
        venues: vec![venue()],
        other_points: Vec::new(),
    }
}

pub fn other_points_def(name: &str, tally: TallyStrategy) -> OtherPointsDef {
    OtherPointsDef {
        name: name.to_string(),
        tally,
        description: String::new(),
    }
}

/// A by-time run: 30s on a 40s course with the given course faults.
pub fn run(on: NaiveDate, level: &str, event: &str, q: QStatus, course_faults: f64) -> Run {
    Run {
        date: on,
        division: DIVISION.to_string(),
        level: level.to_string(),
        event: event.to_string(),
        q,
        judge: "Smith".to_string(),
        scoring: RunScoring::ByTime {
            course_faults,
            time: 30.0,
            sct: 40.0,
        },
        ..Run::default()
    }
}

pub fn with_judge(mut run: Run, judge: &str) -> Run {
    run.judge = judge.to_string();
    run
}

pub fn with_partner(mut run: Run, dog: &str) -> Run {
    run.partners.push(Partner {
        handler: String::new(),
        dog: dog.to_string(),
        reg_num: String::new(),
    });
    run
}

pub fn with_multi_q(mut run: Run, name: &str) -> Run {
    run.multi_qs.push(name.to_string());
    run
}

pub fn with_other_points(mut run: Run, name: &str, points: f64) -> Run {
    run.other_points.push(RunOtherPoints {
        name: name.to_string(),
        points,
    });
    run
}

pub fn trial(venue: &str, runs: Vec<Run>) -> Trial {
    Trial {
        location: "Springfield".to_string(),
        clubs: vec![Club {
            name: "Springfield Agility Club".to_string(),
            venue: venue.to_string(),
        }],
        runs,
    }
}

pub fn dog(trials: Vec<Trial>) -> Dog {
    Dog {
        call_name: "Rex".to_string(),
        registered_name: "Champion Rex of Springfield".to_string(),
        reg_nums: vec![RegNum {
            venue: VENUE.to_string(),
            number: "DN123".to_string(),
        }],
        titles: Vec::new(),
        trials,
        existing_points: Vec::new(),
    }
}

pub fn title(name: &str, on: NaiveDate) -> Title {
    Title {
        venue: VENUE.to_string(),
        name: name.to_string(),
        date: Some(on),
        received: false,
        hidden: false,
    }
}

pub fn existing(kind: ExistingPointsKind, on: NaiveDate, points: f64) -> ExistingPoints {
    ExistingPoints {
        kind,
        date: on,
        venue: VENUE.to_string(),
        multi_q: String::new(),
        division: DIVISION.to_string(),
        level: EXCELLENT.to_string(),
        event: STANDARD.to_string(),
        sub_name: String::new(),
        other_points: String::new(),
        points,
        comment: String::new(),
    }
}

pub fn existing_other(name: &str, level: &str, event: &str, points: f64) -> ExistingPoints {
    ExistingPoints {
        kind: ExistingPointsKind::OtherPoints,
        venue: String::new(),
        division: String::new(),
        level: level.to_string(),
        event: event.to_string(),
        other_points: name.to_string(),
        ..existing(ExistingPointsKind::OtherPoints, date(2024, 1, 1), points)
    }
}
