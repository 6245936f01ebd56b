pub mod engine;
pub mod error;
pub mod existing;
pub mod filters;
pub mod lifetime;
pub mod lines;
mod multiq;
pub mod other_points;
pub mod scorer;
mod tally;
pub mod visibility;

pub use engine::{OTHER_POINTS_LABEL, PLACEMENT_LABEL, PointsEngine, PointsReport, aggregate};
pub use error::{FilterError, Result};
pub use existing::{ExistingScope, existing_records, existing_total};
pub use filters::{AggregationFilters, RunsView, SortKey, SortOrder, VenueFilter};
pub use lifetime::{LifetimePoint, LifetimePoints, rollup_lines};
pub use lines::{
    COLUMN_COUNT, DetailRecord, DogLine, EventLine, LifetimeByNameLine, LifetimeInfo,
    LifetimeKind, LifetimeLine, MultiQLine, OtherPointsBucket, OtherPointsLine, OtherPtInfo,
    PointsLine, SectionMarker, SpeedPointsLine, TextLine, TitleLine, VenueLine, format_points,
};
pub use scorer::{RunScorer, StandardScorer, TitlePoints};
pub use visibility::{
    RunVisibility, is_date_visible, is_run_tallied, is_run_visible_in_venue, is_title_visible,
    is_trial_visible, is_venue_division_visible, is_venue_level_visible, is_venue_visible,
    run_visibility,
};
