pub mod config;
pub mod dates;
pub mod dog;
pub mod enums;
pub mod error;
pub mod snapshot;

pub use config::{
    Configuration, Division, Event, Level, LifetimeRow, MultiQDef, MultiQItem, OtherPointsDef,
    PlaceValue, PointsRow, ScoringMethod, TitleDef, Venue,
};
pub use dates::DateRange;
pub use dog::{
    Club, Dog, ExistingPoints, Partner, RegNum, Run, RunOtherPoints, RunScoring, Title, Trial,
};
pub use enums::{ExistingPointsKind, QStatus, ScoringStyle, TallyStrategy};
pub use error::{ModelError, Result};
pub use snapshot::Snapshot;
