use chrono::NaiveDate;
use thiserror::Error;

use crate::filters::SortKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("date filter starts after it ends: {from} > {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
    #[error("sort key `{0}` appears more than once")]
    DuplicateSortKey(SortKey),
    #[error("sort order needs exactly 3 keys, got {0}")]
    SortKeyCount(usize),
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("unknown runs view: {0}")]
    UnknownRunsView(String),
    #[error("venue filter `{0}` is malformed (expected VENUE[/DIVISION[/LEVEL]])")]
    MalformedVenueFilter(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
