use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} name is blank ({context})")]
    BlankName { kind: &'static str, context: String },
    #[error("date range starts after it ends: {from} > {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
    #[error("unknown {kind}: {value}")]
    UnknownToken { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
