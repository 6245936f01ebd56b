use std::path::PathBuf;

use agility_cli::pipeline::ReportRow;

#[derive(Debug)]
pub struct ReportResult {
    pub dog: String,
    pub rows: Vec<ReportRow>,
    pub html: Option<PathBuf>,
}

#[derive(Debug)]
pub struct VenueSummary {
    pub name: String,
    pub long_name: String,
    pub divisions: Vec<String>,
    pub events: Vec<String>,
    pub multi_qs: usize,
    pub titles: usize,
}
