use std::fs;
use std::time::Instant;

use agility_cli::pipeline::{FilterOverrides, build_filters, load_snapshot, report_rows};
use agility_points::PointsEngine;
use agility_report::{HtmlOptions, render_document};
use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span};

use crate::cli::{ReportArgs, VenuesArgs};
use crate::types::{ReportResult, VenueSummary};

pub fn run_report(args: &ReportArgs) -> Result<ReportResult> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let span = info_span!("report", dog = %snapshot.dog.call_name);
    let _guard = span.enter();

    let overrides = FilterOverrides {
        from: args.from,
        to: args.to,
        venues: args.venues.clone(),
        runs_view: args.runs,
        lifetime_by_event: args.lifetime_by_event,
        sort: args.sort,
        show_hidden_titles: args.show_hidden_titles,
        as_of: Some(args.as_of.unwrap_or_else(|| Local::now().date_naive())),
    };
    let filters = build_filters(args.filters.as_deref(), &overrides)?;

    let start = Instant::now();
    let engine = PointsEngine::new(&snapshot.config);
    let report = engine.aggregate(&snapshot.dog, &filters);
    info!(
        lines = report.len(),
        dates = %filters.dates,
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );

    if let Some(path) = &args.html {
        let html = render_document(&report, &HtmlOptions::default());
        fs::write(path, html).with_context(|| format!("write html {}", path.display()))?;
        info!(path = %path.display(), "html written");
    }

    Ok(ReportResult {
        dog: snapshot.dog.call_name.clone(),
        rows: report_rows(&report),
        html: args.html.clone(),
    })
}

pub fn run_venues(args: &VenuesArgs) -> Result<Vec<VenueSummary>> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let venues = snapshot
        .config
        .venues
        .iter()
        .map(|venue| VenueSummary {
            name: venue.name.clone(),
            long_name: venue.long_name.clone(),
            divisions: venue
                .divisions
                .iter()
                .map(|division| {
                    let levels: Vec<&str> = division
                        .levels
                        .iter()
                        .map(|level| level.name.as_str())
                        .collect();
                    format!("{} ({})", division.name, levels.join(", "))
                })
                .collect(),
            events: venue.events.iter().map(|event| event.name.clone()).collect(),
            multi_qs: venue.multi_qs.len(),
            titles: venue.titles.len(),
        })
        .collect();
    Ok(venues)
}
