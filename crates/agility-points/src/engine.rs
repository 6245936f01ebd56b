//! The aggregation pass.
//!
//! [`aggregate`] walks the configuration venue by venue and produces the
//! full ordered line sequence for one dog:
//!
//! 1. the dog header;
//! 2. per visible venue: a header, the titles table, then the runs table
//!    (event lines, speed points, MultiQs, lifetime and placement rollups);
//! 3. the other-points table, when any definitions are configured.
//!
//! A pass is a pure function of the configuration, the dog and the filters.
//! Nothing is cached between passes; callers rebuild the report wholesale
//! and use [`PointsReport::find_same`] to carry a selection across.

use agility_model::{Configuration, Dog, Trial, Venue};
use tracing::{debug, info_span};

use crate::filters::AggregationFilters;
use crate::lifetime::rollup_lines;
use crate::lines::{
    DogLine, LifetimeKind, PointsLine, SectionMarker, TextLine, TitleLine, VenueLine,
};
use crate::multiq::tally_multi_qs;
use crate::other_points::{collect_entries, tally_definition};
use crate::scorer::{RunScorer, StandardScorer};
use crate::tally::{sort_event_lines, tally_venue};
use crate::visibility::{is_title_visible, is_venue_visible};

/// Label of the placement-points rollup line.
pub const PLACEMENT_LABEL: &str = "Placement Points";

/// Heading of the other-points section.
pub const OTHER_POINTS_LABEL: &str = "Other Points";

/// Ordered output of one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsReport<'a> {
    lines: Vec<PointsLine<'a>>,
}

impl<'a> PointsReport<'a> {
    pub fn lines(&self) -> &[PointsLine<'a>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointsLine<'a>> {
        self.lines.iter()
    }

    /// Index of the line that is the same item as `line`, if any.
    pub fn find_same(&self, line: &PointsLine<'_>) -> Option<usize> {
        self.lines.iter().position(|candidate| candidate.is_same_item(line))
    }
}

impl<'r, 'a> IntoIterator for &'r PointsReport<'a> {
    type Item = &'r PointsLine<'a>;
    type IntoIter = std::slice::Iter<'r, PointsLine<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Run a pass with the standard scorer.
pub fn aggregate<'a>(
    config: &'a Configuration,
    dog: &'a Dog,
    filters: &AggregationFilters,
) -> PointsReport<'a> {
    PointsEngine::new(config).aggregate(dog, filters)
}

/// Aggregation entry point with a pluggable [`RunScorer`].
#[derive(Debug, Clone)]
pub struct PointsEngine<'a, S = StandardScorer> {
    config: &'a Configuration,
    scorer: S,
}

impl<'a> PointsEngine<'a, StandardScorer> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            scorer: StandardScorer,
        }
    }
}

impl<'a, S: RunScorer> PointsEngine<'a, S> {
    /// Replace the scorer, keeping the configuration.
    pub fn with_scorer<T: RunScorer>(self, scorer: T) -> PointsEngine<'a, T> {
        PointsEngine {
            config: self.config,
            scorer,
        }
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    pub fn aggregate(&self, dog: &'a Dog, filters: &AggregationFilters) -> PointsReport<'a> {
        let span = info_span!("aggregate", dog = %dog.call_name);
        let _guard = span.enter();

        let mut lines = vec![PointsLine::Dog(DogLine {
            dog,
            as_of: filters.as_of,
        })];

        for venue in &self.config.venues {
            if !is_venue_visible(filters, &venue.name) {
                continue;
            }
            let before = lines.len();
            self.venue_lines(venue, dog, filters, &mut lines);
            debug!(
                venue = venue.name.as_str(),
                lines = lines.len() - before,
                "venue aggregated"
            );
        }

        self.other_points_lines(dog, filters, &mut lines);

        debug!(lines = lines.len(), "aggregation complete");
        PointsReport { lines }
    }

    fn venue_lines(
        &self,
        venue: &'a Venue,
        dog: &'a Dog,
        filters: &AggregationFilters,
        lines: &mut Vec<PointsLine<'a>>,
    ) {
        let mut header_inserted = false;
        let insert_header = |lines: &mut Vec<PointsLine<'a>>| {
            lines.push(PointsLine::Text(TextLine::blank()));
            lines.push(PointsLine::Venue(VenueLine {
                venue,
                reg_num: dog.reg_num_for(&venue.name),
            }));
        };

        let titles: Vec<_> = dog
            .titles
            .iter()
            .filter(|title| title.venue == venue.name && is_title_visible(filters, title))
            .collect();
        if !titles.is_empty() {
            insert_header(lines);
            header_inserted = true;
            lines.push(PointsLine::Marker(SectionMarker::TitlesStart));
            lines.extend(titles.into_iter().map(|title| {
                PointsLine::Title(TitleLine {
                    title,
                    complete_name: venue.title_complete_name(&title.name),
                })
            }));
            lines.push(PointsLine::Marker(SectionMarker::TableEnd));
        }

        // Hidden trials still count here: dropping them would skew the
        // qualifying percentage.
        let trials: Vec<(usize, &'a Trial)> = dog.trials_in(&venue.name).collect();
        if trials.is_empty() && !dog.has_existing_points_in(&venue.name) {
            return;
        }
        if !header_inserted {
            insert_header(lines);
        }
        lines.push(PointsLine::Marker(SectionMarker::RunsStart));

        let mut tally = tally_venue(&self.scorer, venue, dog, &trials, filters);
        sort_event_lines(&mut tally.events, filters.sort.keys());
        lines.extend(tally.events.into_iter().map(PointsLine::Event));
        lines.extend(tally.speed.into_iter().map(PointsLine::SpeedPoints));
        lines.extend(
            tally_multi_qs(venue, dog, &trials, filters)
                .into_iter()
                .map(PointsLine::MultiQ),
        );
        lines.extend(rollup_lines(
            &venue.name,
            LifetimeKind::Lifetime,
            &venue.lifetime_label(),
            &tally.lifetime,
            filters.lifetime_by_event,
        ));
        lines.extend(rollup_lines(
            &venue.name,
            LifetimeKind::Placement,
            PLACEMENT_LABEL,
            &tally.placement,
            filters.lifetime_by_event,
        ));
        lines.push(PointsLine::Marker(SectionMarker::TableEnd));
    }

    fn other_points_lines(
        &self,
        dog: &'a Dog,
        filters: &AggregationFilters,
        lines: &mut Vec<PointsLine<'a>>,
    ) {
        if self.config.other_points.is_empty() {
            return;
        }
        lines.push(PointsLine::Marker(SectionMarker::OtherPointsStart));
        lines.push(PointsLine::Text(TextLine::blank()));
        lines.push(PointsLine::Text(TextLine {
            first: OTHER_POINTS_LABEL.to_string(),
            second: String::new(),
            in_html: false,
        }));
        for def in &self.config.other_points {
            let entries = collect_entries(def, dog, filters);
            lines.extend(tally_definition(def, entries));
        }
        lines.push(PointsLine::Marker(SectionMarker::TableEnd));
    }
}
