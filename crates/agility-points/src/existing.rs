//! Queries over a dog's existing-points adjustments.

use agility_model::{DateRange, Dog, ExistingPoints, ExistingPointsKind, Level};

/// Scope an adjustment must fall in to be counted. Unset parts match any.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingScope<'a> {
    pub venue: Option<&'a str>,
    pub multi_q: Option<&'a str>,
    pub division: Option<&'a str>,
    /// Matches the level itself or any of its sub-levels.
    pub level: Option<&'a Level>,
    pub event: Option<&'a str>,
    pub window: DateRange,
}

impl<'a> ExistingScope<'a> {
    pub fn venue(venue: &'a str) -> Self {
        Self {
            venue: Some(venue),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_multi_q(mut self, name: &'a str) -> Self {
        self.multi_q = Some(name);
        self
    }

    #[must_use]
    pub fn with_division(mut self, division: &'a str) -> Self {
        self.division = Some(division);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: &'a Level) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: &'a str) -> Self {
        self.event = Some(event);
        self
    }

    #[must_use]
    pub fn within(mut self, window: DateRange) -> Self {
        self.window = window;
        self
    }

    pub fn matches(&self, existing: &ExistingPoints) -> bool {
        self.venue.is_none_or(|venue| existing.venue == venue)
            && self.multi_q.is_none_or(|name| existing.multi_q == name)
            && self.division.is_none_or(|division| existing.division == division)
            && self.level.is_none_or(|level| level.matches(&existing.level))
            && self.event.is_none_or(|event| existing.event == event)
            && self.window.contains(existing.date)
    }
}

/// Adjustments of `kind` inside `scope`, in recorded order.
pub fn existing_records<'d>(
    dog: &'d Dog,
    kind: ExistingPointsKind,
    scope: &ExistingScope<'_>,
) -> impl Iterator<Item = &'d ExistingPoints> {
    let scope = *scope;
    dog.existing_points
        .iter()
        .filter(move |existing| existing.kind == kind && scope.matches(existing))
}

pub fn existing_total(dog: &Dog, kind: ExistingPointsKind, scope: &ExistingScope<'_>) -> f64 {
    existing_records(dog, kind, scope)
        .map(|existing| existing.points)
        .sum()
}
