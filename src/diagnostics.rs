//! Non-fatal problems found while laying out a scenario.
//!
//! Each problem affects one item, one edge or one focus request. It is
//! collected into [`Diagnostics`] for the host and logged once as a warning.

use std::fmt;

use chrono::NaiveDate;
use log::warn;
use thiserror::Error;

use crate::model::ItemKey;

/// Which of an item's dates is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDate {
    Start,
    End,
    Both,
}

impl fmt::Display for MissingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingDate::Start => "start date",
            MissingDate::End => "end date",
            MissingDate::Both => "start and end dates",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The repeated item was dropped; the first one is kept.
    #[error("item key '{key}' appears more than once; later copies dropped")]
    DuplicateItemKey { key: ItemKey },

    /// The item has no bar.
    #[error("item '{key}' has no {missing}; it is left off the timeline")]
    MissingDate { key: ItemKey, missing: MissingDate },

    /// The item has no bar.
    #[error("item '{key}' ends ({end}) before it starts ({start}); it is left off the timeline")]
    InvalidDateRange {
        key: ItemKey,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// The edge was dropped from the graph.
    #[error("dependency {from} -> {to} references unknown item '{unknown}'; dropped")]
    UnknownDependencyEndpoint {
        from: ItemKey,
        to: ItemKey,
        unknown: ItemKey,
    },

    /// The edge was dropped from the graph.
    #[error("item '{key}' depends on itself; dropped")]
    SelfDependency { key: ItemKey },

    /// The repeated edge was dropped; the first one is kept.
    #[error("dependency {from} -> {to} is listed more than once; duplicate dropped")]
    DuplicateDependency { from: ItemKey, to: ItemKey },

    /// Visibility fell back to the unfocused view.
    #[error("focus key '{key}' does not match any item; showing all items")]
    InvalidFocusKey { key: ItemKey },
}

impl Diagnostic {
    /// The item key the diagnostic is about, for host-side highlighting.
    pub fn subject(&self) -> &ItemKey {
        match self {
            Diagnostic::DuplicateItemKey { key }
            | Diagnostic::MissingDate { key, .. }
            | Diagnostic::InvalidDateRange { key, .. }
            | Diagnostic::SelfDependency { key }
            | Diagnostic::InvalidFocusKey { key } => key,
            Diagnostic::UnknownDependencyEndpoint { unknown, .. } => unknown,
            Diagnostic::DuplicateDependency { from, .. } => from,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Diagnostic::DuplicateItemKey { .. } => "duplicate_item_key",
            Diagnostic::MissingDate { .. } => "missing_date",
            Diagnostic::InvalidDateRange { .. } => "invalid_date_range",
            Diagnostic::UnknownDependencyEndpoint { .. } => "unknown_dependency_endpoint",
            Diagnostic::SelfDependency { .. } => "self_dependency",
            Diagnostic::DuplicateDependency { .. } => "duplicate_dependency",
            Diagnostic::InvalidFocusKey { .. } => "invalid_focus_key",
        }
    }
}

/// Ordered collection of diagnostics produced by one load or one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(
            code = diagnostic.code(),
            subject = diagnostic.subject().as_str();
            "{diagnostic}"
        );
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
