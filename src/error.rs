//! Fatal error type for loading and laying out a scenario.
//!
//! Per-item and per-edge problems are not errors; they are reported as
//! [`Diagnostic`](crate::Diagnostic)s and the pass carries on.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    /// No item has both a start and an end date, so there is nothing to map.
    #[error("no item has a usable date range; the timeline domain is empty")]
    EmptyDomain,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid scenario payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
