//! Layout and dependency-edge routing for a focus-aware Gantt timeline.
//!
//! Load a [`Scenario`] once into a [`Timeline`], then ask it for a [`Frame`]
//! every time the focus selection changes:
//!
//! ```no_run
//! use scenario_timeline::{FocusSelection, Timeline, TimelineConfig};
//!
//! let scenario = scenario_timeline::io::load_scenario("scenario.json")?;
//! let timeline = Timeline::load(scenario, TimelineConfig::default())?;
//!
//! let overview = timeline.frame(&FocusSelection::None);
//! let focused = timeline.frame(&FocusSelection::item("PRODUCT-33713"));
//! # Ok::<(), scenario_timeline::TimelineError>(())
//! ```
//!
//! Bars are computed once per load from a fixed [`TimeScale`]; a frame only
//! decides which of them are shown and which dependency edges can be routed
//! between the shown ones.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod focus;
pub mod graph;
pub mod io;
pub mod layout;
pub mod model;
pub mod routing;
pub mod timeline;

pub use config::TimelineConfig;
pub use diagnostics::{Diagnostic, Diagnostics, MissingDate};
pub use error::TimelineError;
pub use focus::{FocusRule, FocusSelection, VisibilityFilter, VisibleSet};
pub use graph::DependencyGraph;
pub use layout::{Bar, BarLayout, TickGranularity, TimeScale};
pub use model::{Dependency, DependencyKind, Item, ItemKey, ItemKind, Scenario};
pub use routing::{EdgePath, EdgeRouter, Point, RoutedEdge};
pub use timeline::{Frame, Timeline};
