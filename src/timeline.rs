//! Load-once timeline state and the per-focus recompute pass.

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, info};

use crate::config::TimelineConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::TimelineError;
use crate::focus::{FocusSelection, VisibilityFilter, VisibleSet};
use crate::graph::DependencyGraph;
use crate::layout::{Bar, BarLayout, TimeScale};
use crate::model::{Item, ItemKey, Scenario};
use crate::routing::{EdgeRouter, RoutedEdge};

/// Everything the host needs to paint one focus state.
///
/// A frame is self-consistent: every edge references bars in `bars`.
/// Replace the previous frame as a whole rather than patching it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The selection this frame was computed for.
    pub focus: FocusSelection,
    pub visible: VisibleSet,
    /// Visible bars in row order.
    pub bars: IndexMap<ItemKey, Bar>,
    pub edges: Vec<RoutedEdge>,
    pub diagnostics: Diagnostics,
}

impl Frame {
    pub fn bar(&self, key: &str) -> Option<&Bar> {
        self.bars.get(key)
    }

    /// The visible bar under a point, for click handling.
    pub fn bar_at(&self, x: f32, y: f32) -> Option<&Bar> {
        self.bars.values().find(|bar| bar.contains(x, y))
    }
}

/// A loaded scenario: fixed scale, fixed bars, validated dependency graph.
#[derive(Debug, Clone)]
pub struct Timeline {
    config: TimelineConfig,
    items: Vec<Item>,
    scale: TimeScale,
    bars: BarLayout,
    graph: DependencyGraph,
    filter: VisibilityFilter,
    router: EdgeRouter,
    load_diagnostics: Diagnostics,
}

impl Timeline {
    /// Validate the scenario and compute all focus-independent geometry.
    ///
    /// Fails only when the configuration is invalid or no item has a usable
    /// date range. Per-item and per-edge problems, repeated item keys
    /// included, end up in [`Timeline::load_diagnostics`].
    pub fn load(scenario: Scenario, config: TimelineConfig) -> Result<Self, TimelineError> {
        config.validate()?;
        let Scenario {
            items,
            dependencies,
        } = scenario;

        let mut load_diagnostics = Diagnostics::new();
        let items = first_of_each_key(items, &mut load_diagnostics);

        let scale = TimeScale::build(&items, config.timeline_width)?;
        let bars = BarLayout::compute(&items, &scale, &config, &mut load_diagnostics);
        let graph = DependencyGraph::build(
            &dependencies,
            items.iter().map(|item| &item.key),
            &mut load_diagnostics,
        );
        let filter = VisibilityFilter::new(&items, config.focus_rule);
        let router = EdgeRouter::new(config.edge_stub, config.row_pitch());

        let (start, end) = scale.domain();
        info!(
            items = items.len(),
            bars = bars.len(),
            edges = graph.len(),
            start = start.to_string(),
            end = end.to_string(),
            warnings = load_diagnostics.len();
            "Timeline loaded"
        );

        Ok(Self {
            config,
            items,
            scale,
            bars,
            graph,
            filter,
            router,
            load_diagnostics,
        })
    }

    /// Recompute visibility and edges for `focus`. Bars and scale are only read.
    pub fn frame(&self, focus: &FocusSelection) -> Frame {
        let mut diagnostics = Diagnostics::new();
        let visible = self.filter.visible(&self.graph, focus, &mut diagnostics);
        let bars = self
            .bars
            .iter()
            .filter(|(key, _)| visible.contains(key.as_str()))
            .map(|(key, bar)| (key.clone(), bar.clone()))
            .collect();
        let edges = self.router.route(&self.graph, &visible, &self.bars);

        debug!(
            visible = visible.len(),
            edges = edges.len(),
            focused = focus.is_focused();
            "Frame computed"
        );
        Frame {
            focus: focus.clone(),
            visible,
            bars,
            edges,
            diagnostics,
        }
    }

    /// Transition from `previous` by toggling focus on `key`.
    pub fn toggle_focus(&self, previous: &Frame, key: &ItemKey) -> Frame {
        self.frame(&previous.focus.toggled(key))
    }

    /// Transition from any state to `selection`. Re-selecting the focus of
    /// `previous` hands it back without another pass.
    pub fn refocus(&self, previous: &Frame, selection: FocusSelection) -> Frame {
        if previous.focus == selection {
            return previous.clone();
        }
        self.frame(&selection)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, key: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.key.as_str() == key)
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    /// All bars, regardless of focus.
    pub fn bars(&self) -> &BarLayout {
        &self.bars
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn load_diagnostics(&self) -> &Diagnostics {
        &self.load_diagnostics
    }

    /// x of the "today" marker; `today` is supplied by the caller.
    pub fn today_x(&self, today: NaiveDate) -> Option<f32> {
        self.scale.today_x(today)
    }

    /// Height of all rows, hidden ones included.
    pub fn content_height(&self) -> f32 {
        self.bars.row_count() as f32 * self.config.row_pitch()
    }
}

/// Keep the first item for every key; later copies become diagnostics.
fn first_of_each_key(items: Vec<Item>, diagnostics: &mut Diagnostics) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if seen.contains(&item.key) {
            diagnostics.push(Diagnostic::DuplicateItemKey {
                key: item.key.clone(),
            });
            continue;
        }
        seen.insert(item.key.clone());
        kept.push(item);
    }
    kept
}
