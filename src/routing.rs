//! Dependency edge routing between visible bars.
//!
//! Each graph edge is a candidate that ends up either routed or omitted. An
//! edge is routed only when both endpoints are visible and have a bar, and
//! its path is derived from those two bars alone. There is no placeholder
//! geometry for a missing endpoint: such an edge is simply not in the output.

use std::fmt::Write as _;

use log::{debug, trace};

use crate::focus::VisibleSet;
use crate::graph::{DependencyEdge, DependencyGraph};
use crate::layout::{Bar, BarLayout};
use crate::model::{DependencyKind, ItemKey};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Orthogonal polyline from the source anchor to the target anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    points: Vec<Point>,
}

impl EdgePath {
    /// Build a path, dropping consecutive duplicate points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut deduped: Vec<Point> = Vec::new();
        for point in points {
            if deduped.last() != Some(&point) {
                deduped.push(point);
            }
        }
        Self { points: deduped }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// SVG path data, e.g. `M 10 15 L 20 15 L 20 47`.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            let _ = write!(d, "{cmd} {} {}", p.x, p.y);
        }
        d
    }
}

/// A dependency edge with both endpoints on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    pub from: ItemKey,
    pub to: ItemKey,
    pub kind: DependencyKind,
    pub path: EdgePath,
}

/// Why a candidate edge was not routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Omission {
    HiddenEndpoint(ItemKey),
    MissingBar(ItemKey),
}

/// Which side of a bar an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Leading,
    Trailing,
}

impl Side {
    fn x(self, bar: &Bar) -> f32 {
        match self {
            Side::Leading => bar.left(),
            Side::Trailing => bar.right(),
        }
    }

    /// Horizontal direction pointing away from the bar.
    fn outward(self) -> f32 {
        match self {
            Side::Leading => -1.0,
            Side::Trailing => 1.0,
        }
    }
}

fn sides(kind: DependencyKind) -> (Side, Side) {
    match kind {
        DependencyKind::FinishToStart => (Side::Trailing, Side::Leading),
        DependencyKind::StartToStart => (Side::Leading, Side::Leading),
        DependencyKind::FinishToFinish => (Side::Trailing, Side::Trailing),
        DependencyKind::StartToFinish => (Side::Leading, Side::Trailing),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRouter {
    stub: f32,
    /// Distance between consecutive rows; bars sit centred in their row.
    row_pitch: f32,
}

impl EdgeRouter {
    pub fn new(stub: f32, row_pitch: f32) -> Self {
        Self { stub, row_pitch }
    }

    /// Route every graph edge whose endpoints are both visible, in graph order.
    pub fn route(
        &self,
        graph: &DependencyGraph,
        visible: &VisibleSet,
        bars: &BarLayout,
    ) -> Vec<RoutedEdge> {
        let mut routed = Vec::new();
        for edge in graph.edges() {
            match self.route_edge(&edge, visible, bars) {
                Ok(edge) => routed.push(edge),
                Err(omission) => trace!(
                    from = edge.from.as_str(),
                    to = edge.to.as_str(),
                    reason:? = omission;
                    "Edge omitted"
                ),
            }
        }
        debug!(routed = routed.len(), candidates = graph.len(); "Edges routed");
        routed
    }

    /// Resolve one candidate edge.
    pub fn route_edge(
        &self,
        edge: &DependencyEdge,
        visible: &VisibleSet,
        bars: &BarLayout,
    ) -> Result<RoutedEdge, Omission> {
        let from = visible_bar(&edge.from, visible, bars)?;
        let to = visible_bar(&edge.to, visible, bars)?;
        Ok(RoutedEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            kind: edge.kind,
            path: self.path_between(from, to, edge.kind),
        })
    }

    fn path_between(&self, from: &Bar, to: &Bar, kind: DependencyKind) -> EdgePath {
        let (from_side, to_side) = sides(kind);
        let start = Point::new(from_side.x(from), from.center_y());
        let end = Point::new(to_side.x(to), to.center_y());
        let lead_out = start.x + from_side.outward() * self.stub;
        let lead_in = end.x + to_side.outward() * self.stub;

        // Direction of travel when leaving the source and when arriving at the target.
        let leaving = from_side.outward();
        let arriving = -to_side.outward();

        if leaving != arriving {
            // Both stubs point the same way: wrap around the outermost one.
            let x = if leaving > 0.0 {
                lead_out.max(lead_in)
            } else {
                lead_out.min(lead_in)
            };
            return EdgePath::from_points([start, Point::new(x, start.y), Point::new(x, end.y), end]);
        }

        if (lead_in - lead_out) * leaving >= 0.0 {
            // Room for a single vertical jog between the stubs.
            let mid = (lead_out + lead_in) / 2.0;
            return EdgePath::from_points([start, Point::new(mid, start.y), Point::new(mid, end.y), end]);
        }

        // Target lies behind the source: detour along the row boundary next to
        // the source, on the side facing the target. No bar crosses it.
        let gap_y = if end.y >= start.y {
            from.center_y() + self.row_pitch / 2.0
        } else {
            from.center_y() - self.row_pitch / 2.0
        };
        EdgePath::from_points([
            start,
            Point::new(lead_out, start.y),
            Point::new(lead_out, gap_y),
            Point::new(lead_in, gap_y),
            Point::new(lead_in, end.y),
            end,
        ])
    }
}

fn visible_bar<'a>(key: &ItemKey, visible: &VisibleSet, bars: &'a BarLayout) -> Result<&'a Bar, Omission> {
    if !visible.contains(key.as_str()) {
        return Err(Omission::HiddenEndpoint(key.clone()));
    }
    bars.get(key.as_str())
        .ok_or_else(|| Omission::MissingBar(key.clone()))
}
