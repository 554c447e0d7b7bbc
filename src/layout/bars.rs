use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use super::time_scale::TimeScale;
use crate::config::TimelineConfig;
use crate::diagnostics::{Diagnostic, Diagnostics, MissingDate};
use crate::model::{Item, ItemKey};

/// Geometry of one item on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub key: ItemKey,
    /// Row index in the full, unfiltered ordering.
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bar {
    /// Leading (left) edge.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Trailing (right) edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}

/// Bars for every layoutable item, in row order.
///
/// Computed once per load. Focus changes select from these bars but never
/// recompute them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarLayout {
    bars: IndexMap<ItemKey, Bar>,
}

impl BarLayout {
    /// Lay out every item with a usable date range.
    ///
    /// Items without one get a diagnostic and no bar; they still hold their
    /// place in the hierarchy ordering so their children group under them.
    pub fn compute(
        items: &[Item],
        scale: &TimeScale,
        config: &TimelineConfig,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut bars = IndexMap::with_capacity(items.len());
        let mut row = 0usize;

        for idx in row_order(items) {
            let item = &items[idx];
            let (start, end) = match (item.start_date, item.end_date) {
                (Some(start), Some(end)) if start <= end => (start, end),
                (Some(start), Some(end)) => {
                    diagnostics.push(Diagnostic::InvalidDateRange {
                        key: item.key.clone(),
                        start,
                        end,
                    });
                    continue;
                }
                (start, end) => {
                    let missing = match (start, end) {
                        (None, None) => MissingDate::Both,
                        (None, _) => MissingDate::Start,
                        _ => MissingDate::End,
                    };
                    diagnostics.push(Diagnostic::MissingDate {
                        key: item.key.clone(),
                        missing,
                    });
                    continue;
                }
            };

            let x = scale.map(start);
            let bar = Bar {
                key: item.key.clone(),
                row,
                x,
                y: row as f32 * config.row_pitch() + config.bar_inset,
                width: scale.map(end) - x,
                height: config.bar_height(),
            };
            bars.insert(item.key.clone(), bar);
            row += 1;
        }

        debug!(bars = bars.len(), items = items.len(); "Bar layout computed");
        Self { bars }
    }

    pub fn get(&self, key: &str) -> Option<&Bar> {
        self.bars.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemKey, &Bar)> {
        self.bars.iter()
    }

    pub fn row_count(&self) -> usize {
        self.bars.len()
    }

    /// The bar whose rectangle contains the point, if any.
    pub fn hit(&self, x: f32, y: f32) -> Option<&Bar> {
        self.bars.values().find(|bar| bar.contains(x, y))
    }
}

/// Stable row order over the whole item set: hierarchy grouping, then rank,
/// then payload position.
///
/// Roots are items without a parent or whose parent is not in the set. Each
/// item is followed by its descendants, depth-first. Items on a parent cycle
/// are appended afterwards, starting from the earliest in payload order.
pub fn row_order(items: &[Item]) -> Vec<usize> {
    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.key.as_str(), i))
        .collect();

    let mut roots = Vec::new();
    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        let parent = item
            .parent_key
            .as_ref()
            .and_then(|p| index.get(p.as_str()).copied())
            .filter(|&p| p != i);
        match parent {
            Some(p) => children.entry(p).or_default().push(i),
            None => roots.push(i),
        }
    }

    let sort_key = |&i: &usize| (items[i].rank.is_none(), items[i].rank.unwrap_or(0), i);
    roots.sort_by_key(sort_key);
    for siblings in children.values_mut() {
        siblings.sort_by_key(sort_key);
    }

    let mut order = Vec::with_capacity(items.len());
    let mut visited = vec![false; items.len()];
    let starts = roots.into_iter().chain(0..items.len());
    for start in starts {
        if visited[start] {
            continue;
        }
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            order.push(i);
            if let Some(kids) = children.get(&i) {
                stack.extend(kids.iter().rev().copied().filter(|&k| !visited[k]));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use float_cmp::assert_approx_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keys_in_order(items: &[Item]) -> Vec<&str> {
        row_order(items)
            .into_iter()
            .map(|i| items[i].key.as_str())
            .collect()
    }

    fn layout(items: &[Item]) -> (BarLayout, Diagnostics) {
        let scale = TimeScale::build(items, 1000.0).unwrap();
        let mut diagnostics = Diagnostics::new();
        let bars = BarLayout::compute(items, &scale, &TimelineConfig::default(), &mut diagnostics);
        (bars, diagnostics)
    }

    #[test]
    fn children_follow_their_parent() {
        let d = date(2026, 1, 1);
        let items = vec![
            Item::new("S1", d, d).with_parent("EPIC-B"),
            Item::new("EPIC-A", d, d),
            Item::new("EPIC-B", d, d),
            Item::new("S2", d, d).with_parent("EPIC-A"),
            Item::new("S3", d, d).with_parent("EPIC-B"),
        ];
        assert_eq!(keys_in_order(&items), ["EPIC-A", "S2", "EPIC-B", "S1", "S3"]);
    }

    #[test]
    fn rank_orders_siblings_before_payload_position() {
        let d = date(2026, 1, 1);
        let items = vec![
            Item::new("A", d, d),
            Item::new("B", d, d).with_rank(2),
            Item::new("C", d, d).with_rank(1),
        ];
        assert_eq!(keys_in_order(&items), ["C", "B", "A"]);
    }

    #[test]
    fn unknown_parent_makes_a_root() {
        let d = date(2026, 1, 1);
        let items = vec![Item::new("A", d, d).with_parent("GONE"), Item::new("B", d, d)];
        assert_eq!(keys_in_order(&items), ["A", "B"]);
    }

    #[test]
    fn parent_cycle_still_emits_every_item_once() {
        let d = date(2026, 1, 1);
        let items = vec![
            Item::new("R", d, d),
            Item::new("X", d, d).with_parent("Y"),
            Item::new("Y", d, d).with_parent("X"),
            Item::new("Z", d, d).with_parent("Z"),
        ];
        assert_eq!(keys_in_order(&items), ["R", "Z", "X", "Y"]);
    }

    #[test]
    fn bar_geometry_comes_from_dates_and_row() {
        let items = vec![
            Item::new("E1", date(2026, 1, 1), date(2026, 3, 1)),
            Item::new("E2", date(2026, 2, 1), date(2026, 4, 1)),
        ];
        let (bars, diagnostics) = layout(&items);
        assert!(diagnostics.is_empty());

        let scale = TimeScale::build(&items, 1000.0).unwrap();
        let e2 = bars.get("E2").unwrap();
        assert_eq!(e2.row, 1);
        assert_eq!(e2.x, scale.map(date(2026, 2, 1)));
        assert_eq!(e2.width, scale.map(date(2026, 4, 1)) - scale.map(date(2026, 2, 1)));
        assert_approx_eq!(f32, e2.y, 35.0);
        assert_approx_eq!(f32, e2.height, 24.0);
    }

    #[test]
    fn dateless_item_gets_no_bar_and_no_row() {
        let mut e4 = Item::undated("E4");
        e4.start_date = Some(date(2026, 1, 10));
        let items = vec![
            Item::new("E1", date(2026, 1, 1), date(2026, 3, 1)),
            e4,
            Item::new("E2", date(2026, 2, 1), date(2026, 4, 1)),
        ];
        let (bars, diagnostics) = layout(&items);
        assert!(!bars.contains("E4"));
        assert_eq!(bars.get("E2").unwrap().row, 1);
        assert_eq!(
            diagnostics.into_vec(),
            [Diagnostic::MissingDate {
                key: ItemKey::from("E4"),
                missing: MissingDate::End,
            }]
        );
    }

    #[test]
    fn undated_parent_keeps_its_children_grouped() {
        let items = vec![
            Item::new("EPIC-A", date(2026, 1, 1), date(2026, 3, 1)),
            Item::new("S-X", date(2026, 1, 5), date(2026, 1, 20)).with_parent("EPIC-B"),
            Item::undated("EPIC-B"),
            Item::new("S-Y", date(2026, 2, 1), date(2026, 2, 20)).with_parent("EPIC-B"),
            Item::new("S-Z", date(2026, 1, 10), date(2026, 2, 10)).with_parent("EPIC-A"),
        ];
        assert_eq!(
            keys_in_order(&items),
            ["EPIC-A", "S-Z", "EPIC-B", "S-X", "S-Y"]
        );

        let (bars, diagnostics) = layout(&items);
        assert!(!bars.contains("EPIC-B"));
        let rows: Vec<(&str, usize)> = bars.iter().map(|(k, b)| (k.as_str(), b.row)).collect();
        assert_eq!(rows, [("EPIC-A", 0), ("S-Z", 1), ("S-X", 2), ("S-Y", 3)]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn inverted_range_is_reported() {
        let items = vec![
            Item::new("A", date(2026, 1, 1), date(2026, 2, 1)),
            Item::new("B", date(2026, 3, 1), date(2026, 1, 15)),
        ];
        let (bars, diagnostics) = layout(&items);
        assert_eq!(bars.len(), 1);
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn milestone_has_zero_width() {
        let items = vec![
            Item::new("A", date(2026, 1, 1), date(2026, 2, 1)),
            Item::new("M", date(2026, 1, 15), date(2026, 1, 15)),
        ];
        let (bars, _) = layout(&items);
        assert_eq!(bars.get("M").unwrap().width, 0.0);
    }

    #[test]
    fn hit_finds_bar_under_point() {
        let items = vec![Item::new("A", date(2026, 1, 1), date(2026, 2, 1))];
        let (bars, _) = layout(&items);
        let a = bars.get("A").unwrap();
        assert_eq!(bars.hit(a.x + 1.0, a.center_y()).map(|b| b.key.as_str()), Some("A"));
        assert!(bars.hit(a.x + 1.0, a.bottom() + 5.0).is_none());
    }
}
