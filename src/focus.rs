//! Focus selection and the rule deciding which items it shows.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::graph::DependencyGraph;
use crate::model::{Item, ItemKey};

/// What the host has focused: nothing, or one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FocusSelection {
    #[default]
    None,
    Item(ItemKey),
}

impl FocusSelection {
    pub fn item(key: impl Into<ItemKey>) -> Self {
        FocusSelection::Item(key.into())
    }

    pub fn focused_key(&self) -> Option<&ItemKey> {
        match self {
            FocusSelection::None => None,
            FocusSelection::Item(key) => Some(key),
        }
    }

    pub fn is_focused(&self) -> bool {
        matches!(self, FocusSelection::Item(_))
    }

    /// Toggle focus on `key`: focusing the already focused item clears focus,
    /// anything else moves focus to `key`.
    pub fn toggled(&self, key: &ItemKey) -> Self {
        match self {
            FocusSelection::Item(current) if current == key => FocusSelection::None,
            _ => FocusSelection::Item(key.clone()),
        }
    }
}

/// Which items stay visible around a focused item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusRule {
    /// The focused item, its ancestors and all its descendants.
    Hierarchy,
    /// The focused item and the items one dependency edge away.
    DirectLinks,
    /// Both of the above.
    #[default]
    HierarchyAndLinks,
}

impl FocusRule {
    fn includes_hierarchy(self) -> bool {
        matches!(self, FocusRule::Hierarchy | FocusRule::HierarchyAndLinks)
    }

    fn includes_links(self) -> bool {
        matches!(self, FocusRule::DirectLinks | FocusRule::HierarchyAndLinks)
    }
}

/// Keys of the items shown in one frame, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    keys: BTreeSet<ItemKey>,
}

impl VisibleSet {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemKey> {
        self.keys.iter()
    }
}

impl FromIterator<ItemKey> for VisibleSet {
    fn from_iter<T: IntoIterator<Item = ItemKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Decides visibility from the item hierarchy and the dependency graph.
///
/// Built once per load; it only knows keys, parents and which items have a
/// usable date range, so it cannot observe any geometry.
#[derive(Debug, Clone)]
pub struct VisibilityFilter {
    rule: FocusRule,
    known: HashSet<ItemKey>,
    layoutable: BTreeSet<ItemKey>,
    parents: HashMap<ItemKey, ItemKey>,
    children: HashMap<ItemKey, Vec<ItemKey>>,
}

impl VisibilityFilter {
    pub fn new(items: &[Item], rule: FocusRule) -> Self {
        let known: HashSet<ItemKey> = items.iter().map(|item| item.key.clone()).collect();
        let layoutable = items
            .iter()
            .filter(|item| item.is_layoutable())
            .map(|item| item.key.clone())
            .collect();

        let mut parents = HashMap::new();
        let mut children: HashMap<ItemKey, Vec<ItemKey>> = HashMap::new();
        for item in items {
            if let Some(parent) = item.parent_key.as_ref() {
                if known.contains(parent) && *parent != item.key {
                    parents.insert(item.key.clone(), parent.clone());
                    children
                        .entry(parent.clone())
                        .or_default()
                        .push(item.key.clone());
                }
            }
        }

        Self {
            rule,
            known,
            layoutable,
            parents,
            children,
        }
    }

    pub fn rule(&self) -> FocusRule {
        self.rule
    }

    /// Items shown under `focus`.
    ///
    /// Without focus, or when the focused key is unknown, every layoutable
    /// item is visible; the unknown key is reported as a diagnostic.
    pub fn visible(
        &self,
        graph: &DependencyGraph,
        focus: &FocusSelection,
        diagnostics: &mut Diagnostics,
    ) -> VisibleSet {
        let focused = match focus {
            FocusSelection::None => return self.everything(),
            FocusSelection::Item(key) if !self.known.contains(key) => {
                diagnostics.push(Diagnostic::InvalidFocusKey { key: key.clone() });
                return self.everything();
            }
            FocusSelection::Item(key) => key,
        };

        let mut members: HashSet<&ItemKey> = HashSet::new();
        members.insert(focused);
        if self.rule.includes_hierarchy() {
            self.collect_ancestors(focused, &mut members);
            self.collect_descendants(focused, &mut members);
        }
        if self.rule.includes_links() {
            members.extend(graph.neighbors(focused.as_str()));
        }

        let visible: VisibleSet = members
            .into_iter()
            .filter(|key| self.layoutable.contains(*key))
            .cloned()
            .collect();
        debug!(focus = focused.as_str(), visible = visible.len(); "Focus applied");
        visible
    }

    fn everything(&self) -> VisibleSet {
        self.layoutable.iter().cloned().collect()
    }

    fn collect_ancestors<'a>(&'a self, key: &'a ItemKey, members: &mut HashSet<&'a ItemKey>) {
        let mut current = key;
        while let Some(parent) = self.parents.get(current) {
            if !members.insert(parent) {
                break;
            }
            current = parent;
        }
    }

    fn collect_descendants<'a>(&'a self, key: &'a ItemKey, members: &mut HashSet<&'a ItemKey>) {
        let mut pending = vec![key];
        let mut seen: HashSet<&ItemKey> = HashSet::from([key]);
        while let Some(current) = pending.pop() {
            for child in self.children.get(current).into_iter().flatten() {
                if seen.insert(child) {
                    members.insert(child);
                    pending.push(child);
                }
            }
        }
    }
}

/// One-shot visibility over `items` without keeping a filter around.
pub fn visible(
    items: &[Item],
    graph: &DependencyGraph,
    focus: &FocusSelection,
    rule: FocusRule,
    diagnostics: &mut Diagnostics,
) -> VisibleSet {
    VisibilityFilter::new(items, rule).visible(graph, focus, diagnostics)
}
