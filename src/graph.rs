//! Validated, ordered store of dependency edges.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{Dependency, DependencyKind, ItemKey};

/// A directed edge between two known items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub from: ItemKey,
    pub to: ItemKey,
    pub kind: DependencyKind,
}

/// Dependency edges that survived validation, in payload order.
///
/// Edges are rendering hints, so cycles are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    edges: IndexMap<(ItemKey, ItemKey), DependencyKind>,
}

impl DependencyGraph {
    /// Keep every dependency whose endpoints are both known and distinct.
    ///
    /// Unknown endpoints, self-edges and repeated `(from, to)` pairs are
    /// dropped with a diagnostic; the first occurrence of a pair wins.
    pub fn build<'a>(
        dependencies: &[Dependency],
        known_keys: impl IntoIterator<Item = &'a ItemKey>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let known: HashSet<&str> = known_keys.into_iter().map(ItemKey::as_str).collect();
        let mut edges = IndexMap::with_capacity(dependencies.len());

        for dep in dependencies {
            let unknown = [&dep.from_key, &dep.to_key]
                .into_iter()
                .find(|key| !known.contains(key.as_str()));
            if let Some(unknown) = unknown {
                diagnostics.push(Diagnostic::UnknownDependencyEndpoint {
                    from: dep.from_key.clone(),
                    to: dep.to_key.clone(),
                    unknown: unknown.clone(),
                });
                continue;
            }
            if dep.from_key == dep.to_key {
                diagnostics.push(Diagnostic::SelfDependency {
                    key: dep.from_key.clone(),
                });
                continue;
            }

            let pair = (dep.from_key.clone(), dep.to_key.clone());
            if edges.contains_key(&pair) {
                diagnostics.push(Diagnostic::DuplicateDependency {
                    from: dep.from_key.clone(),
                    to: dep.to_key.clone(),
                });
                continue;
            }
            edges.insert(pair, dep.kind);
        }

        debug!(edges = edges.len(), dropped = dependencies.len() - edges.len(); "Dependency graph built");
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge> + '_ {
        self.edges.iter().map(|((from, to), kind)| DependencyEdge {
            from: from.clone(),
            to: to.clone(),
            kind: *kind,
        })
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.edges
            .keys()
            .any(|(f, t)| f.as_str() == from && t.as_str() == to)
    }

    /// Items `key` points at.
    pub fn successors<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ItemKey> + 'a {
        self.edges
            .keys()
            .filter(move |(from, _)| from.as_str() == key)
            .map(|(_, to)| to)
    }

    /// Items pointing at `key`.
    pub fn predecessors<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ItemKey> + 'a {
        self.edges
            .keys()
            .filter(move |(_, to)| to.as_str() == key)
            .map(|(from, _)| from)
    }

    /// Items joined to `key` by one edge in either direction, in graph order.
    pub fn neighbors<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ItemKey> + 'a {
        self.edges.keys().filter_map(move |(from, to)| {
            if from.as_str() == key {
                Some(to)
            } else if to.as_str() == key {
                Some(from)
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<ItemKey> {
        names.iter().map(|n| ItemKey::from(*n)).collect()
    }

    #[test]
    fn keeps_valid_edges_in_order() {
        let known = keys(&["A", "B", "C"]);
        let deps = vec![
            Dependency::new("B", "C"),
            Dependency::new("A", "B").with_kind(DependencyKind::StartToStart),
        ];
        let mut diagnostics = Diagnostics::new();
        let graph = DependencyGraph::build(&deps, &known, &mut diagnostics);

        assert!(diagnostics.is_empty());
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!((edges[0].from.as_str(), edges[0].to.as_str()), ("B", "C"));
        assert_eq!(edges[1].kind, DependencyKind::StartToStart);
    }

    #[test]
    fn drops_unknown_endpoints() {
        let known = keys(&["A", "B"]);
        let deps = vec![Dependency::new("A", "GHOST"), Dependency::new("A", "B")];
        let mut diagnostics = Diagnostics::new();
        let graph = DependencyGraph::build(&deps, &known, &mut diagnostics);

        assert_eq!(graph.len(), 1);
        assert!(graph.contains("A", "B"));
        assert_eq!(
            diagnostics.into_vec(),
            [Diagnostic::UnknownDependencyEndpoint {
                from: ItemKey::from("A"),
                to: ItemKey::from("GHOST"),
                unknown: ItemKey::from("GHOST"),
            }]
        );
    }

    #[test]
    fn rejects_self_edges() {
        let known = keys(&["A"]);
        let mut diagnostics = Diagnostics::new();
        let graph = DependencyGraph::build(&[Dependency::new("A", "A")], &known, &mut diagnostics);
        assert!(graph.is_empty());
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::SelfDependency { .. })
        ));
    }

    #[test]
    fn first_duplicate_wins() {
        let known = keys(&["A", "B"]);
        let deps = vec![
            Dependency::new("A", "B"),
            Dependency::new("A", "B").with_kind(DependencyKind::FinishToFinish),
        ];
        let mut diagnostics = Diagnostics::new();
        let graph = DependencyGraph::build(&deps, &known, &mut diagnostics);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edges().next().unwrap().kind, DependencyKind::FinishToStart);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn cycles_are_allowed() {
        let known = keys(&["A", "B"]);
        let deps = vec![Dependency::new("A", "B"), Dependency::new("B", "A")];
        let mut diagnostics = Diagnostics::new();
        let graph = DependencyGraph::build(&deps, &known, &mut diagnostics);
        assert_eq!(graph.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn neighbor_queries() {
        let known = keys(&["A", "B", "C", "D"]);
        let deps = vec![
            Dependency::new("A", "B"),
            Dependency::new("C", "B"),
            Dependency::new("B", "D"),
        ];
        let mut diagnostics = Diagnostics::new();
        let graph = DependencyGraph::build(&deps, &known, &mut diagnostics);

        let succ: Vec<_> = graph.successors("B").map(ItemKey::as_str).collect();
        let pred: Vec<_> = graph.predecessors("B").map(ItemKey::as_str).collect();
        let near: Vec<_> = graph.neighbors("B").map(ItemKey::as_str).collect();
        assert_eq!(succ, ["D"]);
        assert_eq!(pred, ["A", "C"]);
        assert_eq!(near, ["A", "C", "D"]);
    }
}
