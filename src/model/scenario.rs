use serde::{Deserialize, Serialize};

use super::item::{Dependency, Item};

/// A scenario payload: the work items and the dependencies between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Scenario {
    pub fn new(items: Vec<Item>, dependencies: Vec<Dependency>) -> Self {
        Self {
            items,
            dependencies,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by key.
    pub fn item(&self, key: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.key.as_str() == key)
    }
}
