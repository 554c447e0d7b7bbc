pub mod item;
pub mod scenario;

pub use item::{Dependency, DependencyKind, Item, ItemKey, ItemKind};
pub use scenario::Scenario;
