//! Scenario payload files.

pub mod file;

pub use file::{load_scenario, parse_scenario, save_scenario};
