use std::fs;
use std::path::Path;

use log::info;

use crate::error::TimelineError;
use crate::model::Scenario;

/// Load a scenario payload from a JSON file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, TimelineError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let scenario = parse_scenario(&json)?;
    info!(
        path = path.display().to_string(),
        items = scenario.items.len(),
        dependencies = scenario.dependencies.len();
        "Scenario loaded"
    );
    Ok(scenario)
}

/// Parse a scenario payload from a JSON string.
pub fn parse_scenario(json: &str) -> Result<Scenario, TimelineError> {
    Ok(serde_json::from_str(json)?)
}

/// Save a scenario payload to a JSON file.
pub fn save_scenario(scenario: &Scenario, path: impl AsRef<Path>) -> Result<(), TimelineError> {
    let json = serde_json::to_string_pretty(scenario)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Dependency, Item, ItemKind};

    #[test]
    fn parses_a_payload() {
        let json = r#"{
            "items": [
                {"key": "E1", "kind": "Epic", "startDate": "2026-01-01", "endDate": "2026-03-01"},
                {"key": "S1", "kind": "Story", "parentKey": "E1", "startDate": "2026-01-05", "endDate": ""}
            ],
            "dependencies": [{"fromKey": "E1", "toKey": "S1", "kind": "StartToStart"}]
        }"#;
        let scenario = parse_scenario(json).unwrap();
        assert_eq!(scenario.items.len(), 2);
        assert_eq!(scenario.item("S1").unwrap().end_date, None);
        assert_eq!(scenario.item("S1").unwrap().kind, ItemKind::Story);
        assert_eq!(scenario.dependencies.len(), 1);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let scenario = parse_scenario("{}").unwrap();
        assert!(scenario.is_empty());
        assert!(scenario.dependencies.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_scenario("{\"items\": [}"),
            Err(TimelineError::Json(_))
        ));
    }

    #[test]
    fn file_round_trip() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();
        let scenario = Scenario::new(
            vec![Item::new("A", d, d), Item::undated("B").with_parent("A")],
            vec![Dependency::new("A", "B")],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        save_scenario(&scenario, &path).unwrap();
        assert_eq!(load_scenario(&path).unwrap(), scenario);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_scenario(dir.path().join("absent.json")),
            Err(TimelineError::Io(_))
        ));
    }
}
