use std::borrow::Borrow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier of a work item, e.g. `PRODUCT-33713`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Issue type of a work item.
///
/// The set is open: unrecognised names are kept verbatim in `Other`.
/// The kind is presentation only: ordering, focus, time mapping and bar
/// geometry never look at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Epic,
    Story,
    #[default]
    Task,
    Bug,
    Milestone,
    Other(String),
}

impl ItemKind {
    pub fn name(&self) -> &str {
        match self {
            ItemKind::Epic => "Epic",
            ItemKind::Story => "Story",
            ItemKind::Task => "Task",
            ItemKind::Bug => "Bug",
            ItemKind::Milestone => "Milestone",
            ItemKind::Other(name) => name,
        }
    }
}

impl From<String> for ItemKind {
    fn from(name: String) -> Self {
        match name.trim().to_lowercase().as_str() {
            "epic" => ItemKind::Epic,
            "story" | "user story" => ItemKind::Story,
            "task" | "sub-task" | "subtask" => ItemKind::Task,
            "bug" | "defect" => ItemKind::Bug,
            "milestone" => ItemKind::Milestone,
            _ => ItemKind::Other(name),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single work item on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub key: ItemKey,
    #[serde(default)]
    pub kind: ItemKind,
    /// Display label; the host falls back to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, with = "optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<ItemKey>,
    /// Ordering key among siblings. Unranked items sort after ranked ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
}

impl Item {
    /// Create an item of the default kind spanning `start..=end`.
    pub fn new(key: impl Into<ItemKey>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            key: key.into(),
            kind: ItemKind::default(),
            summary: None,
            start_date: Some(start),
            end_date: Some(end),
            parent_key: None,
            rank: None,
        }
    }

    /// Create an item with neither date set.
    pub fn undated(key: impl Into<ItemKey>) -> Self {
        Self {
            key: key.into(),
            kind: ItemKind::default(),
            summary: None,
            start_date: None,
            end_date: None,
            parent_key: None,
            rank: None,
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<ItemKey>) -> Self {
        self.parent_key = Some(parent.into());
        self
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// The `(start, end)` pair when both dates are present and ordered.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }

    /// Whether this item can be placed on the timeline.
    pub fn is_layoutable(&self) -> bool {
        self.date_range().is_some()
    }

    /// Label shown on the bar.
    pub fn label(&self) -> &str {
        self.summary.as_deref().unwrap_or(self.key.as_str())
    }
}

/// Which sides of the two bars a dependency edge connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DependencyKind {
    #[default]
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

/// A directed dependency between two items as delivered by the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub from_key: ItemKey,
    pub to_key: ItemKey,
    #[serde(default)]
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(from: impl Into<ItemKey>, to: impl Into<ItemKey>) -> Self {
        Self {
            from_key: from.into(),
            to_key: to.into(),
            kind: DependencyKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Serde helper for optional `YYYY-MM-DD` calendar dates.
///
/// `null`, a missing field and `""` all read as `None`. Dates are parsed as
/// plain calendar dates, so no timezone can shift the day.
mod optional_date {
    use chrono::NaiveDate;
    use serde::{self, de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid date '{s}': {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_item_with_camel_case_fields() {
        let json = r#"{
            "key": "PRODUCT-33713",
            "kind": "epic",
            "startDate": "2026-01-29",
            "endDate": "2026-03-01",
            "parentKey": "PRODUCT-33712",
            "rank": 3
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.key.as_str(), "PRODUCT-33713");
        assert_eq!(item.kind, ItemKind::Epic);
        assert_eq!(item.start_date, Some(date(2026, 1, 29)));
        assert_eq!(item.end_date, Some(date(2026, 3, 1)));
        assert_eq!(item.parent_key, Some(ItemKey::from("PRODUCT-33712")));
        assert_eq!(item.rank, Some(3));
    }

    #[test]
    fn dates_keep_their_calendar_day() {
        for (raw, expected) in [
            ("2026-01-01", date(2026, 1, 1)),
            ("2026-01-29", date(2026, 1, 29)),
            ("2026-12-31", date(2026, 12, 31)),
            ("2025-02-28", date(2025, 2, 28)),
        ] {
            let json = format!(r#"{{"key": "A", "startDate": "{raw}"}}"#);
            let item: Item = serde_json::from_str(&json).unwrap();
            assert_eq!(item.start_date, Some(expected), "parsing {raw}");
        }
    }

    #[test]
    fn empty_and_null_dates_are_missing() {
        let item: Item =
            serde_json::from_str(r#"{"key": "A", "startDate": "", "endDate": null}"#).unwrap();
        assert_eq!(item.start_date, None);
        assert_eq!(item.end_date, None);
        assert!(!item.is_layoutable());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let result: Result<Item, _> =
            serde_json::from_str(r#"{"key": "A", "startDate": "29/01/2026"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let item: Item = serde_json::from_str(r#"{"key": "A", "kind": "Spike"}"#).unwrap();
        assert_eq!(item.kind, ItemKind::Other("Spike".to_string()));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "Spike");
    }

    #[test]
    fn inverted_range_is_not_layoutable() {
        let item = Item::new("A", date(2026, 3, 1), date(2026, 1, 1));
        assert_eq!(item.date_range(), None);
    }

    #[test]
    fn dependency_kind_defaults_to_finish_to_start() {
        let dep: Dependency = serde_json::from_str(r#"{"fromKey": "A", "toKey": "B"}"#).unwrap();
        assert_eq!(dep.kind, DependencyKind::FinishToStart);
        assert_eq!(dep, Dependency::new("A", "B"));
    }

    #[test]
    fn label_falls_back_to_key() {
        let item = Item::undated("A");
        assert_eq!(item.label(), "A");
        assert_eq!(item.with_summary("Checkout").label(), "Checkout");
    }
}
