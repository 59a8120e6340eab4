//! Domain Models
//!
//! One dated-item shape for both projects and tasks. Collection-specific
//! wire names are translated in `wire`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type ItemId = u64;

/// Work status of a project or task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Todo,
    #[serde(alias = "in-progress", alias = "in_progress")]
    InProgress,
    Completed,
}

impl Status {
    /// Menu order
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inProgress",
            Status::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Status::Todo),
            "inProgress" | "in-progress" | "in_progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

/// Priority of a project or task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Menu order, most urgent first
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: ItemId,
    pub name: String,
    /// Hex color, e.g. "#3B82F6"
    pub color: String,
}

/// A project or a task, as far as the list and timeline views care
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: Status,
    pub priority: Priority,
    /// Display order is insertion order
    pub tags: Vec<Tag>,
    /// Owning project for tasks, None for projects
    pub project_id: Option<ItemId>,
}

impl DatedItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            start_time,
            end_time,
            status: Status::default(),
            priority: Priority::default(),
            tags: Vec::new(),
            project_id: None,
        }
    }

    /// Case-insensitive match against name or description
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }

    /// Whether the item's date span touches the inclusive day range
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_time.date_naive() <= end && self.end_time.date_naive() >= start
    }

    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_time.date_naive()
    }
}

/// Partial update sent to `CollectionSource::update`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub tags: Option<Vec<Tag>>,
}

impl ItemPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A validated item ready to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl NewItem {
    /// Full replacement patch, used when the form edits an existing item
    pub fn into_patch(self) -> ItemPatch {
        ItemPatch {
            name: Some(self.name),
            description: Some(self.description),
            status: Some(self.status),
            priority: Some(self.priority),
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            tags: Some(self.tags),
        }
    }

    pub fn into_item(self, id: ItemId, project_id: Option<ItemId>) -> DatedItem {
        DatedItem {
            id,
            name: self.name,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
            priority: self.priority,
            tags: self.tags,
            project_id,
        }
    }
}

/// One page of a collection as returned by the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub total: u64,
    pub items: Vec<DatedItem>,
}

/// Test shorthand: an item spanning whole days
#[cfg(test)]
pub fn item_on_days(id: ItemId, name: &str, start: NaiveDate, end: NaiveDate) -> DatedItem {
    use crate::dates::start_of_day;
    DatedItem::new(id, name, start_of_day(start), start_of_day(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_accepts_both_in_progress_spellings() {
        assert_eq!(Status::parse("in-progress"), Some(Status::InProgress));
        assert_eq!(Status::parse("inProgress"), Some(Status::InProgress));
        let parsed: Status = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, Status::InProgress);
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"inProgress\"");
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let mut item = item_on_days(1, "Website Redesign", day(2024, 3, 1), day(2024, 3, 2));
        item.description = "Modern UI/UX".to_string();
        assert!(item.matches_search("website"));
        assert!(item.matches_search("ui/ux"));
        assert!(!item.matches_search("backend"));
    }

    #[test]
    fn test_overlaps_inclusive_bounds() {
        let item = item_on_days(1, "a", day(2024, 3, 10), day(2024, 3, 20));
        assert!(item.overlaps(day(2024, 3, 20), day(2024, 3, 25)));
        assert!(item.overlaps(day(2024, 3, 1), day(2024, 3, 10)));
        assert!(!item.overlaps(day(2024, 3, 21), day(2024, 3, 25)));
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut item = item_on_days(1, "a", day(2024, 3, 10), day(2024, 3, 20));
        item.apply_patch(&ItemPatch::priority(Priority::High));
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.status, Status::Todo);
        assert_eq!(item.name, "a");
    }
}
