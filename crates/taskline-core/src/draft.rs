//! Create/Edit Form Draft
//!
//! Raw form values for a project or task, validated into a `NewItem` on save.
//! Dates are kept as the `YYYY-MM-DD` strings the date inputs produce.

use crate::dates;
use crate::models::{DatedItem, ItemId, NewItem, Priority, Status, Tag};

pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("name is required")]
    MissingName,
    #[error("start date is required")]
    MissingStart,
    #[error("end date is required")]
    MissingEnd,
    #[error("dates must be YYYY-MM-DD")]
    InvalidDate,
    #[error("end date is before start date")]
    EndBeforeStart,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub start: String,
    pub end: String,
    pub tags: Vec<Tag>,
}

impl ItemDraft {
    pub fn from_item(item: &DatedItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            priority: item.priority,
            status: item.status,
            start: dates::format_day(item.start_date()),
            end: dates::format_day(item.end_date()),
            tags: item.tags.clone(),
        }
    }

    pub fn validate(&self) -> Result<NewItem, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let start = required_date(&self.start, DraftError::MissingStart)?;
        let end = required_date(&self.end, DraftError::MissingEnd)?;
        if end < start {
            return Err(DraftError::EndBeforeStart);
        }
        Ok(NewItem {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            priority: self.priority,
            start_time: dates::start_of_day(start),
            end_time: dates::start_of_day(end),
            tags: self.tags.clone(),
        })
    }

    /// Append a tag; blank names are ignored. Returns the new tag's id.
    pub fn add_tag(&mut self, name: &str, color: &str) -> Option<ItemId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.tags.iter().map(|tag| tag.id).max().unwrap_or(0) + 1;
        let color = if color.trim().is_empty() { DEFAULT_TAG_COLOR } else { color.trim() };
        self.tags.push(Tag {
            id,
            name: name.to_string(),
            color: color.to_string(),
        });
        Some(id)
    }

    /// Blank names leave the tag unchanged
    pub fn rename_tag(&mut self, id: ItemId, name: &str) -> bool {
        let name = name.trim();
        match self.tags.iter_mut().find(|tag| tag.id == id) {
            Some(tag) if !name.is_empty() => {
                tag.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn remove_tag(&mut self, id: ItemId) {
        self.tags.retain(|tag| tag.id != id);
    }
}

fn required_date(raw: &str, missing: DraftError) -> Result<chrono::NaiveDate, DraftError> {
    if raw.trim().is_empty() {
        return Err(missing);
    }
    dates::parse_date(raw).ok_or(DraftError::InvalidDate)
}
