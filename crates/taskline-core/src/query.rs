//! List Query State
//!
//! Search, filter and pagination state for one list view, the rule deciding
//! when a change warrants a reload, and the request params derived from it.
//!
//! Reload rule, checked after every filter change: reload when the search
//! term, priority or status is set, when both date bounds are set, or when
//! every filter is empty. A lone date bound with nothing else active is an
//! unfinished query and is held back. Page changes always reload.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates;
use crate::models::{ItemId, Priority, Status};

pub const CURRENT_PAGE_KEY: &str = "current_page";
pub const PAGE_SIZE_KEY: &str = "page_size";

/// Which backend collection a list view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Tasks { project_id: ItemId },
}

/// Wire field names of one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeys {
    pub name: &'static str,
    pub description: &'static str,
    pub priority: &'static str,
    pub status: &'static str,
    pub tags: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

impl Collection {
    pub fn keys(&self) -> FieldKeys {
        match self {
            Collection::Projects => FieldKeys {
                name: "project_name",
                description: "project_desc",
                priority: "project_priority",
                status: "project_status",
                tags: "project_tags",
                start: "start_time",
                end: "end_time",
            },
            Collection::Tasks { .. } => FieldKeys {
                name: "task_name",
                description: "task_desc",
                priority: "task_priority",
                status: "task_status",
                tags: "task_tags",
                start: "start_time",
                end: "end_time",
            },
        }
    }

    pub fn project_id(&self) -> Option<ItemId> {
        match self {
            Collection::Projects => None,
            Collection::Tasks { project_id } => Some(*project_id),
        }
    }
}

/// Outcome of a state change
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    Fetch,
    Skip,
}

impl Reload {
    pub fn is_fetch(self) -> bool {
        self == Reload::Fetch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRangeFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRangeFilter {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_partial(&self) -> bool {
        !self.is_complete() && !self.is_empty()
    }

    /// Both bounds, only when complete
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?, self.end?))
    }
}

/// Query parameters for the list endpoint; only non-empty fields are present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<&'static str, String>);

impl RequestParams {
    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn current_page(&self) -> Option<u32> {
        self.get(CURRENT_PAGE_KEY)?.parse().ok()
    }

    pub fn page_size(&self) -> Option<u32> {
        self.get(PAGE_SIZE_KEY)?.parse().ok()
    }
}

/// `ceil(total / page_size)`; zero when there is nothing to show
pub fn derive_total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    collection: Collection,
    search_term: String,
    priority: Option<Priority>,
    status: Option<Status>,
    date_range: DateRangeFilter,
    current_page: u32,
    page_size: u32,
}

impl QueryState {
    pub fn new(collection: Collection, page_size: u32) -> Self {
        Self {
            collection,
            search_term: String::new(),
            priority: None,
            status: None,
            date_range: DateRangeFilter::default(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn priority_filter(&self) -> Option<Priority> {
        self.priority
    }

    pub fn status_filter(&self) -> Option<Status> {
        self.status
    }

    pub fn date_range(&self) -> DateRangeFilter {
        self.date_range
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// True when no search/priority/status/date field is set
    pub fn is_unfiltered(&self) -> bool {
        !self.has_search() && self.priority.is_none() && self.status.is_none() && self.date_range.is_empty()
    }

    /// Whether the current filter combination is worth querying
    pub fn filters_settled(&self) -> bool {
        self.has_search()
            || self.priority.is_some()
            || self.status.is_some()
            || self.date_range.is_complete()
            || self.is_unfiltered()
    }

    fn filter_changed(&mut self) -> Reload {
        self.current_page = 1;
        let settled = self.filters_settled();
        log::debug!(
            "[query] filters changed, settled={} partial_range={}",
            settled,
            self.date_range.is_partial()
        );
        if settled {
            Reload::Fetch
        } else {
            Reload::Skip
        }
    }

    pub fn set_search_term(&mut self, value: impl Into<String>) -> Reload {
        let value = value.into();
        if value == self.search_term {
            return Reload::Skip;
        }
        self.search_term = value;
        self.filter_changed()
    }

    pub fn set_priority_filter(&mut self, value: Option<Priority>) -> Reload {
        if value == self.priority {
            return Reload::Skip;
        }
        self.priority = value;
        self.filter_changed()
    }

    pub fn set_status_filter(&mut self, value: Option<Status>) -> Reload {
        if value == self.status {
            return Reload::Skip;
        }
        self.status = value;
        self.filter_changed()
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Reload {
        let range = DateRangeFilter { start, end };
        if range == self.date_range {
            return Reload::Skip;
        }
        self.date_range = range;
        self.filter_changed()
    }

    /// Pages are 1-based; 0 is treated as 1
    pub fn set_page(&mut self, page: u32) -> Reload {
        let page = page.max(1);
        if page == self.current_page {
            return Reload::Skip;
        }
        self.current_page = page;
        Reload::Fetch
    }

    /// Clear every filter in one step; the next load starts at page 1
    pub fn reset(&mut self) -> Reload {
        if self.is_unfiltered() && self.search_term.is_empty() && self.current_page == 1 {
            return Reload::Skip;
        }
        self.search_term.clear();
        self.priority = None;
        self.status = None;
        self.date_range = DateRangeFilter::default();
        self.filter_changed()
    }

    pub fn build_request_params(&self) -> RequestParams {
        let keys = self.collection.keys();
        let mut params = RequestParams::default();

        let term = self.search_term.trim();
        if !term.is_empty() {
            params.insert(keys.name, term);
        }
        if let Some(priority) = self.priority {
            params.insert(keys.priority, priority.as_str());
        }
        if let Some(status) = self.status {
            params.insert(keys.status, status.as_str());
        }
        if let Some((start, end)) = self.date_range.bounds() {
            params.insert(keys.start, dates::format_day(start));
            params.insert(keys.end, dates::format_day(end));
        }
        params.insert(CURRENT_PAGE_KEY, self.current_page.to_string());
        params.insert(PAGE_SIZE_KEY, self.page_size.to_string());
        params
    }

    pub fn total_pages(&self, total: u64) -> u32 {
        derive_total_pages(total, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn projects() -> QueryState {
        QueryState::new(Collection::Projects, 6)
    }

    #[test]
    fn test_derive_total_pages() {
        assert_eq!(derive_total_pages(0, 6), 0);
        assert_eq!(derive_total_pages(13, 6), 3);
        assert_eq!(derive_total_pages(6, 6), 1);
        assert_eq!(derive_total_pages(7, 6), 2);
        assert_eq!(derive_total_pages(10, 0), 0);
    }

    #[test]
    fn test_partial_date_range_is_held_back() {
        let mut q = projects();
        assert_eq!(q.set_date_range(day(2024, 3, 1), None), Reload::Skip);
        assert_eq!(q.set_date_range(day(2024, 3, 1), day(2024, 3, 31)), Reload::Fetch);
    }

    #[test]
    fn test_partial_range_with_other_filter_still_reloads() {
        let mut q = projects();
        let _ = q.set_priority_filter(Some(Priority::High));
        assert_eq!(q.set_date_range(None, day(2024, 3, 31)), Reload::Fetch);
        let params = q.build_request_params();
        assert_eq!(params.get("project_priority"), Some("high"));
        assert!(!params.contains_key("end_time"));
    }

    #[test]
    fn test_clearing_everything_reloads() {
        let mut q = projects();
        let _ = q.set_search_term("web");
        assert_eq!(q.set_search_term(""), Reload::Fetch);
        assert!(q.is_unfiltered());
    }

    #[test]
    fn test_unchanged_value_is_a_no_op() {
        let mut q = projects();
        let _ = q.set_status_filter(Some(Status::Completed));
        assert_eq!(q.set_status_filter(Some(Status::Completed)), Reload::Skip);
        assert_eq!(q.set_page(1), Reload::Skip);
    }

    #[test]
    fn test_page_change_always_reloads() {
        let mut q = projects();
        let _ = q.set_date_range(day(2024, 3, 1), None);
        assert_eq!(q.set_page(2), Reload::Fetch);
        assert_eq!(q.current_page(), 2);
        assert_eq!(q.set_page(0), Reload::Fetch);
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let mut q = projects();
        let _ = q.set_page(3);
        let _ = q.set_search_term("api");
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn test_params_only_include_set_fields() {
        let mut q = projects();
        let params = q.build_request_params();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["current_page", "page_size"]);

        let _ = q.set_search_term("  redesign ");
        let _ = q.set_status_filter(Some(Status::InProgress));
        let _ = q.set_date_range(day(2024, 3, 1), day(2024, 4, 15));
        let _ = q.set_page(2);
        let params = q.build_request_params();
        assert_eq!(params.get("project_name"), Some("redesign"));
        assert_eq!(params.get("project_status"), Some("inProgress"));
        assert_eq!(params.get("start_time"), Some("2024-03-01"));
        assert_eq!(params.get("end_time"), Some("2024-04-15"));
        assert_eq!(params.current_page(), Some(2));
        assert_eq!(params.page_size(), Some(6));
    }

    #[test]
    fn test_task_collection_uses_task_keys() {
        let mut q = QueryState::new(Collection::Tasks { project_id: 4 }, 6);
        let _ = q.set_search_term("login");
        let _ = q.set_priority_filter(Some(Priority::Low));
        let params = q.build_request_params();
        assert_eq!(params.get("task_name"), Some("login"));
        assert_eq!(params.get("task_priority"), Some("low"));
    }

    #[test]
    fn test_reset_clears_filters_once() {
        let mut q = projects();
        let _ = q.set_search_term("x");
        let _ = q.set_priority_filter(Some(Priority::Medium));
        let _ = q.set_status_filter(Some(Status::Todo));
        let _ = q.set_date_range(day(2024, 1, 1), day(2024, 2, 1));
        assert_eq!(q.reset(), Reload::Fetch);
        let params = q.build_request_params();
        for key in ["project_name", "project_priority", "project_status", "start_time", "end_time"] {
            assert!(!params.contains_key(key), "{} should be cleared", key);
        }
        assert_eq!(params.current_page(), Some(1));
        assert_eq!(q.reset(), Reload::Skip);
    }

    #[test]
    fn test_params_serialize_as_flat_map() {
        let mut q = projects();
        let _ = q.set_priority_filter(Some(Priority::High));
        let json = serde_json::to_value(q.build_request_params()).unwrap();
        assert_eq!(json["project_priority"], "high");
        assert_eq!(json["page_size"], "6");
    }
}
