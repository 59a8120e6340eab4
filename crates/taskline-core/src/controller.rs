//! List Controller
//!
//! Owns a view's `QueryState` together with the last successfully loaded page.
//! Every fetch is stamped with a generation; a response is applied only if no
//! newer fetch was issued after it. Failed fetches keep the previous page.
//!
//! Quick edits of status and priority are applied locally first. The caller
//! keeps the returned snapshot and hands it back if the server rejects the
//! change.

use crate::error::ApiError;
use crate::models::{DatedItem, ItemId, ItemPatch, Page, Priority, Status};
use crate::pagination;
use crate::query::{Collection, QueryState, Reload, RequestParams};

/// A fetch that has been started; pass it back to `finish_load`
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    generation: u64,
    params: RequestParams,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer fetch was issued; the response was dropped
    Stale,
}

/// In-place change offered by the quick edit menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickEdit {
    Status(Status),
    Priority(Priority),
}

impl QuickEdit {
    pub fn to_patch(self) -> ItemPatch {
        match self {
            QuickEdit::Status(status) => ItemPatch::status(status),
            QuickEdit::Priority(priority) => ItemPatch::priority(priority),
        }
    }

    /// The item's current value of the field this edit touches
    pub fn read_from(self, item: &DatedItem) -> QuickEdit {
        match self {
            QuickEdit::Status(_) => QuickEdit::Status(item.status),
            QuickEdit::Priority(_) => QuickEdit::Priority(item.priority),
        }
    }
}

/// The one field a quick edit replaced, and what it held before
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickEditSnapshot {
    id: ItemId,
    generation: u64,
    previous: QuickEdit,
    applied: QuickEdit,
}

impl QuickEditSnapshot {
    /// Apply `edit` to `item`. `generation` identifies the data the edit was
    /// made against.
    pub fn apply(item: &mut DatedItem, edit: QuickEdit, generation: u64) -> Self {
        let previous = edit.read_from(item);
        item.apply_patch(&edit.to_patch());
        Self {
            id: item.id,
            generation,
            previous,
            applied: edit,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Put the old value back, but only if the field still holds the edited
    /// one. Other fields are never touched.
    pub fn revert(&self, item: &mut DatedItem) -> bool {
        if item.id != self.id || self.applied.read_from(item) != self.applied {
            return false;
        }
        item.apply_patch(&self.previous.to_patch());
        true
    }
}

/// What the view was doing when its error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    /// Fetching the page; retrying re-runs the same query
    Load,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct ListController {
    query: QueryState,
    items: Vec<DatedItem>,
    total: u64,
    error: Option<(FailedAction, ApiError)>,
    generation: u64,
    /// Generation of the page currently in `items`
    applied_generation: u64,
    in_flight: Option<u64>,
    loaded: bool,
}

impl ListController {
    pub fn new(collection: Collection, page_size: u32) -> Self {
        Self {
            query: QueryState::new(collection, page_size),
            items: Vec::new(),
            total: 0,
            error: None,
            generation: 0,
            applied_generation: 0,
            in_flight: None,
            loaded: false,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn collection(&self) -> Collection {
        self.query.collection()
    }

    pub fn items(&self) -> &[DatedItem] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref().map(|(_, error)| error)
    }

    pub fn failed_action(&self) -> Option<FailedAction> {
        self.error.as_ref().map(|(action, _)| *action)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Surface a failed mutation without touching the loaded page
    pub fn report_error(&mut self, action: FailedAction, error: ApiError) {
        log::warn!("[list] {:?} failed: {}", action, error);
        self.error = Some((action, error));
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once any fetch has succeeded
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn total_pages(&self) -> u32 {
        self.query.total_pages(self.total)
    }

    pub fn shows_pagination(&self) -> bool {
        pagination::should_paginate(self.total_pages())
    }

    /// Mutate the query; returns a ticket when the change calls for a fetch
    pub fn update_query(&mut self, change: impl FnOnce(&mut QueryState) -> Reload) -> Option<LoadTicket> {
        match change(&mut self.query) {
            Reload::Fetch => Some(self.begin_load()),
            Reload::Skip => None,
        }
    }

    /// Start a fetch for the current query, superseding any fetch in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        log::debug!(
            "[list] load #{} for {:?} page {}",
            self.generation,
            self.query.collection(),
            self.query.current_page()
        );
        LoadTicket {
            generation: self.generation,
            params: self.query.build_request_params(),
        }
    }

    /// Re-issue the fetch for the unchanged query
    pub fn retry(&mut self) -> LoadTicket {
        self.begin_load()
    }

    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<Page, ApiError>) -> LoadOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "[list] dropping stale load #{} (current #{})",
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }
        self.in_flight = None;
        match result {
            Ok(page) => {
                self.total = page.total;
                self.items = page.items;
                self.error = None;
                self.applied_generation = ticket.generation;
                self.loaded = true;
                LoadOutcome::Applied
            }
            Err(err) => {
                log::warn!("[list] load #{} failed: {}", ticket.generation, err);
                self.error = Some((FailedAction::Load, err));
                LoadOutcome::Failed
            }
        }
    }

    /// Apply a quick edit locally. None when the item is not on the current page.
    pub fn apply_quick_edit(&mut self, id: ItemId, edit: QuickEdit) -> Option<QuickEditSnapshot> {
        let generation = self.applied_generation;
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        Some(QuickEditSnapshot::apply(item, edit, generation))
    }

    /// Undo a rejected quick edit and surface the server's reason. A page
    /// applied since the edit already shows the server's state and is kept.
    /// Returns true when the field was reverted.
    pub fn rollback(&mut self, snapshot: QuickEditSnapshot, error: ApiError) -> bool {
        let reverted = if snapshot.generation() != self.applied_generation {
            log::debug!(
                "[list] page #{} replaced the edited one, nothing to roll back",
                self.applied_generation
            );
            false
        } else {
            self.items
                .iter_mut()
                .find(|item| item.id == snapshot.id())
                .map(|item| snapshot.revert(item))
                .unwrap_or(false)
        };
        log::warn!("[list] quick edit on {} rejected: {}", snapshot.id(), error);
        self.error = Some((FailedAction::Update, error));
        reverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item_on_days;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn page(names: &[&str], total: u64) -> Page {
        Page {
            total,
            items: names
                .iter()
                .enumerate()
                .map(|(i, name)| item_on_days(i as u64 + 1, name, day(1), day(2)))
                .collect(),
        }
    }

    fn controller() -> ListController {
        ListController::new(Collection::Projects, 6)
    }

    #[test]
    fn test_only_latest_generation_is_applied() {
        let mut list = controller();
        let first = list.begin_load();
        let second = list.update_query(|q| q.set_search_term("b")).unwrap();
        assert!(second.generation() > first.generation());

        assert_eq!(list.finish_load(&second, Ok(page(&["b"], 1))), LoadOutcome::Applied);
        assert_eq!(list.finish_load(&first, Ok(page(&["a", "c"], 2))), LoadOutcome::Stale);
        assert_eq!(list.items()[0].name, "b");
        assert!(!list.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut list = controller();
        let first = list.begin_load();
        let _second = list.begin_load();
        assert_eq!(list.finish_load(&first, Ok(page(&["a"], 1))), LoadOutcome::Stale);
        assert!(list.is_loading());
    }

    #[test]
    fn test_failed_load_keeps_previous_page() {
        let mut list = controller();
        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["a", "b"], 2)));

        let ticket = list.retry();
        let outcome = list.finish_load(&ticket, Err(ApiError::Network("offline".into())));
        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(list.items().len(), 2);
        assert!(list.error().is_some());

        let ticket = list.retry();
        let _ = list.finish_load(&ticket, Ok(page(&["a"], 1)));
        assert!(list.error().is_none());
    }

    #[test]
    fn test_partial_range_issues_no_ticket() {
        let mut list = controller();
        assert!(list.update_query(|q| q.set_date_range(Some(day(1)), None)).is_none());
        let ticket = list.update_query(|q| q.set_date_range(Some(day(1)), Some(day(9))));
        assert_eq!(ticket.unwrap().params().get("start_time"), Some("2024-03-01"));
    }

    #[test]
    fn test_pagination_hidden_for_single_page() {
        let mut list = controller();
        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["a"; 6], 6)));
        assert_eq!(list.total_pages(), 1);
        assert!(!list.shows_pagination());

        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["a"; 6], 7)));
        assert!(list.shows_pagination());
    }

    #[test]
    fn test_quick_edit_and_rollback() {
        let mut list = controller();
        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["a", "b"], 2)));

        let snapshot = list.apply_quick_edit(2, QuickEdit::Status(Status::Completed)).unwrap();
        assert_eq!(list.items()[1].status, Status::Completed);

        assert!(list.rollback(snapshot, ApiError::Network("timeout".into())));
        assert_eq!(list.items()[1].status, Status::Todo);
        assert_eq!(list.failed_action(), Some(FailedAction::Update));
        assert!(list.apply_quick_edit(99, QuickEdit::Priority(Priority::High)).is_none());
    }

    #[test]
    fn test_rollback_after_reload_keeps_fresh_page() {
        let mut list = controller();
        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["old name"], 1)));
        let snapshot = list.apply_quick_edit(1, QuickEdit::Status(Status::Completed)).unwrap();

        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["new name"], 1)));

        assert!(!list.rollback(snapshot, ApiError::Network("timeout".into())));
        assert_eq!(list.items()[0].name, "new name");
        assert!(list.error().is_some());
    }

    #[test]
    fn test_rollback_reverts_only_the_edited_field() {
        let mut list = controller();
        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["a"], 1)));

        let status_edit = list.apply_quick_edit(1, QuickEdit::Status(Status::Completed)).unwrap();
        let _priority_edit = list.apply_quick_edit(1, QuickEdit::Priority(Priority::High)).unwrap();

        assert!(list.rollback(status_edit, ApiError::Network("timeout".into())));
        assert_eq!(list.items()[0].status, Status::Todo);
        assert_eq!(list.items()[0].priority, Priority::High);
    }

    #[test]
    fn test_revert_skips_field_changed_by_a_later_edit() {
        let mut item = item_on_days(1, "a", day(1), day(2));
        let first = QuickEditSnapshot::apply(&mut item, QuickEdit::Status(Status::InProgress), 0);
        let _second = QuickEditSnapshot::apply(&mut item, QuickEdit::Status(Status::Completed), 0);

        assert!(!first.revert(&mut item));
        assert_eq!(item.status, Status::Completed);
    }

    #[test]
    fn test_revert_leaves_other_fields_of_a_replaced_copy() {
        let mut item = item_on_days(1, "old name", day(1), day(2));
        let snapshot = QuickEditSnapshot::apply(&mut item, QuickEdit::Priority(Priority::High), 0);

        let mut fresh = item_on_days(1, "new name", day(1), day(2));
        fresh.priority = Priority::High;
        assert!(snapshot.revert(&mut fresh));
        assert_eq!(fresh.name, "new name");
        assert_eq!(fresh.priority, Priority::Medium);

        let mut other = item_on_days(2, "b", day(1), day(2));
        other.priority = Priority::High;
        assert!(!snapshot.revert(&mut other));
    }

    #[test]
    fn test_failed_delete_is_not_a_load_error() {
        let mut list = controller();
        let ticket = list.begin_load();
        let _ = list.finish_load(&ticket, Ok(page(&["a"], 1)));

        list.report_error(FailedAction::Delete, ApiError::Network("offline".into()));
        assert_eq!(list.failed_action(), Some(FailedAction::Delete));
        assert_eq!(list.items().len(), 1);

        let ticket = list.retry();
        let _ = list.finish_load(&ticket, Err(ApiError::Network("offline".into())));
        assert_eq!(list.failed_action(), Some(FailedAction::Load));
    }
}
