//! End-to-end scenarios across the layout engine, list controller and sources.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::executor::block_on;

use crate::controller::{ListController, LoadOutcome, QuickEdit};
use crate::error::ApiError;
use crate::locale::Locale;
use crate::models::{item_on_days, DatedItem, ItemId, ItemPatch, NewItem, Page, Priority, Status};
use crate::query::{Collection, RequestParams};
use crate::source::{CollectionSource, MemoryCollection};
use crate::timeline::{compute_item_position, compute_window, generate_day_ticks};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Rejects every mutation; used to exercise quick-edit rollback
struct ReadOnlySource(MemoryCollection);

#[async_trait(?Send)]
impl CollectionSource for ReadOnlySource {
    fn collection(&self) -> Collection {
        self.0.collection()
    }

    async fn fetch(&self, params: &RequestParams) -> Result<Page, ApiError> {
        self.0.fetch(params).await
    }

    async fn create(&self, _item: &NewItem) -> Result<(), ApiError> {
        Err(read_only())
    }

    async fn update(&self, _id: ItemId, _patch: &ItemPatch) -> Result<(), ApiError> {
        Err(read_only())
    }

    async fn delete(&self, _ids: &[ItemId]) -> Result<(), ApiError> {
        Err(read_only())
    }
}

fn read_only() -> ApiError {
    ApiError::Rejected {
        code: "403-0000".into(),
        message: "read only".into(),
    }
}

fn projects(count: u64) -> Vec<DatedItem> {
    (1..=count)
        .map(|i| item_on_days(i, &format!("P{}", i), day(3, 1), day(3, 10)))
        .collect()
}

async fn load(list: &mut ListController, source: &dyn CollectionSource) -> LoadOutcome {
    let ticket = list.begin_load();
    let result = source.fetch(ticket.params()).await;
    list.finish_load(&ticket, result)
}

#[test]
fn test_two_item_window_scenario() {
    let items = vec![
        item_on_days(1, "Design", day(3, 1), day(3, 15)),
        item_on_days(2, "Build", day(3, 10), day(4, 15)),
    ];
    let window = compute_window(&items).unwrap();
    assert_eq!(window.start.date_naive(), day(3, 1));
    assert_eq!(window.end.date_naive(), day(4, 15));
    assert_eq!(window.total_days, 46);

    let first = compute_item_position(&items[0], &window);
    assert!(approx(first.left_fraction, 0.0));
    assert!(approx(first.width_fraction, 14.0 / 46.0));

    let second = compute_item_position(&items[1], &window);
    assert!(approx(second.left_fraction, 9.0 / 46.0));
    assert!(approx(second.width_fraction, 36.0 / 46.0));

    let ticks: Vec<_> = generate_day_ticks(&window, Locale::En).collect();
    assert_eq!(ticks.len(), 46);
    assert_eq!(ticks.iter().filter(|t| t.is_month_start).count(), 2);
}

#[test]
fn test_exactly_one_page_hides_pagination() {
    let source = MemoryCollection::new(Collection::Projects, projects(6));
    let mut list = ListController::new(Collection::Projects, 6);
    assert_eq!(block_on(load(&mut list, &source)), LoadOutcome::Applied);
    assert_eq!(list.total(), 6);
    assert_eq!(list.total_pages(), 1);
    assert!(!list.shows_pagination());
}

#[test]
fn test_reset_then_load_sends_no_filters() {
    let source = MemoryCollection::new(Collection::Projects, projects(13));
    let mut list = ListController::new(Collection::Projects, 6);
    let _ = list.update_query(|q| q.set_search_term("P1"));
    let _ = list.update_query(|q| q.set_priority_filter(Some(Priority::High)));
    let _ = list.update_query(|q| q.set_date_range(Some(day(3, 1)), Some(day(3, 2))));

    let ticket = list.update_query(|q| q.reset()).unwrap();
    for key in ["project_name", "project_priority", "project_status", "start_time", "end_time"] {
        assert!(!ticket.params().contains_key(key));
    }
    let result = block_on(source.fetch(ticket.params()));
    assert_eq!(list.finish_load(&ticket, result), LoadOutcome::Applied);
    assert_eq!(list.total(), 13);
    assert_eq!(list.total_pages(), 3);
}

#[test]
fn test_out_of_order_responses_keep_newest() {
    let source = MemoryCollection::new(Collection::Projects, projects(13));
    let mut list = ListController::new(Collection::Projects, 6);

    let slow = list.begin_load();
    let fast = list.update_query(|q| q.set_search_term("P12")).unwrap();

    let fast_result = block_on(source.fetch(fast.params()));
    let slow_result = block_on(source.fetch(slow.params()));
    assert_eq!(list.finish_load(&fast, fast_result), LoadOutcome::Applied);
    assert_eq!(list.finish_load(&slow, slow_result), LoadOutcome::Stale);

    assert_eq!(list.total(), 1);
    assert_eq!(list.items()[0].name, "P12");
}

#[test]
fn test_rejected_quick_edit_rolls_back() {
    let source = ReadOnlySource(MemoryCollection::new(Collection::Projects, projects(3)));
    let mut list = ListController::new(Collection::Projects, 6);
    block_on(load(&mut list, &source));

    let edit = QuickEdit::Status(Status::Completed);
    let snapshot = list.apply_quick_edit(2, edit).unwrap();
    assert_eq!(list.items()[1].status, Status::Completed);

    if let Err(err) = block_on(source.update(2, &edit.to_patch())) {
        list.rollback(snapshot, err);
    }
    assert_eq!(list.items()[1].status, Status::Todo);
    assert_eq!(list.error().map(|e| e.user_message()), Some("read only".to_string()));
}

#[test]
fn test_accepted_quick_edit_matches_server_without_reload() {
    let source = MemoryCollection::new(Collection::Projects, projects(3));
    let mut list = ListController::new(Collection::Projects, 6);
    block_on(load(&mut list, &source));
    let generation = list.generation();

    let edit = QuickEdit::Priority(Priority::High);
    let _snapshot = list.apply_quick_edit(1, edit).unwrap();
    block_on(source.update(1, &edit.to_patch())).unwrap();

    assert_eq!(list.generation(), generation);
    assert_eq!(source.get(1).as_ref(), list.items().first());
}

#[test]
fn test_task_collection_round_trip() {
    let source = MemoryCollection::new(Collection::Tasks { project_id: 9 }, Vec::new());
    let mut list = ListController::new(source.collection(), 6);
    let draft = crate::draft::ItemDraft {
        name: "Design review".into(),
        start: "2024-03-04".into(),
        end: "2024-03-06".into(),
        ..Default::default()
    };
    block_on(source.create(&draft.validate().unwrap())).unwrap();
    block_on(load(&mut list, &source));
    assert_eq!(list.items()[0].project_id, Some(9));

    let _ = list.update_query(|q| q.set_status_filter(Some(Status::Completed)));
    block_on(load(&mut list, &source));
    assert!(list.items().is_empty());
    assert!(compute_window(list.items()).is_none());
}
