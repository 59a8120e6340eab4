//! Collection Source
//!
//! The data-access contract the list views are written against, and an
//! in-memory implementation that filters and pages client-side the way the
//! backend does server-side.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::dates;
use crate::error::ApiError;
use crate::models::{DatedItem, ItemId, ItemPatch, NewItem, Page, Priority, Status};
use crate::query::{Collection, QueryState, RequestParams};

/// List and mutate one collection (all projects, or one project's tasks).
///
/// Futures are not `Send`: implementations run on the browser's event loop.
#[async_trait(?Send)]
pub trait CollectionSource {
    fn collection(&self) -> Collection;

    async fn fetch(&self, params: &RequestParams) -> Result<Page, ApiError>;

    async fn create(&self, item: &NewItem) -> Result<(), ApiError>;

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<(), ApiError>;

    async fn delete(&self, ids: &[ItemId]) -> Result<(), ApiError>;
}

/// Every item of the collection, fetched `page_size` at a time. Stops at the
/// page count the first response implies, or at the first empty page.
pub async fn fetch_all<S>(source: &S, page_size: u32) -> Result<Vec<DatedItem>, ApiError>
where
    S: CollectionSource + ?Sized,
{
    let mut query = QueryState::new(source.collection(), page_size);
    let first = source.fetch(&query.build_request_params()).await?;
    let pages = query.total_pages(first.total);
    let total = first.total;
    let mut items = first.items;

    for page in 2..=pages {
        if items.len() as u64 >= total {
            break;
        }
        let _ = query.set_page(page);
        let next = source.fetch(&query.build_request_params()).await?;
        if next.items.is_empty() {
            break;
        }
        items.extend(next.items);
    }
    if (items.len() as u64) < total {
        log::warn!(
            "[source] {:?}: got {} of {} items",
            source.collection(),
            items.len(),
            total
        );
    }
    Ok(items)
}

pub struct MemoryCollection {
    collection: Collection,
    items: RefCell<Vec<DatedItem>>,
    next_id: Cell<ItemId>,
}

impl MemoryCollection {
    pub fn new(collection: Collection, items: Vec<DatedItem>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        Self {
            collection,
            items: RefCell::new(items),
            next_id: Cell::new(next_id),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<DatedItem> {
        self.items.borrow().iter().find(|item| item.id == id).cloned()
    }

    fn matches(&self, item: &DatedItem, params: &RequestParams) -> bool {
        let keys = self.collection.keys();
        if let Some(term) = params.get(keys.name) {
            if !item.matches_search(term) {
                return false;
            }
        }
        if let Some(priority) = params.get(keys.priority).and_then(Priority::parse) {
            if item.priority != priority {
                return false;
            }
        }
        if let Some(status) = params.get(keys.status).and_then(Status::parse) {
            if item.status != status {
                return false;
            }
        }
        let start = params.get(keys.start).and_then(dates::parse_date);
        let end = params.get(keys.end).and_then(dates::parse_date);
        if let (Some(start), Some(end)) = (start, end) {
            if !item.overlaps(start, end) {
                return false;
            }
        }
        true
    }
}

#[async_trait(?Send)]
impl CollectionSource for MemoryCollection {
    fn collection(&self) -> Collection {
        self.collection
    }

    async fn fetch(&self, params: &RequestParams) -> Result<Page, ApiError> {
        let items = self.items.borrow();
        let matching: Vec<&DatedItem> = items.iter().filter(|item| self.matches(item, params)).collect();

        let page = params.current_page().unwrap_or(1).max(1) as usize;
        let page_size = params
            .page_size()
            .map(|size| size as usize)
            .unwrap_or(matching.len().max(1));
        let items = matching
            .iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .map(|item| (*item).clone())
            .collect();

        Ok(Page {
            total: matching.len() as u64,
            items,
        })
    }

    async fn create(&self, item: &NewItem) -> Result<(), ApiError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = item.clone().into_item(id, self.collection.project_id());
        self.items.borrow_mut().push(created);
        Ok(())
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<(), ApiError> {
        let mut items = self.items.borrow_mut();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ApiError::NotFound(id))?;
        item.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, ids: &[ItemId]) -> Result<(), ApiError> {
        let mut items = self.items.borrow_mut();
        if let Some(missing) = ids.iter().find(|id| !items.iter().any(|item| item.id == **id)) {
            return Err(ApiError::NotFound(*missing));
        }
        items.retain(|item| !ids.contains(&item.id));
        Ok(())
    }
}
