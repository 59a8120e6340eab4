//! List Driver
//!
//! Reactive shell around `ListController`: runs its fetch tickets on the
//! event loop, debounces the search box and turns quick edits into
//! optimistic updates with rollback.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskline_core::{
    ApiError, CollectionSource, DatedItem, FailedAction, ItemId, ListController, LoadOutcome, LoadTicket, NewItem,
    QueryState, QuickEdit, Reload,
};

#[derive(Clone, Copy)]
pub struct ListDriver {
    controller: RwSignal<ListController>,
    source: StoredValue<Rc<dyn CollectionSource>, LocalStorage>,
    /// What the search box shows; lags into the query by the debounce window
    pub search_input: RwSignal<String>,
    search_seq: StoredValue<u64>,
    debounce_ms: u32,
}

impl ListDriver {
    pub fn new(source: Rc<dyn CollectionSource>, page_size: u32, debounce_ms: u32) -> Self {
        Self {
            controller: RwSignal::new(ListController::new(source.collection(), page_size)),
            source: StoredValue::new_local(source),
            search_input: RwSignal::new(String::new()),
            search_seq: StoredValue::new(0),
            debounce_ms,
        }
    }

    fn run(self, ticket: LoadTicket) {
        crate::logging::debug_value(&format!("[list] load #{}", ticket.generation()), ticket.params());
        spawn_local(async move {
            let source = self.source.get_value();
            let result = source.fetch(ticket.params()).await;
            let count = result.as_ref().map(|page| page.items.len()).unwrap_or(0);
            match self.controller.try_update(|c| c.finish_load(&ticket, result)) {
                Some(LoadOutcome::Applied) => {
                    log::debug!("[list] load #{} applied, {} items", ticket.generation(), count)
                }
                Some(_) => {}
                None => log::debug!("[list] view gone before load #{} finished", ticket.generation()),
            }
        });
    }

    pub fn load(self) {
        if let Some(ticket) = self.controller.try_update(|c| c.begin_load()) {
            self.run(ticket);
        }
    }

    pub fn retry(self) {
        if let Some(ticket) = self.controller.try_update(|c| c.retry()) {
            self.run(ticket);
        }
    }

    pub fn update_query(self, change: impl FnOnce(&mut QueryState) -> Reload) {
        if let Some(Some(ticket)) = self.controller.try_update(|c| c.update_query(change)) {
            self.run(ticket);
        }
    }

    /// Record a keystroke; the query follows once typing pauses
    pub fn set_search_input(self, value: String) {
        self.search_input.set(value.clone());
        if self.debounce_ms == 0 {
            self.update_query(|q| q.set_search_term(value));
            return;
        }
        let seq = self.search_seq.get_value() + 1;
        self.search_seq.set_value(seq);
        let delay = self.debounce_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if self.search_seq.try_get_value() == Some(seq) {
                self.update_query(|q| q.set_search_term(value));
            }
        });
    }

    pub fn reset(self) {
        self.search_seq.update_value(|seq| *seq += 1);
        self.search_input.set(String::new());
        self.update_query(|q| q.reset());
    }

    /// Apply locally, then confirm with the server; undone if the server refuses
    pub fn quick_edit(self, id: ItemId, edit: QuickEdit) {
        let Some(Some(snapshot)) = self.controller.try_update(|c| c.apply_quick_edit(id, edit)) else {
            return;
        };
        spawn_local(async move {
            let source = self.source.get_value();
            if let Err(err) = source.update(id, &edit.to_patch()).await {
                self.controller.try_update(|c| c.rollback(snapshot, err));
            }
        });
    }

    /// Create (`id == None`) or fully update an item, then reload the page
    pub async fn save(self, id: Option<ItemId>, item: NewItem) -> Result<(), ApiError> {
        let source = self.source.get_value();
        match id {
            Some(id) => source.update(id, &item.into_patch()).await?,
            None => source.create(&item).await?,
        }
        self.load();
        Ok(())
    }

    pub fn delete(self, id: ItemId) {
        spawn_local(async move {
            let source = self.source.get_value();
            match source.delete(&[id]).await {
                Ok(()) => self.load(),
                Err(err) => {
                    self.controller.try_update(|c| c.report_error(FailedAction::Delete, err));
                }
            }
        });
    }

    pub fn dismiss_error(self) {
        self.controller.update(|c| c.clear_error());
    }

    // ========================
    // Reactive reads
    // ========================

    pub fn items(&self) -> Vec<DatedItem> {
        self.controller.with(|c| c.items().to_vec())
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.controller.with(|c| c.items().iter().map(|item| item.id).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.controller.with(|c| c.items().is_empty())
    }

    pub fn item(&self, id: ItemId) -> Option<DatedItem> {
        self.controller.with(|c| c.items().iter().find(|item| item.id == id).cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.controller.with(|c| c.is_loading())
    }

    pub fn has_loaded(&self) -> bool {
        self.controller.with(|c| c.has_loaded())
    }

    /// True once any fetch has been started
    pub fn has_attempted(&self) -> bool {
        self.controller.with(|c| c.generation() > 0)
    }

    pub fn error(&self) -> Option<ApiError> {
        self.controller.with(|c| c.error().cloned())
    }

    pub fn failed_action(&self) -> Option<FailedAction> {
        self.controller.with(|c| c.failed_action())
    }

    pub fn query(&self) -> QueryState {
        self.controller.with(|c| c.query().clone())
    }

    pub fn current_page(&self) -> u32 {
        self.controller.with(|c| c.query().current_page())
    }

    pub fn total_pages(&self) -> u32 {
        self.controller.with(|c| c.total_pages())
    }

    pub fn shows_pagination(&self) -> bool {
        self.controller.with(|c| c.shows_pagination())
    }
}
