//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use taskline_core::{DatedItem, Locale, QuickEdit, QuickEditSnapshot};

use crate::storage;

/// Which screen the signed-in user is looking at
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Route {
    #[default]
    Projects,
    /// The project travels with the route; there is no fetch-by-id endpoint
    ProjectDetail(DatedItem),
    Dashboard,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub route: Route,
    pub locale: Locale,
}

impl AppState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_navigate(store: &AppStore, route: Route) {
    store.route().set(route);
}

/// Switch language and remember the choice
pub fn store_set_locale(store: &AppStore, locale: Locale) {
    if store.locale().get_untracked() == locale {
        return;
    }
    store.locale().set(locale);
    storage::save_locale(locale);
    log::info!("[APP] language set to {}", locale.code());
}

/// Apply a quick edit to the project open in the detail view
pub fn store_quick_edit_open_project(store: &AppStore, edit: QuickEdit) -> Option<QuickEditSnapshot> {
    match &mut *store.route().write() {
        Route::ProjectDetail(open) => Some(QuickEditSnapshot::apply(open, edit, 0)),
        _ => None,
    }
}

/// Undo a refused quick edit; only the edited field is restored
pub fn store_revert_open_project(store: &AppStore, snapshot: &QuickEditSnapshot) -> bool {
    match &mut *store.route().write() {
        Route::ProjectDetail(open) => snapshot.revert(open),
        _ => false,
    }
}
