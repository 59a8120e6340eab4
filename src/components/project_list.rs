//! Project List View
//!
//! Paged project cards with search, filters and a create/edit modal.

use std::rc::Rc;

use leptos::prelude::*;
use taskline_core::DatedItem;

use crate::components::item_card::ItemCard;
use crate::components::item_form::ItemForm;
use crate::components::layout_control::{GridLayout, LayoutControl};
use crate::components::list_status::{ErrorBanner, ListBody, LoadingSpinner, UnavailableState};
use crate::components::pagination::PaginationBar;
use crate::components::search_filter::SearchFilter;
use crate::context::use_app_context;
use crate::i18n::use_t;
use crate::list_driver::ListDriver;
use crate::store::{store_navigate, use_app_store, Route};

/// Open state of the create/edit modal
#[derive(Clone, Debug, PartialEq)]
pub enum FormMode {
    Create,
    Edit(DatedItem),
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let t = use_t();

    let config = ctx.config();
    let driver = ListDriver::new(Rc::new(ctx.projects_api()), config.page_size, config.search_debounce_ms);
    let layout = RwSignal::new(GridLayout::default());
    let form = RwSignal::new(None::<FormMode>);

    driver.load();
    let body = Memo::new(move |_| ListBody::of(&driver));

    let open_project = Callback::new(move |project: DatedItem| {
        log::debug!("[projects] open #{}", project.id);
        store_navigate(&store, Route::ProjectDetail(project));
    });

    view! {
        <section class="project-list">
            <div class="view-header">
                <h1>{move || t("common.projects")}</h1>
                <div class="view-actions">
                    <LayoutControl layout=layout />
                    <button class="primary-btn" on:click=move |_| form.set(Some(FormMode::Create))>
                        {move || t("project.newProject")}
                    </button>
                </div>
            </div>

            <SearchFilter driver=driver />
            <ErrorBanner driver=driver load_error_key="project.loadError" delete_error_key="project.deleteError" />

            {move || match body.get() {
                ListBody::Loading => view! { <LoadingSpinner /> }.into_any(),
                ListBody::Unavailable => view! {
                    <UnavailableState driver=driver load_error_key="project.loadError" />
                }
                .into_any(),
                ListBody::Empty => view! {
                    <div class="empty-state">
                        <h3>{t("project.noProjects")}</h3>
                        <p>{t("project.createFirst")}</p>
                    </div>
                }
                .into_any(),
                ListBody::Cards => view! {
                    <div class=move || layout.get().grid_class() class:refreshing=move || driver.is_loading()>
                        <For
                            each=move || driver.item_ids()
                            key=|id| *id
                            children=move |id| view! {
                                <ItemCard
                                    driver=driver
                                    id=id
                                    on_edit=move |item: DatedItem| form.set(Some(FormMode::Edit(item)))
                                    on_open=open_project
                                />
                            }
                        />
                    </div>
                }
                .into_any(),
            }}

            <PaginationBar driver=driver />

            {move || form.get().map(|mode| {
                let (editing, title_key) = match mode {
                    FormMode::Create => (None, "project.newProject"),
                    FormMode::Edit(item) => (Some(item), "project.editProject"),
                };
                view! {
                    <ItemForm
                        driver=driver
                        editing=editing
                        title_key=title_key
                        on_close=move |_| form.set(None)
                    />
                }
            })}
        </section>
    }
}
