//! Task List View
//!
//! Tasks of one project, as cards or as a Gantt chart of the current page.

use std::rc::Rc;

use leptos::prelude::*;
use taskline_core::{DatedItem, ItemId};

use crate::components::gantt_chart::GanttChart;
use crate::components::item_card::ItemCard;
use crate::components::item_form::ItemForm;
use crate::components::layout_control::{GridLayout, LayoutControl};
use crate::components::list_status::{ErrorBanner, ListBody, LoadingSpinner, UnavailableState};
use crate::components::pagination::PaginationBar;
use crate::components::project_list::FormMode;
use crate::components::search_filter::SearchFilter;
use crate::context::use_app_context;
use crate::i18n::use_t;
use crate::list_driver::ListDriver;

#[derive(Clone, Copy, PartialEq, Eq)]
enum TaskView {
    Cards,
    Gantt,
}

#[component]
pub fn TaskList(project_id: ItemId) -> impl IntoView {
    let ctx = use_app_context();
    let t = use_t();

    let config = ctx.config();
    let driver = ListDriver::new(
        Rc::new(ctx.tasks_api(project_id)),
        config.page_size,
        config.search_debounce_ms,
    );
    let view_mode = RwSignal::new(TaskView::Cards);
    let layout = RwSignal::new(GridLayout::default());
    let form = RwSignal::new(None::<FormMode>);

    driver.load();
    let body = Memo::new(move |_| ListBody::of(&driver));

    let view_button = move |mode: TaskView, key: &'static str| {
        view! {
            <button
                class=move || if view_mode.get() == mode { "type-btn active" } else { "type-btn" }
                on:click=move |_| view_mode.set(mode)
            >
                {move || t(key)}
            </button>
        }
    };

    let cards = move || {
        view! {
            <div class=move || layout.get().grid_class() class:refreshing=move || driver.is_loading()>
                <For
                    each=move || driver.item_ids()
                    key=|id| *id
                    children=move |id| view! {
                        <ItemCard
                            driver=driver
                            id=id
                            on_edit=move |item: DatedItem| form.set(Some(FormMode::Edit(item)))
                        />
                    }
                />
            </div>
        }
    };

    view! {
        <section class="task-list">
            <div class="view-header">
                <h2>{move || t("common.tasks")}</h2>
                <div class="view-actions">
                    <div class="type-selector">
                        {view_button(TaskView::Cards, "common.listView")}
                        {view_button(TaskView::Gantt, "common.ganttView")}
                    </div>
                    <Show when=move || view_mode.get() == TaskView::Cards>
                        <LayoutControl layout=layout />
                    </Show>
                    <button class="primary-btn" on:click=move |_| form.set(Some(FormMode::Create))>
                        {move || t("task.newTask")}
                    </button>
                </div>
            </div>

            <SearchFilter driver=driver />
            <ErrorBanner driver=driver load_error_key="task.loadError" delete_error_key="task.deleteError" />

            {move || match (body.get(), view_mode.get()) {
                (ListBody::Loading, _) => view! { <LoadingSpinner /> }.into_any(),
                (ListBody::Unavailable, _) => view! {
                    <UnavailableState driver=driver load_error_key="task.loadError" />
                }
                .into_any(),
                (ListBody::Empty, _) => view! {
                    <div class="empty-state">
                        <h3>{t("task.noTasks")}</h3>
                        <p>{t("task.createFirst")}</p>
                    </div>
                }
                .into_any(),
                (ListBody::Cards, TaskView::Cards) => cards().into_any(),
                (ListBody::Cards, TaskView::Gantt) => view! {
                    <GanttChart items=Signal::derive(move || driver.items()) label_key="common.tasks" />
                }
                .into_any(),
            }}

            <PaginationBar driver=driver />

            {move || form.get().map(|mode| {
                let (editing, title_key) = match mode {
                    FormMode::Create => (None, "task.newTask"),
                    FormMode::Edit(item) => (Some(item), "task.editTask"),
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
