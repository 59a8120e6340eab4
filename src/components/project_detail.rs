//! Project Detail View
//!
//! Header with quick status/priority edits, the rendered description, tags,
//! dates and the project's task list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskline_core::{CollectionSource, QuickEdit};

use crate::components::quick_edit_menu::{QuickEditField, QuickEditMenu};
use crate::components::tag_chips::TagChips;
use crate::components::task_list::TaskList;
use crate::context::use_app_context;
use crate::i18n::use_t;
use crate::markdown::render_description;
use crate::store::{
    store_navigate, store_quick_edit_open_project, store_revert_open_project, use_app_store,
    AppStateStoreFields, Route,
};

#[component]
pub fn ProjectDetail() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let t = use_t();
    let (edit_error, set_edit_error) = signal::<Option<String>>(None);

    let project = Memo::new(move |_| {
        store.route().with(|route| match route {
            Route::ProjectDetail(project) => Some(project.clone()),
            _ => None,
        })
    });
    let project_id = Memo::new(move |_| project.with(|p| p.as_ref().map(|p| p.id)));

    let priority = Signal::derive(move || {
        QuickEdit::Priority(project.with(|p| p.as_ref().map(|p| p.priority).unwrap_or_default()))
    });
    let status = Signal::derive(move || {
        QuickEdit::Status(project.with(|p| p.as_ref().map(|p| p.status).unwrap_or_default()))
    });

    // Optimistic, like the list cards: show the change, put it back if refused
    let on_quick_edit = Callback::new(move |edit: QuickEdit| {
        let Some(snapshot) = store_quick_edit_open_project(&store, edit) else {
            return;
        };
        set_edit_error.set(None);
        spawn_local(async move {
            if let Err(err) = ctx.projects_api().update(snapshot.id(), &edit.to_patch()).await {
                let reverted = store_revert_open_project(&store, &snapshot);
                log::warn!(
                    "[detail] quick edit on project #{} refused (reverted: {}): {}",
                    snapshot.id(),
                    reverted,
                    err
                );
                set_edit_error.set(Some(err.user_message()));
            }
        });
    });

    let header = move || {
        project.get().map(|current| {
            let locale = store.locale().get();
            view! {
                <div class="detail-header">
                    <h1>{current.name.clone()}</h1>
                    <div class="item-card-badges">
                        <QuickEditMenu field=QuickEditField::Priority current=priority on_select=on_quick_edit />
                        <QuickEditMenu field=QuickEditField::Status current=status on_select=on_quick_edit />
                    </div>
                </div>
                <div class="detail-meta">
                    <span class="item-card-dates">{locale.format_range(current.start_date(), current.end_date())}</span>
                    <TagChips tags=current.tags.clone() />
                </div>
                <div class="description" inner_html=render_description(&current.description)></div>
            }
        })
    };

    view! {
        <section class="project-detail">
            <button class="back-btn" on:click=move |_| store_navigate(&store, Route::Projects)>
                "← " {move || t("common.backToProjects")}
            </button>

            {move || edit_error.get().map(|msg| view! {
                <div class="error-banner" role="alert">
                    <span>{msg}</span>
                    <button class="cancel-btn" on:click=move |_| set_edit_error.set(None)>"✗"</button>
                </div>
            })}

            {move || match project_id.get() {
                Some(id) => view! {
                    {header}
                    <TaskList project_id=id />
                }
                .into_any(),
                None => view! { <div class="empty-state"><h3>{t("project.notFound")}</h3></div> }.into_any(),
            }}
        </section>
    }
}
