//! Gantt Dashboard
//!
//! The first few projects on one timeline and all of their tasks on another.

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskline_core::{fetch_all, ApiError, Collection, CollectionSource, DatedItem, QueryState};

use crate::components::gantt_chart::GanttChart;
use crate::components::list_status::LoadingSpinner;
use crate::context::{use_app_context, AppContext};
use crate::i18n::use_t;

/// Page size used while collecting each project's tasks
const TASK_PAGE_SIZE: u32 = 100;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Timeline {
    Projects,
    Tasks,
}

#[derive(Clone, Debug, PartialEq, Default)]
struct DashboardData {
    projects: Vec<DatedItem>,
    tasks: Vec<DatedItem>,
}

async fn fetch_dashboard(ctx: AppContext, project_count: u32) -> Result<DashboardData, ApiError> {
    let params = QueryState::new(Collection::Projects, project_count).build_request_params();
    let projects = ctx.projects_api().fetch(&params).await?.items;

    let task_loads = projects.iter().map(|project| {
        let api = ctx.tasks_api(project.id);
        async move { fetch_all(&api, TASK_PAGE_SIZE).await }
    });
    let mut tasks = Vec::new();
    for project_tasks in join_all(task_loads).await {
        tasks.extend(project_tasks?);
    }
    Ok(DashboardData { projects, tasks })
}

#[component]
pub fn GanttDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let t = use_t();

    let timeline = RwSignal::new(Timeline::Projects);
    let data = RwSignal::new(None::<DashboardData>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let generation = StoredValue::new(0u64);

    let load = move || {
        let current = generation.get_value() + 1;
        generation.set_value(current);
        set_loading.set(true);
        set_error.set(None);
        let project_count = ctx.config().dashboard_projects;
        spawn_local(async move {
            let result = fetch_dashboard(ctx, project_count).await;
            if generation.try_get_value() != Some(current) {
                log::debug!("[dashboard] dropped stale load #{}", current);
                return;
            }
            match result {
                Ok(loaded) => {
                    log::debug!(
                        "[dashboard] {} projects, {} tasks",
                        loaded.projects.len(),
                        loaded.tasks.len()
                    );
                    data.set(Some(loaded));
                }
                Err(err) => {
                    log::warn!("[dashboard] load failed: {}", err);
                    set_error.set(Some(err.user_message()));
                }
            }
            set_loading.set(false);
        });
    };

    load();

    let timeline_button = move |value: Timeline, key: &'static str| {
        view! {
            <button
                class=move || if timeline.get() == value { "type-btn active" } else { "type-btn" }
                on:click=move |_| timeline.set(value)
            >
                {move || t(key)}
            </button>
        }
    };

    let items = Signal::derive(move || {
        data.with(|d| match (d, timeline.get()) {
            (Some(d), Timeline::Projects) => d.projects.clone(),
            (Some(d), Timeline::Tasks) => d.tasks.clone(),
            (None, _) => Vec::new(),
        })
    });

    view! {
        <section class="gantt-dashboard">
            <div class="view-header">
                <h1>{move || t("dashboard.ganttDashboard")}</h1>
                <div class="type-selector">
                    {timeline_button(Timeline::Projects, "dashboard.projectsTimeline")}
                    {timeline_button(Timeline::Tasks, "dashboard.tasksTimeline")}
                </div>
            </div>

            {move || error.get().map(|msg| view! {
                <div class="error-banner" role="alert">
                    <div>
                        <strong>{t("common.error")}</strong>
                        <span class="error-detail">{msg}</span>
                    </div>
                    <button class="retry-btn" on:click=move |_| load()>{t("common.retry")}</button>
                </div>
            })}

            <Show
                when=move || data.with(|d| d.is_some())
                fallback=move || view! {
                    <Show when=move || loading.get()>
                        <LoadingSpinner />
                    </Show>
                }
            >
                {move || {
                    let label_key = match timeline.get() {
                        Timeline::Projects => "common.projects",
                        Timeline::Tasks => "common.tasks",
                    };
                    view! { <GanttChart items=items label_key=label_key /> }
                }}
            </Show>
        </section>
    }
}
