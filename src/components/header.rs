//! Header Component
//!
//! App title, navigation, language switch and the signed-in user.

use leptos::prelude::*;

use crate::components::language_switch::LanguageSwitch;
use crate::context::use_app_context;
use crate::i18n::use_t;
use crate::store::{store_navigate, use_app_store, AppStateStoreFields, Route};

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let t = use_t();

    let on_projects = move || store.route().with(|r| matches!(r, Route::Projects | Route::ProjectDetail(_)));
    let on_dashboard = move || store.route().with(|r| *r == Route::Dashboard);

    let username = move || ctx.session.with(|s| s.username().map(str::to_string));

    view! {
        <header class="app-header">
            <div class="app-title">{move || t("app.title")}</div>
            <nav class="app-nav">
                <button
                    class=move || if on_projects() { "nav-btn active" } else { "nav-btn" }
                    on:click=move |_| store_navigate(&store, Route::Projects)
                >
                    {move || t("common.projects")}
                </button>
                <button
                    class=move || if on_dashboard() { "nav-btn active" } else { "nav-btn" }
                    on:click=move |_| store_navigate(&store, Route::Dashboard)
                >
                    {move || t("common.dashboard")}
                </button>
            </nav>
            <div class="app-user">
                <LanguageSwitch />
                {move || username().map(|name| view! { <span class="username">{name}</span> })}
                <button class="logout-btn" on:click=move |_| {
                    ctx.sign_out();
                    store_navigate(&store, Route::Projects);
                }>
                    {move || t("auth.logout")}
                </button>
            </div>
        </header>
    }
}
