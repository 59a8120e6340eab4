//! Taskline Frontend App
//!
//! Root component: restores the session, provides context and switches
//! between the auth screens and the signed-in views.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskline_core::Session;

use crate::commands::github_login;
use crate::components::{
    GanttDashboard, Header, LoginForm, ProjectDetail, ProjectList, RegisterForm,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::i18n::use_t;
use crate::storage;
use crate::store::{AppState, AppStateStoreFields, AppStore, Route};

/// Pull the `code` GitHub appended to the redirect, and drop it from the URL
fn take_oauth_code() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let code = params.get("code").filter(|code| !code.is_empty())?;
    if let (Ok(history), Ok(path)) = (window.history(), window.location().pathname()) {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path.as_str()));
    }
    Some(code)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Projects,
    ProjectDetail,
    Dashboard,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthScreen {
    Login,
    Register,
}

#[component]
fn AuthPage() -> impl IntoView {
    let t = use_t();
    let screen = RwSignal::new(AuthScreen::Login);

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{move || t("app.title")}</h1>
                <p class="auth-slogan">{move || t("auth.slogan")}</p>
                {move || match screen.get() {
                    AuthScreen::Login => view! {
                        <LoginForm on_register=move |_| screen.set(AuthScreen::Register) />
                    }
                    .into_any(),
                    AuthScreen::Register => view! {
                        <RegisterForm on_login=move |_| screen.set(AuthScreen::Login) />
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session = Session::bootstrap(storage::load_token());
    log::info!(
        "[APP] starting against {}, signed in: {}",
        config.api_base_url,
        session.is_authenticated()
    );

    let ctx = AppContext::new(session, config);
    provide_context(ctx);

    let store = AppStore::new(AppState::new(storage::load_locale()));
    provide_context(store);

    if let Some(code) = take_oauth_code() {
        if !ctx.session.with_untracked(|s| s.is_authenticated()) {
            spawn_local(async move {
                match github_login(&ctx.api(), &code).await {
                    Ok(token) => ctx.sign_in(token),
                    Err(err) => log::warn!("[APP] GitHub sign-in failed: {}", err),
                }
            });
        }
    }

    // Keep <html lang> in step with the chosen language
    Effect::new(move |_| {
        let code = store.locale().get().code();
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("lang", code);
        }
    });

    let authenticated = Memo::new(move |_| ctx.is_authenticated());
    // Re-render on screen changes only, not on edits to the open project
    let screen = Memo::new(move |_| {
        store.route().with(|route| match route {
            Route::Projects => Screen::Projects,
            Route::ProjectDetail(_) => Screen::ProjectDetail,
            Route::Dashboard => Screen::Dashboard,
        })
    });

    view! {
        <Show when=move || authenticated.get() fallback=|| view! { <AuthPage /> }>
            <div class="app-layout">
                <Header />
                <main class="main-content">
                    {move || match screen.get() {
                        Screen::Projects => view! { <ProjectList /> }.into_any(),
                        Screen::ProjectDetail => view! { <ProjectDetail /> }.into_any(),
                        Screen::Dashboard => view! { <GanttDashboard /> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}
