//! Register Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::register;
use crate::context::use_app_context;
use crate::i18n::use_t;

#[component]
pub fn RegisterForm(#[prop(into)] on_login: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let t = use_t();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let username = username.get_untracked();
        let password = password.get_untracked();
        if username.trim().is_empty() || password.is_empty() {
            return;
        }
        let email = email.get_untracked();
        let phone = phone.get_untracked();
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match register(&ctx.api(), username.trim(), &password, Some(email.as_str()), Some(phone.as_str())).await {
                Ok(token) => ctx.sign_in(token),
                Err(err) => {
                    log::warn!("[auth] registration failed: {}", err);
                    set_error.set(Some(format!("{}: {}", t("auth.registerFailed"), err.user_message())));
                }
            }
            set_submitting.set(false);
        });
    };

    let optional = move |key: &'static str| format!("{} ({})", t(key), t("auth.optional"));

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>{move || t("auth.register")}</h2>
            <label>
                <span>{move || t("auth.username")}</span>
                <input
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
            </label>
            <label>
                <span>{move || t("auth.password")}</span>
                <input
                    type="password"
                    autocomplete="new-password"
                    placeholder=move || t("auth.inputPassword")
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
            </label>
            <label>
                <span>{move || optional("auth.email")}</span>
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
            </label>
            <label>
                <span>{move || optional("auth.phone")}</span>
                <input
                    type="tel"
                    prop:value=move || phone.get()
                    on:input=move |ev| set_phone.set(event_target_value(&ev))
                />
            </label>

            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

            <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                {move || t("auth.register")}
            </button>

            <p class="auth-switch">
                {move || t("auth.haveAccount")} " "
                <button type="button" class="link-btn" on:click=move |_| on_login.run(())>
                    {move || t("auth.login")}
                </button>
            </p>
        </form>
    }
}
