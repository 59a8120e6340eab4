//! Login Form Component
//!
//! Account/password sign-in, plus the GitHub button when OAuth is configured.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskline_core::ApiError;

use crate::commands::{github_authorize_url, login};
use crate::context::use_app_context;
use crate::i18n::use_t;

/// Credential problems get the friendly message; anything else shows as-is
fn login_error_key(err: &ApiError) -> Option<&'static str> {
    match err {
        ApiError::Rejected { .. } | ApiError::Http { status: 400 | 401 | 403, .. } => {
            Some("auth.invalidCredentials")
        }
        _ => None,
    }
}

#[component]
pub fn LoginForm(#[prop(into)] on_register: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let t = use_t();

    let (account, set_account) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let github_url = ctx.config().github.as_ref().map(github_authorize_url);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let account = account.get_untracked();
        let password = password.get_untracked();
        if account.trim().is_empty() || password.is_empty() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match login(&ctx.api(), account.trim(), &password).await {
                Ok(token) => ctx.sign_in(token),
                Err(err) => {
                    log::warn!("[auth] login failed: {}", err);
                    let message = login_error_key(&err)
                        .map(|key| t(key).to_string())
                        .unwrap_or_else(|| err.user_message());
                    set_error.set(Some(message));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>{move || t("auth.login")}</h2>
            <label>
                <span>{move || t("auth.account")}</span>
                <input
                    type="text"
                    autocomplete="username"
                    prop:value=move || account.get()
                    on:input=move |ev| set_account.set(event_target_value(&ev))
                />
            </label>
            <label>
                <span>{move || t("auth.password")}</span>
                <input
                    type="password"
                    autocomplete="current-password"
                    placeholder=move || t("auth.inputPassword")
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
            </label>

            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

            <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                {move || t("auth.login")}
            </button>

            {github_url.map(|url| view! {
                <a class="github-btn" href=url>{move || t("auth.loginWithGithub")}</a>
            })}

            <p class="auth-switch">
                {move || t("auth.noAccount")} " "
                <button type="button" class="link-btn" on:click=move |_| on_register.run(())>
                    {move || t("auth.register")}
                </button>
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_get_friendly_message() {
        let rejected = ApiError::Rejected {
            code: "101-0001".to_string(),
            message: "bad password".to_string(),
        };
        assert_eq!(login_error_key(&rejected), Some("auth.invalidCredentials"));
        let unauthorized = ApiError::Http {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(login_error_key(&unauthorized), Some("auth.invalidCredentials"));
    }

    #[test]
    fn test_other_errors_pass_through() {
        assert_eq!(login_error_key(&ApiError::Network("offline".to_string())), None);
        let server = ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(login_error_key(&server), None);
    }
}
