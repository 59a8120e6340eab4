//! Loading spinner and error banner shared by the list views.

use leptos::prelude::*;

use taskline_core::FailedAction;

use crate::i18n::use_t;
use crate::list_driver::ListDriver;

/// What the list area shows; the card grid survives reloads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    /// Every fetch so far failed; there is no page to show
    Unavailable,
    Empty,
    Cards,
}

impl ListBody {
    pub fn of(driver: &ListDriver) -> Self {
        Self::from_state(driver.has_loaded(), driver.is_loading(), driver.has_attempted(), driver.is_empty())
    }

    pub fn from_state(has_loaded: bool, is_loading: bool, has_attempted: bool, is_empty: bool) -> Self {
        if !has_loaded {
            if is_loading || !has_attempted {
                ListBody::Loading
            } else {
                ListBody::Unavailable
            }
        } else if is_empty {
            ListBody::Empty
        } else {
            ListBody::Cards
        }
    }
}

/// Error banner; stays visible above the last good page. Only a failed load
/// offers a retry, since retrying re-runs the fetch.
#[component]
pub fn ErrorBanner(
    driver: ListDriver,
    load_error_key: &'static str,
    delete_error_key: &'static str,
) -> impl IntoView {
    let t = use_t();

    view! {
        {move || driver.error().map(|err| {
            let action = driver.failed_action().unwrap_or(FailedAction::Load);
            let title = match action {
                FailedAction::Load => load_error_key,
                FailedAction::Update => "common.updateError",
                FailedAction::Delete => delete_error_key,
            };
            view! {
                <div class="error-banner" role="alert">
                    <div>
                        <strong>{t(title)}</strong>
                        <span class="error-detail">{err.user_message()}</span>
                    </div>
                    <div class="error-actions">
                        {(action == FailedAction::Load).then(|| view! {
                            <button class="retry-btn" on:click=move |_| driver.retry()>{t("common.retry")}</button>
                        })}
                        <button class="cancel-btn" on:click=move |_| driver.dismiss_error()>"✗"</button>
                    </div>
                </div>
            }
        })}
    }
}

/// Shown in place of the list when no page could be loaded
#[component]
pub fn UnavailableState(driver: ListDriver, load_error_key: &'static str) -> impl IntoView {
    let t = use_t();
    view! {
        <div class="empty-state">
            <h3>{move || t(load_error_key)}</h3>
            <button class="retry-btn" on:click=move |_| driver.retry()>{move || t("common.retry")}</button>
        </div>
    }
}

/// Spinner shown in place of the list until the first page arrives
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    let t = use_t();
    view! {
        <div class="loading">
            <div class="spinner"></div>
            <span>{move || t("common.loading")}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_first_load_is_not_shown_as_loading() {
        assert_eq!(ListBody::from_state(false, false, true, true), ListBody::Unavailable);
    }

    #[test]
    fn test_spinner_until_first_page() {
        assert_eq!(ListBody::from_state(false, false, false, true), ListBody::Loading);
        assert_eq!(ListBody::from_state(false, true, true, true), ListBody::Loading);
    }

    #[test]
    fn test_loaded_page_survives_reload_and_failure() {
        assert_eq!(ListBody::from_state(true, true, true, false), ListBody::Cards);
        assert_eq!(ListBody::from_state(true, false, true, false), ListBody::Cards);
        assert_eq!(ListBody::from_state(true, false, true, true), ListBody::Empty);
    }
}
