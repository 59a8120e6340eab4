//! Language Switch Component

use leptos::prelude::*;
use taskline_core::Locale;

use crate::i18n::use_t;
use crate::store::{store_set_locale, use_app_store, AppStateStoreFields};

fn locale_key(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "user.english",
        Locale::Zh => "user.chinese",
    }
}

#[component]
pub fn LanguageSwitch() -> impl IntoView {
    let store = use_app_store();
    let t = use_t();

    view! {
        <label class="language-switch">
            <span class="sr-only">{move || t("user.language")}</span>
            <select
                prop:value=move || store.locale().get().code()
                on:change=move |ev| {
                    if let Some(locale) = Locale::from_code(&event_target_value(&ev)) {
                        store_set_locale(&store, locale);
                    }
                }
            >
                {Locale::ALL.into_iter().map(|locale| view! {
                    <option value=locale.code()>{move || t(locale_key(locale))}</option>
                }).collect_view()}
            </select>
        </label>
    }
}
