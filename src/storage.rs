//! localStorage access
//!
//! The only place the app touches browser storage. Missing storage (private
//! mode, sandboxed iframes) degrades to "nothing stored".

use taskline_core::Locale;

const TOKEN_KEY: &str = "token";
const LANGUAGE_KEY: &str = "language";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn write(key: &str, value: &str) {
    let Some(storage) = local_storage() else {
        log::warn!("[storage] localStorage unavailable, {} not saved", key);
        return;
    };
    if storage.set_item(key, value).is_err() {
        log::warn!("[storage] failed to save {}", key);
    }
}

pub fn load_token() -> Option<String> {
    read(TOKEN_KEY)
}

pub fn save_token(token: &str) {
    write(TOKEN_KEY, token);
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Stored language, else the browser's, else English
pub fn load_locale() -> Locale {
    read(LANGUAGE_KEY)
        .as_deref()
        .and_then(Locale::from_code)
        .or_else(|| {
            web_sys::window()?
                .navigator()
                .language()
                .as_deref()
                .and_then(Locale::from_code)
        })
        .unwrap_or_default()
}

pub fn save_locale(locale: Locale) {
    write(LANGUAGE_KEY, locale.code());
}
