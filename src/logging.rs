//! Browser Console Logger
//!
//! `log` backend writing `[target] message` lines to the devtools console,
//! routed to the console method matching the record level. Structured values
//! go through `serde-wasm-bindgen` so they stay inspectable.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let line = line.as_str().into();
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Messages that already carry a `[tag]` prefix keep it; others get the module path
fn format_line(level: Level, target: &str, message: &str) -> String {
    if message.starts_with('[') {
        format!("{:<5} {}", level, message)
    } else {
        let short = target.rsplit("::").next().unwrap_or(target);
        format!("{:<5} [{}] {}", level, short, message)
    }
}

/// Debug-log a serializable value as a live console object, so devtools can
/// expand it instead of showing a flattened string
pub fn debug_value<T: serde::Serialize + ?Sized>(label: &str, value: &T) {
    if !log::log_enabled!(Level::Debug) {
        return;
    }
    match serde_wasm_bindgen::to_value(value) {
        Ok(js) => web_sys::console::debug_2(&format!("DEBUG {}", label).into(), &js),
        Err(err) => log::debug!("{} (unserializable: {})", label, err),
    }
}

/// Install the console logger; a second call only adjusts the level
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("[logging] logger already installed");
    }
    log::set_max_level(level);
}
