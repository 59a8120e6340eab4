//! Search & Filter Bar
//!
//! Search box (debounced), priority and status selects, a start/end date
//! pair and a reset button. A date filter only reaches the request once
//! both ends are chosen.

use leptos::prelude::*;
use taskline_core::{dates, Priority, Status};

use crate::i18n::{priority_key, status_key, use_t};
use crate::list_driver::ListDriver;

#[component]
pub fn SearchFilter(driver: ListDriver) -> impl IntoView {
    let t = use_t();

    let on_priority = move |ev: web_sys::Event| {
        let value = Priority::parse(&event_target_value(&ev));
        driver.update_query(|q| q.set_priority_filter(value));
    };

    let on_status = move |ev: web_sys::Event| {
        let value = Status::parse(&event_target_value(&ev));
        driver.update_query(|q| q.set_status_filter(value));
    };

    let on_start = move |ev: web_sys::Event| {
        let start = dates::parse_date(&event_target_value(&ev));
        driver.update_query(|q| {
            let end = q.date_range().end;
            q.set_date_range(start, end)
        });
    };

    let on_end = move |ev: web_sys::Event| {
        let end = dates::parse_date(&event_target_value(&ev));
        driver.update_query(|q| {
            let start = q.date_range().start;
            q.set_date_range(start, end)
        });
    };

    let date_value = |date: Option<chrono::NaiveDate>| date.map(dates::format_day).unwrap_or_default();

    view! {
        <div class="search-filter">
            <input
                type="search"
                class="search-input"
                placeholder=move || t("common.search")
                prop:value=move || driver.search_input.get()
                on:input=move |ev| driver.set_search_input(event_target_value(&ev))
            />

            <select
                class="filter-select"
                prop:value=move || driver.query().priority_filter().map(|p| p.as_str()).unwrap_or("")
                on:change=on_priority
            >
                <option value="">{move || t("common.allPriorities")}</option>
                {Priority::ALL.into_iter().map(|priority| view! {
                    <option value=priority.as_str()>{move || t(priority_key(priority))}</option>
                }).collect_view()}
            </select>

            <select
                class="filter-select"
                prop:value=move || driver.query().status_filter().map(|s| s.as_str()).unwrap_or("")
                on:change=on_status
            >
                <option value="">{move || t("common.allStatuses")}</option>
                {Status::ALL.into_iter().map(|status| view! {
                    <option value=status.as_str()>{move || t(status_key(status))}</option>
                }).collect_view()}
            </select>

            <label class="date-filter">
                <span>{move || t("common.startDate")}</span>
                <input
                    type="date"
                    prop:value=move || date_value(driver.query().date_range().start)
                    on:change=on_start
                />
            </label>
            <label class="date-filter">
                <span>{move || t("common.endDate")}</span>
                <input
                    type="date"
                    prop:value=move || date_value(driver.query().date_range().end)
                    on:change=on_end
                />
            </label>

            <button class="reset-btn" on:click=move |_| driver.reset()>
                {move || t("common.reset")}
            </button>
        </div>
    }
}
