//! Pagination Bar Component
//!
//! Previous/next, compressed page numbers and a "go to page" box. Hidden
//! when everything fits on one page.

use leptos::prelude::*;
use taskline_core::pagination::{can_go_next, can_go_previous, parse_page_input};
use taskline_core::{visible_pages, PageSlot};

use crate::i18n::use_t;
use crate::list_driver::ListDriver;

#[component]
pub fn PaginationBar(driver: ListDriver) -> impl IntoView {
    let t = use_t();
    let (page_input, set_page_input) = signal(String::new());

    let go_to = move |page: u32| driver.update_query(|q| q.set_page(page));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(page) = parse_page_input(&page_input.get(), driver.total_pages()) {
            go_to(page);
            set_page_input.set(String::new());
        }
    };

    view! {
        <Show when=move || driver.shows_pagination()>
            <nav class="pagination">
                <button
                    class="page-btn"
                    disabled=move || !can_go_previous(driver.current_page())
                    on:click=move |_| go_to(driver.current_page().saturating_sub(1))
                >
                    {move || t("common.previous")}
                </button>

                {move || {
                    let current = driver.current_page();
                    visible_pages(current, driver.total_pages())
                        .into_iter()
                        .map(|slot| match slot {
                            PageSlot::Page(page) => view! {
                                <button
                                    class=if page == current { "page-btn active" } else { "page-btn" }
                                    on:click=move |_| go_to(page)
                                >
                                    {page}
                                </button>
                            }
                            .into_any(),
                            PageSlot::Ellipsis => view! { <span class="page-ellipsis">"..."</span> }.into_any(),
                        })
                        .collect_view()
                }}

                <button
                    class="page-btn"
                    disabled=move || !can_go_next(driver.current_page(), driver.total_pages())
                    on:click=move |_| go_to(driver.current_page() + 1)
                >
                    {move || t("common.next")}
                </button>

                <form class="page-jump" on:submit=on_submit>
                    <input
                        type="number"
                        min="1"
                        max=move || driver.total_pages().to_string()
                        placeholder=move || t("common.page")
                        prop:value=move || page_input.get()
                        on:input=move |ev| set_page_input.set(event_target_value(&ev))
                    />
                    <button type="submit" class="page-btn">{move || t("common.go")}</button>
                </form>
            </nav>
        </Show>
    }
}
