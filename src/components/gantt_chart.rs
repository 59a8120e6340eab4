//! Gantt Chart Component
//!
//! One row per item: name column on the left, proportional bar on the right,
//! a day scale on top and a red line for today. Hovering a bar shows a
//! tooltip above it.

use leptos::prelude::*;
use taskline_core::dates;
use taskline_core::timeline::today_offset;
use taskline_core::{
    compute_item_position, compute_window, generate_day_ticks, BarRect, DatedItem, DayTick, HoverState,
    ScrollOffset, Status, TimelineWindow,
};
use wasm_bindgen::JsCast;

use crate::i18n::use_t;
use crate::markdown::plain_excerpt;
use crate::store::{use_app_store, AppStateStoreFields};

fn percent(fraction: f64) -> String {
    format!("{}%", fraction * 100.0)
}

fn bar_class(status: Status) -> &'static str {
    match status {
        Status::Completed => "gantt-bar completed",
        Status::InProgress => "gantt-bar in-progress",
        Status::Todo => "gantt-bar todo",
    }
}

fn bar_rect(ev: &web_sys::MouseEvent) -> Option<BarRect> {
    let element = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = element.get_bounding_client_rect();
    Some(BarRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    })
}

fn scroll_offset() -> ScrollOffset {
    web_sys::window()
        .map(|w| ScrollOffset {
            x: w.scroll_x().unwrap_or(0.0),
            y: w.scroll_y().unwrap_or(0.0),
        })
        .unwrap_or_default()
}

#[component]
fn GanttRow(item: DatedItem, window: TimelineWindow, hover: RwSignal<HoverState>) -> impl IntoView {
    let position = compute_item_position(&item, &window);
    let id = item.id;

    view! {
        <div class="gantt-row" class:hovered=move || hover.with(|h| h.is_hovered(id))>
            <div class="gantt-label-col" title=item.name.clone()>{item.name.clone()}</div>
            <div class="gantt-track">
                <div
                    class=bar_class(item.status)
                    style:left=format!("{}%", position.left_percent())
                    style:width=format!("{}%", position.width_percent())
                    on:mouseenter=move |ev| {
                        if let Some(rect) = bar_rect(&ev) {
                            hover.update(|h| h.enter(id, rect, scroll_offset()));
                        }
                    }
                    on:mouseleave=move |_| hover.update(|h| h.leave())
                >
                    <span class="gantt-bar-label">{item.name}</span>
                </div>
            </div>
        </div>
    }
}

/// Timeline for a list of projects or tasks
///
/// `label_key` is the i18n key of the name column heading.
#[component]
pub fn GanttChart(#[prop(into)] items: Signal<Vec<DatedItem>>, label_key: &'static str) -> impl IntoView {
    let t = use_t();
    let store = use_app_store();
    let hover = RwSignal::new(HoverState::default());

    Effect::new(move |_| {
        items.with(|list| hover.maybe_update(|h| h.retain_visible(list)));
    });

    let chart = move || {
        let list = items.get();
        let Some(window) = compute_window(&list) else {
            return view! {
                <div class="gantt-empty">
                    <h3>{t("dashboard.noTasks")}</h3>
                    <p>{t("dashboard.createFirst")}</p>
                </div>
            }
            .into_any();
        };
        let ticks: Vec<DayTick> = generate_day_ticks(&window, store.locale().get()).collect();
        let today = dates::from_epoch_millis(js_sys::Date::now()).and_then(|now| today_offset(&now, &window));

        view! {
            <div class="gantt">
                <div class="gantt-inner">
                    <div class="gantt-header">
                        <div class="gantt-label-col gantt-heading">{t(label_key)}</div>
                        <div class="gantt-scale">
                            {ticks.iter().map(|tick| view! {
                                <div
                                    class=if tick.is_month_start { "gantt-tick month-start" } else { "gantt-tick" }
                                    style:left=percent(tick.offset_fraction(&window))
                                >
                                    {tick.label.map(|name| view! { <div class="gantt-month">{name}</div> })}
                                    {tick.day_label.map(|day| view! { <div class="gantt-day">{day}</div> })}
                                </div>
                            }).collect_view()}
                        </div>
                    </div>

                    <div class="gantt-body">
                        <div class="gantt-grid">
                            {ticks.iter().map(|tick| view! {
                                <div class="gantt-grid-line" style:left=percent(tick.offset_fraction(&window))></div>
                            }).collect_view()}
                            {today.map(|offset| view! {
                                <div class="gantt-today" style:left=percent(offset)>
                                    <span class="gantt-today-label">{t("gantt.today")}</span>
                                </div>
                            })}
                        </div>
                        {list.into_iter().map(|item| view! {
                            <GanttRow item=item window=window hover=hover />
                        }).collect_view()}
                    </div>
                </div>
            </div>
        }
        .into_any()
    };

    let tooltip = move || {
        let state = hover.get();
        let anchor = state.anchor()?;
        let item = items.with(|list| state.hovered_item(list).cloned())?;
        let (x, y) = anchor.tooltip_origin();
        let locale = store.locale().get();
        Some(view! {
            <div class="gantt-tooltip" style:left=format!("{}px", x) style:top=format!("{}px", y)>
                <h4>{item.name.clone()}</h4>
                <p>{plain_excerpt(&item.description, 160)}</p>
                <div class="gantt-tooltip-dates">
                    {locale.format_range(item.start_date(), item.end_date())}
                </div>
            </div>
        })
    };

    view! {
        <div class="gantt-wrapper">
            {chart}
            {tooltip}
        </div>
    }
}
