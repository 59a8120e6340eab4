//! Quick Edit Menu Component
//!
//! Status/priority pill that opens a small menu of the other values.

use leptos::prelude::*;
use taskline_core::{Priority, QuickEdit, Status};

use crate::i18n::{priority_key, status_key, use_t};

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "pill priority-high",
        Priority::Medium => "pill priority-medium",
        Priority::Low => "pill priority-low",
    }
}

fn status_class(status: Status) -> &'static str {
    match status {
        Status::Completed => "pill status-completed",
        Status::InProgress => "pill status-in-progress",
        Status::Todo => "pill status-todo",
    }
}

/// Which field the menu edits
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum QuickEditField {
    Status,
    Priority,
}

impl QuickEditField {
    fn options(self) -> Vec<QuickEdit> {
        match self {
            QuickEditField::Status => Status::ALL.into_iter().map(QuickEdit::Status).collect(),
            QuickEditField::Priority => Priority::ALL.into_iter().map(QuickEdit::Priority).collect(),
        }
    }
}

fn edit_class(edit: QuickEdit) -> &'static str {
    match edit {
        QuickEdit::Status(status) => status_class(status),
        QuickEdit::Priority(priority) => priority_class(priority),
    }
}

fn edit_key(edit: QuickEdit) -> &'static str {
    match edit {
        QuickEdit::Status(status) => status_key(status),
        QuickEdit::Priority(priority) => priority_key(priority),
    }
}

#[component]
pub fn QuickEditMenu(
    field: QuickEditField,
    #[prop(into)] current: Signal<QuickEdit>,
    #[prop(into)] on_select: Callback<QuickEdit>,
) -> impl IntoView {
    let t = use_t();
    let (open, set_open) = signal(false);

    view! {
        <div class="quick-edit">
            <button
                class=move || edit_class(current.get())
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_open.update(|o| *o = !*o);
                }
            >
                {move || t(edit_key(current.get()))}
                " ▾"
            </button>
            <Show when=move || open.get()>
                <div class="quick-edit-menu">
                    {field.options().into_iter().map(|option| view! {
                        <button
                            class=edit_class(option)
                            class:selected=move || current.get() == option
                            on:click=move |ev| {
                                ev.stop_propagation();
                                set_open.set(false);
                                if current.get_untracked() != option {
                                    on_select.run(option);
                                }
                            }
                        >
                            {move || t(edit_key(option))}
                        </button>
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}
