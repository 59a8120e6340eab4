//! Layout Control Component
//!
//! Grid shape switcher for the card lists.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridLayout {
    /// One column of six
    Single,
    /// Two columns, three rows
    #[default]
    TwoColumns,
    /// Three columns, two rows
    ThreeColumns,
}

impl GridLayout {
    pub const ALL: [GridLayout; 3] = [GridLayout::Single, GridLayout::TwoColumns, GridLayout::ThreeColumns];

    pub fn label(self) -> &'static str {
        match self {
            GridLayout::Single => "1×6",
            GridLayout::TwoColumns => "2×3",
            GridLayout::ThreeColumns => "3×2",
        }
    }

    pub fn grid_class(self) -> &'static str {
        match self {
            GridLayout::Single => "card-grid cols-1",
            GridLayout::TwoColumns => "card-grid cols-2",
            GridLayout::ThreeColumns => "card-grid cols-3",
        }
    }
}

#[component]
pub fn LayoutControl(layout: RwSignal<GridLayout>) -> impl IntoView {
    view! {
        <div class="layout-control">
            {GridLayout::ALL.into_iter().map(|option| view! {
                <button
                    class=move || if layout.get() == option { "layout-btn active" } else { "layout-btn" }
                    on:click=move |_| layout.set(option)
                >
                    {option.label()}
                </button>
            }).collect_view()}
        </div>
    }
}
