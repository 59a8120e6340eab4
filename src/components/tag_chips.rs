//! Tag chips, tinted with each tag's own color.

use leptos::prelude::*;
use taskline_core::Tag;

#[component]
pub fn TagChips(tags: Vec<Tag>) -> impl IntoView {
    view! {
        <div class="tag-chips">
            {tags.into_iter().map(|tag| view! {
                <span
                    class="tag-chip"
                    style:color=tag.color.clone()
                    style:background-color=format!("{}20", tag.color)
                >
                    {tag.name}
                </span>
            }).collect_view()}
        </div>
    }
}
