//! Item Form Component
//!
//! Modal for creating or editing a project or task. Field values live in an
//! `ItemDraft`; validation errors show inline and keep the modal open.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskline_core::draft::DEFAULT_TAG_COLOR;
use taskline_core::{DatedItem, ItemDraft, Priority, Status};

use crate::i18n::{draft_error_key, priority_key, status_key, use_t};
use crate::list_driver::ListDriver;

/// Tag list editor: rename in place, remove, or add with a color
#[component]
fn DraftTagEditor(draft: RwSignal<ItemDraft>) -> impl IntoView {
    let t = use_t();
    let (new_name, set_new_name) = signal(String::new());
    let (new_color, set_new_color) = signal(DEFAULT_TAG_COLOR.to_string());

    let add_tag = move || {
        if draft.try_update(|d| d.add_tag(&new_name.get_untracked(), &new_color.get_untracked())).flatten().is_some() {
            set_new_name.set(String::new());
        }
    };

    view! {
        <div class="tag-editor">
            <For
                each=move || draft.with(|d| d.tags.clone())
                key=|tag| (tag.id, tag.name.clone(), tag.color.clone())
                children=move |tag| {
                    let id = tag.id;
                    view! {
                        <span class="tag-chip editable" style:border-color=tag.color.clone()>
                            <input
                                type="text"
                                class="tag-name-input"
                                prop:value=tag.name.clone()
                                on:change=move |ev| {
                                    let name = event_target_value(&ev);
                                    draft.update(|d| {
                                        d.rename_tag(id, &name);
                                    });
                                }
                            />
                            <button type="button" class="tag-remove" on:click=move |_| draft.update(|d| d.remove_tag(id))>
                                "×"
                            </button>
                        </span>
                    }
                }
            />
            <div class="tag-add-row">
                <input
                    type="text"
                    placeholder=move || t("project.tagName")
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add_tag();
                        }
                    }
                />
                <input
                    type="color"
                    prop:value=move || new_color.get()
                    on:input=move |ev| set_new_color.set(event_target_value(&ev))
                />
                <button type="button" class="tag-add-btn" on:click=move |_| add_tag()>
                    {move || t("project.addTag")}
                </button>
            </div>
        </div>
    }
}

/// `editing == None` creates a new item.
#[component]
pub fn ItemForm(
    driver: ListDriver,
    editing: Option<DatedItem>,
    /// i18n key for the modal heading
    title_key: &'static str,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let t = use_t();
    let editing_id = editing.as_ref().map(|item| item.id);
    let draft = RwSignal::new(editing.as_ref().map(ItemDraft::from_item).unwrap_or_default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let item = match draft.with_untracked(|d| d.validate()) {
            Ok(item) => item,
            Err(err) => {
                set_error.set(Some(t(draft_error_key(err)).to_string()));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match driver.save(editing_id, item).await {
                Ok(()) => on_close.run(()),
                Err(err) => {
                    log::warn!("[form] save failed: {}", err);
                    set_error.set(Some(err.user_message()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form class="modal item-form" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
                <h2>{move || t(title_key)}</h2>

                <label>
                    <span>{move || t("project.title")}</span>
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.name.clone())
                        on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                    />
                </label>

                <label>
                    <span>{move || t("project.description")}</span>
                    <textarea
                        rows="4"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </label>

                <div class="form-row">
                    <label>
                        <span>{move || t("project.priority")}</span>
                        <select
                            prop:value=move || draft.with(|d| d.priority.as_str())
                            on:change=move |ev| {
                                if let Some(priority) = Priority::parse(&event_target_value(&ev)) {
                                    draft.update(|d| d.priority = priority);
                                }
                            }
                        >
                            {Priority::ALL.into_iter().map(|priority| view! {
                                <option value=priority.as_str()>{move || t(priority_key(priority))}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <label>
                        <span>{move || t("project.status")}</span>
                        <select
                            prop:value=move || draft.with(|d| d.status.as_str())
                            on:change=move |ev| {
                                if let Some(status) = Status::parse(&event_target_value(&ev)) {
                                    draft.update(|d| d.status = status);
                                }
                            }
                        >
                            {Status::ALL.into_iter().map(|status| view! {
                                <option value=status.as_str()>{move || t(status_key(status))}</option>
                            }).collect_view()}
                        </select>
                    </label>
                </div>

                <div class="form-row">
                    <label>
                        <span>{move || t("project.startDate")}</span>
                        <input
                            type="date"
                            prop:value=move || draft.with(|d| d.start.clone())
                            on:input=move |ev| draft.update(|d| d.start = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        <span>{move || t("project.endDate")}</span>
                        <input
                            type="date"
                            prop:value=move || draft.with(|d| d.end.clone())
                            on:input=move |ev| draft.update(|d| d.end = event_target_value(&ev))
                        />
                    </label>
                </div>

                <div class="form-field">
                    <span>{move || t("project.tags")}</span>
                    <DraftTagEditor draft=draft />
                </div>

                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

                <div class="form-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>
                        {move || t("common.cancel")}
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {move || if editing_id.is_some() { t("common.save") } else { t("common.create") }}
                    </button>
                </div>
            </form>
        </div>
    }
}
