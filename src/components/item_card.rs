//! Item Card Component
//!
//! Card for one project or task in the list views.

use leptos::prelude::*;
use taskline_core::{DatedItem, ItemId, QuickEdit};

use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::components::quick_edit_menu::{QuickEditField, QuickEditMenu};
use crate::components::tag_chips::TagChips;
use crate::i18n::use_t;
use crate::list_driver::ListDriver;
use crate::markdown::plain_excerpt;
use crate::store::{use_app_store, AppStateStoreFields};

/// Reads the item from the driver so quick edits and rollbacks show at once.
/// `on_open` makes the card clickable.
#[component]
pub fn ItemCard(
    driver: ListDriver,
    id: ItemId,
    #[prop(into)] on_edit: Callback<DatedItem>,
    #[prop(optional, into)] on_open: Option<Callback<DatedItem>>,
) -> impl IntoView {
    let t = use_t();
    let store = use_app_store();

    let item = Memo::new(move |_| driver.item(id));

    let priority = Signal::derive(move || {
        QuickEdit::Priority(item.with(|i| i.as_ref().map(|i| i.priority).unwrap_or_default()))
    });
    let status = Signal::derive(move || {
        QuickEdit::Status(item.with(|i| i.as_ref().map(|i| i.status).unwrap_or_default()))
    });

    let on_quick_edit = Callback::new(move |edit: QuickEdit| driver.quick_edit(id, edit));

    move || {
        item.get().map(|current| {
            let locale = store.locale().get();
            let dates = locale.format_range(current.start_date(), current.end_date());
            let excerpt = plain_excerpt(&current.description, 120);
            let open_target = current.clone();
            let edit_target = current.clone();

            view! {
                <div
                    class="item-card"
                    class:clickable=on_open.is_some()
                    on:click=move |_| {
                        if let Some(open) = on_open {
                            open.run(open_target.clone());
                        }
                    }
                >
                    <div class="item-card-header">
                        <h3 class="item-card-title">{current.name.clone()}</h3>
                        <div class="item-card-badges">
                            <QuickEditMenu field=QuickEditField::Priority current=priority on_select=on_quick_edit />
                            <QuickEditMenu field=QuickEditField::Status current=status on_select=on_quick_edit />
                        </div>
                    </div>
                    <p class="item-card-description">{excerpt}</p>
                    <TagChips tags=current.tags.clone() />
                    <div class="item-card-footer">
                        <span class="item-card-dates">{dates}</span>
                        <div class="item-card-actions">
                            <button
                                class="edit-btn"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    on_edit.run(edit_target.clone());
                                }
                            >
                                {t("common.edit")}
                            </button>
                            <DeleteConfirmButton
                                button_class="delete-btn"
                                on_confirm=Callback::new(move |_| driver.delete(id))
                            />
                        </div>
                    </div>
                </div>
            }
        })
    }
}
