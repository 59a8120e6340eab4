//! Taskline Core
//!
//! Pure client logic shared by the project and task views:
//! - timeline: Gantt window, bar positions and day ticks
//! - query / controller: list filter state, reload rule and request generations
//! - source: the collection collaborator contract plus an in-memory implementation
//! - wire: REST envelope and project/task record adapters
//! - session: token bootstrap and JWT user decoding

pub mod controller;
pub mod dates;
pub mod draft;
pub mod error;
pub mod hover;
pub mod locale;
pub mod models;
pub mod pagination;
pub mod query;
pub mod session;
pub mod source;
pub mod timeline;
pub mod wire;

#[cfg(test)]
mod tests;

pub use controller::{
    FailedAction, ListController, LoadOutcome, LoadTicket, QuickEdit, QuickEditSnapshot,
};
pub use draft::{DraftError, ItemDraft};
pub use error::ApiError;
pub use hover::{BarRect, HoverState, ScrollOffset, TooltipAnchor};
pub use locale::Locale;
pub use models::{DatedItem, ItemId, ItemPatch, NewItem, Page, Priority, Status, Tag};
pub use pagination::{visible_pages, PageSlot};
pub use query::{derive_total_pages, Collection, QueryState, Reload, RequestParams};
pub use session::{Session, SessionError, User};
pub use source::{fetch_all, CollectionSource, MemoryCollection};
pub use timeline::{
    compute_item_position, compute_window, generate_day_ticks, is_within_window, DayTick,
    ItemPosition, TimelineWindow,
};
