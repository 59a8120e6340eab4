//! Gantt Hover State
//!
//! Which bar is under the pointer and where its tooltip goes. Cleared as soon
//! as the pointer leaves the bar.

use crate::models::{DatedItem, ItemId};

/// Lift of the anchor above the bar's top edge, in px
pub const ANCHOR_LIFT: f64 = 5.0;
/// Distance from the anchor up to the tooltip's top edge, in px
pub const TOOLTIP_RISE: f64 = 100.0;

/// Viewport-relative bounding box of a bar, as reported by the DOM
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Page scroll at the moment of hovering
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Document-relative point the tooltip hangs from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub x: f64,
    pub y: f64,
}

impl TooltipAnchor {
    pub fn from_bar(rect: BarRect, scroll: ScrollOffset) -> Self {
        Self {
            x: rect.left + scroll.x,
            y: rect.top + scroll.y - ANCHOR_LIFT,
        }
    }

    /// Top-left corner of the tooltip box, in px
    pub fn tooltip_origin(&self) -> (f64, f64) {
        (self.x, self.y - TOOLTIP_RISE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    hovered: Option<ItemId>,
    anchor: Option<TooltipAnchor>,
}

impl HoverState {
    pub fn enter(&mut self, id: ItemId, rect: BarRect, scroll: ScrollOffset) {
        self.hovered = Some(id);
        self.anchor = Some(TooltipAnchor::from_bar(rect, scroll));
    }

    pub fn leave(&mut self) {
        self.hovered = None;
        self.anchor = None;
    }

    pub fn hovered(&self) -> Option<ItemId> {
        self.hovered
    }

    pub fn anchor(&self) -> Option<TooltipAnchor> {
        self.anchor
    }

    pub fn is_hovered(&self, id: ItemId) -> bool {
        self.hovered == Some(id)
    }

    /// The hovered item, looked up in the currently rendered list
    pub fn hovered_item<'a>(&self, items: &'a [DatedItem]) -> Option<&'a DatedItem> {
        let id = self.hovered?;
        items.iter().find(|item| item.id == id)
    }

    /// Drop the hover if its item disappeared from the rendered list.
    /// Returns true when the state changed.
    pub fn retain_visible(&mut self, items: &[DatedItem]) -> bool {
        if self.hovered.is_some() && self.hovered_item(items).is_none() {
            self.leave();
            return true;
        }
        false
    }
}
