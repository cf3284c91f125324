#![forbid(unsafe_code)]

//! Draggable-item binding.
//!
//! A [`Draggable`] is bound to one assignment key. While the coordinator
//! reports that key as active, the item is lifted and translated so that its
//! center tracks the pointer:
//!
//! ```text
//! tx = px - left - width / 2
//! ty = py - top  - height / 2
//! ```
//!
//! where `(px, py)` are the published pointer coordinates and
//! `(left, top, width, height)` the element's offset box, read fresh on
//! every call. Without an attached element or published coordinates the
//! translation is zero.

use dnd_core::event::PointerEvent;
use dnd_core::geometry::Translate;
use dnd_core::key::ItemId;
use dnd_runtime::context::DragContext;
use dnd_runtime::dispatch::{DragDispatch, DragIgnoredReason, DragPhase};
use dnd_runtime::reactive::Subscription;

use crate::element::ElementRef;
use crate::style::DragStyle;

/// Binding for an item that can be picked up.
#[derive(Debug, Clone)]
pub struct Draggable {
    context: DragContext,
    assigned: ItemId,
    element: ElementRef,
}

impl Draggable {
    /// Bind to the item currently assigned to `assigned`.
    #[must_use]
    pub fn new(context: &DragContext, assigned: impl Into<ItemId>) -> Self {
        Self {
            context: context.clone(),
            assigned: assigned.into(),
            element: ElementRef::new(),
        }
    }

    /// Key this binding was created for.
    #[must_use]
    pub fn assigned(&self) -> &ItemId {
        &self.assigned
    }

    /// Reference the host attaches the rendered element to.
    #[must_use]
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Whether this item is the one being dragged.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.context.is_active(&self.assigned)
    }

    /// Current translation.
    #[must_use]
    pub fn translate(&self) -> Translate {
        let snapshot = self.context.snapshot();
        if !snapshot.is_active(&self.assigned) {
            return Translate::ZERO;
        }
        match (snapshot.coords, self.element.metrics()) {
            (Some(pointer), Some(metrics)) => metrics.centering_offset(pointer),
            _ => Translate::ZERO,
        }
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> DragStyle {
        let config = self.context.config();
        if self.is_active() {
            DragStyle::lifted(&config, self.translate())
        } else {
            DragStyle::resting(&config)
        }
    }

    /// Re-render hook: called whenever the drag channel changes.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.context.subscribe(move |_| callback())
    }

    /// Pointer-down on the item. Starts a drag for the activation button
    /// only.
    pub fn on_pointer_down(&self, event: &PointerEvent) -> DragDispatch {
        let allowed = self.context.config().activation_button;
        if event.button() != Some(allowed) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                item = %self.assigned,
                button = ?event.button(),
                "pointer-down ignored: not the activation button"
            );
            return DragDispatch::filtered(DragPhase::PointerDown, DragIgnoredReason::ButtonNotAllowed);
        }
        self.context.start_drag(event, self.assigned.clone())
    }
}
