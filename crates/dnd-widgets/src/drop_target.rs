#![forbid(unsafe_code)]

//! Drop-target binding.
//!
//! A [`DropTarget`] is one slot in the host's layout, identified by its
//! `uid`. It renders whichever registered item is currently assigned to that
//! uid, and it accepts a drop only when it is enabled and empty.

use std::rc::Rc;

use dnd_core::event::PointerEvent;
use dnd_core::key::TargetId;
use dnd_runtime::context::DropContext;
use dnd_runtime::dispatch::{DragDispatch, DragIgnoredReason, DragPhase};
use dnd_runtime::reactive::Subscription;
use dnd_runtime::registry::DraggableItem;

use crate::element::ElementRef;

/// Binding for a slot items can be dropped on.
#[derive(Debug, Clone)]
pub struct DropTarget {
    context: DropContext,
    uid: TargetId,
    disabled: bool,
    element: ElementRef,
}

impl DropTarget {
    /// Bind to slot `uid`.
    #[must_use]
    pub fn new(context: &DropContext, uid: impl Into<TargetId>) -> Self {
        Self {
            context: context.clone(),
            uid: uid.into(),
            disabled: false,
            element: ElementRef::new(),
        }
    }

    /// Builder: mark the target disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn uid(&self) -> &TargetId {
        &self.uid
    }

    /// Reference the host attaches the rendered slot to.
    #[must_use]
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// The item to render in this slot, if any.
    #[must_use]
    pub fn item(&self) -> Option<Rc<DraggableItem>> {
        self.context.item_at(&self.uid)
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.context.is_occupied(&self.uid)
    }

    /// Whether a release over this target would resolve a drop.
    #[must_use]
    pub fn accepts_drop(&self) -> bool {
        !self.disabled && !self.is_occupied()
    }

    /// Re-render hook: called whenever the registered items change.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.context.subscribe(move |_| callback())
    }

    /// Pointer released over the target.
    pub fn on_pointer_up(&self, _event: &PointerEvent) -> DragDispatch {
        let reason = if self.disabled {
            Some(DragIgnoredReason::TargetDisabled)
        } else if self.is_occupied() {
            Some(DragIgnoredReason::TargetOccupied)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(uid = %self.uid, ?reason, "release over target ignored");
                DragDispatch::filtered(DragPhase::Drop, reason)
            }
            None => self.context.drop_on(self.uid.clone()),
        }
    }
}
