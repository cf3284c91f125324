#![forbid(unsafe_code)]

//! Drag-and-drop coordination public facade.
//!
//! Re-exports the types most hosts need from the core, runtime, and widget
//! crates, plus a prelude.
//!
//! # Wiring
//!
//! ```rust
//! use dnd::prelude::*;
//!
//! let clock = ManualFrameClock::new();
//! let coordinator = DragCoordinator::new(clock.clone());
//! let map = AssignmentMap::from_pairs([(0, "00")]);
//!
//! coordinator.set_items([DraggableItem::new("00", map.setter(0))]);
//! let item = Draggable::new(&coordinator.drag_context(), "00");
//! let target = DropTarget::new(&coordinator.drop_context(), 5);
//!
//! item.on_pointer_down(&PointerEvent::down(PointerButton::Left, 10.0, 10.0));
//! clock.tick_now();
//! target.on_pointer_up(&PointerEvent::up(PointerButton::Left, 40.0, 40.0));
//!
//! assert_eq!(map.get(&0.into()), Some(DragKey::from(5)));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use dnd_core::event::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use dnd_core::geometry::{ElementBox, Point, Translate};
pub use dnd_core::instance::{InstanceGetter, InstanceSetter, instance_var};
pub use dnd_core::key::{DragKey, ItemId, TargetId};

// --- Runtime re-exports ----------------------------------------------------

pub use dnd_runtime::{
    AssignmentMap, Assignments, DragConfig, DragConfigError, DragContext, DragCoordinator,
    DragDispatch, DragIgnoredReason, DragOutcome, DragPhase, DragSnapshot, DragState,
    DraggableItem, DropContext, FrameHandle, FrameLoop, FrameScheduler, FrameTime, ItemRegistry,
    ManualFrameClock, Subscription,
};

// --- Widget re-exports -----------------------------------------------------

pub use dnd_widgets::{DragStyle, Draggable, DropTarget, ElementRef, LayoutBox, PointerEvents, ZIndex};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AssignmentMap, DragConfig, DragCoordinator, DragDispatch, DragKey, DragOutcome, Draggable,
        DraggableItem, DropTarget, ElementBox, ManualFrameClock, PointerButton, PointerEvent,
    };

    pub use crate::{core, runtime, widgets};
}

pub use dnd_core as core;
pub use dnd_runtime as runtime;
pub use dnd_widgets as widgets;
