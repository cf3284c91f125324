#![forbid(unsafe_code)]

//! Item and target bindings for drag-and-drop.
//!
//! [`Draggable`] and [`DropTarget`] are the per-element halves of drag
//! coordination. Each is created from the matching coordinator context and
//! translates raw pointer input into coordinator operations, and coordinator
//! state into a style or an item to render.

pub mod draggable;
pub mod drop_target;
pub mod element;
pub mod style;

pub use draggable::Draggable;
pub use drop_target::DropTarget;
pub use element::{ElementRef, LayoutBox};
pub use style::{DragStyle, PointerEvents, ZIndex};
