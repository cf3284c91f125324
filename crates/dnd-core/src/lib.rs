#![forbid(unsafe_code)]

//! Core: pointer events, geometry, identity keys, and instance cells.
//!
//! # Role in the workspace
//! `dnd-core` is the input and data layer. It owns the normalized pointer
//! event types the coordinator consumes, the box metrics draggable elements
//! report, the opaque [`key::DragKey`] used for item and target identity, and
//! the [`instance::instance_var`] cell that holds values across render cycles
//! without triggering one.
//!
//! # How it fits in the system
//! `dnd-runtime` builds the drag/drop coordinator on top of these types and
//! `dnd-widgets` turns them into item and target bindings. Nothing in this
//! crate schedules work or holds shared state beyond the instance cell.

pub mod event;
pub mod geometry;
pub mod instance;
pub mod key;

pub use event::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{ElementBox, Point, Translate};
pub use instance::{InstanceGetter, InstanceSetter, instance_var};
pub use key::{DragKey, ItemId, TargetId};
