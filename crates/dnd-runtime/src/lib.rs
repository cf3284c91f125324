#![forbid(unsafe_code)]

//! Drag-and-drop runtime.
//!
//! The stateful half of drag coordination: the [`DragCoordinator`] state
//! machine, the per-frame loop that streams pointer coordinates, the two
//! broadcast channels bindings subscribe to, and the host-owned
//! [`AssignmentMap`].
//!
//! # Key Components
//!
//! - [`DragCoordinator`] - owns the drag session and resolves drops
//! - [`DragContext`] / [`DropContext`] - per-channel injection points
//! - [`FrameScheduler`] - host frame clock; [`ManualFrameClock`] for tests
//! - [`FrameLoop`] - self-rescheduling per-frame task
//! - [`ItemRegistry`] - registered items keyed by assignment
//! - [`DragDispatch`] - what each handler did, and why not when it didn't
//!
//! # Threading
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). The host drives it
//! from its UI thread: pointer events in, frame ticks in, broadcasts out.

pub mod assignment;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod dispatch;
pub mod frame;
pub mod reactive;
pub mod registry;

pub use assignment::{AssignmentMap, Assignments};
pub use config::{DEFAULT_DEPTH_BIAS, DEFAULT_ELEVATED_Z_INDEX, DragConfig, DragConfigError};
pub use context::{DragContext, DropContext};
pub use coordinator::{DragCoordinator, DragSnapshot, DragState};
pub use dispatch::{DragDispatch, DragIgnoredReason, DragOutcome, DragPhase};
pub use frame::{FrameCallback, FrameHandle, FrameLoop, FrameScheduler, FrameTime, ManualFrameClock};
pub use reactive::{Broadcast, BroadcastReader, Subscription};
pub use registry::{DraggableItem, DropCallback, ItemRegistry};
