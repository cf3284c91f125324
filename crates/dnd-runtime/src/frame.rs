#![forbid(unsafe_code)]

//! Frame scheduling and the self-rescheduling frame loop.
//!
//! # Design
//!
//! [`FrameScheduler`] is the host's display-sync primitive
//! (`requestAnimationFrame` / `cancelAnimationFrame` on the web, a vsync
//! callback elsewhere). It is single-threaded: callbacks are `FnOnce` and run
//! on the host's event loop.
//!
//! [`FrameLoop`] turns one-shot frame requests into a repeating task. Each
//! invocation first schedules the next one, then runs the body, so a body
//! that cancels the loop cancels the request that was just made. The loop
//! keeps the single live handle in an instance-variable cell and cancels it
//! on [`FrameLoop::cancel`] and on drop.
//!
//! [`ManualFrameClock`] is the deterministic host-driven scheduler: the host
//! (or a test) calls [`ManualFrameClock::tick`] once per display frame.
//!
//! # Invariants
//!
//! 1. A running `FrameLoop` has exactly one outstanding handle.
//! 2. After `cancel()` or drop, the loop has zero outstanding handles and its
//!    body never runs again.
//! 3. Callbacks requested during a tick run on the next tick, never the
//!    current one.
//! 4. A cancelled callback never runs, even if it was due in the current tick.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use dnd_core::instance::{InstanceGetter, InstanceSetter, instance_var};
use tracing::trace;
use web_time::Instant;

/// Opaque handle to a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Raw handle value, for hosts that bridge to a native scheduler.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Wrap a raw handle value issued by a native scheduler.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Timing information handed to a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Monotonic frame counter of the scheduler (first frame is 1).
    pub frame: u64,
    /// Timestamp of the frame.
    pub now: Instant,
}

/// One-shot frame callback.
pub type FrameCallback = Box<dyn FnOnce(FrameTime)>;

/// Host display-sync primitive.
pub trait FrameScheduler {
    /// Request `callback` to run on the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

// ---------------------------------------------------------------------------
// ManualFrameClock
// ---------------------------------------------------------------------------

struct PendingFrame {
    handle: FrameHandle,
    callback: FrameCallback,
}

/// Deterministic, host-driven frame scheduler.
#[derive(Default)]
pub struct ManualFrameClock {
    next_handle: Cell<u64>,
    frame: Cell<u64>,
    queued: RefCell<VecDeque<PendingFrame>>,
    due: RefCell<VecDeque<PendingFrame>>,
}

impl fmt::Debug for ManualFrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualFrameClock")
            .field("frame", &self.frame.get())
            .field("pending", &self.pending())
            .finish()
    }
}

impl ManualFrameClock {
    /// Create a clock with no pending callbacks.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of outstanding (requested, not yet fired or cancelled) callbacks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queued.borrow().len() + self.due.borrow().len()
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Run every callback that was pending when the tick began.
    ///
    /// Returns the number of callbacks run.
    pub fn tick(&self, now: Instant) -> usize {
        let frame = self.frame.get() + 1;
        self.frame.set(frame);
        {
            let mut queued = self.queued.borrow_mut();
            self.due.borrow_mut().extend(queued.drain(..));
        }

        let time = FrameTime { frame, now };
        let mut ran = 0;
        loop {
            let next = self.due.borrow_mut().pop_front();
            let Some(pending) = next else {
                break;
            };
            (pending.callback)(time);
            ran += 1;
        }
        trace!(frame, ran, "frame ticked");
        ran
    }

    /// [`tick`](Self::tick) at the current instant.
    pub fn tick_now(&self) -> usize {
        self.tick(Instant::now())
    }
}

impl FrameScheduler for ManualFrameClock {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let raw = self.next_handle.get() + 1;
        self.next_handle.set(raw);
        let handle = FrameHandle(raw);
        self.queued
            .borrow_mut()
            .push_back(PendingFrame { handle, callback });
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queued.borrow_mut().retain(|p| p.handle != handle);
        self.due.borrow_mut().retain(|p| p.handle != handle);
    }
}

// ---------------------------------------------------------------------------
// FrameLoop
// ---------------------------------------------------------------------------

struct LoopState {
    scheduler: Rc<dyn FrameScheduler>,
    handle: InstanceGetter<Option<FrameHandle>>,
    set_handle: InstanceSetter<Option<FrameHandle>>,
    running: Cell<bool>,
    body: Box<dyn Fn(FrameTime)>,
}

/// A cancellable repeating task bound to a [`FrameScheduler`].
///
/// The loop stops when cancelled or dropped; there is no way to leak the
/// recurring callback past the owner's lifetime.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("running", &self.state.running.get())
            .field("handle", &self.state.handle.get())
            .finish()
    }
}

impl FrameLoop {
    /// Schedule `body` to run on every frame from the next one on.
    pub fn start(scheduler: Rc<dyn FrameScheduler>, body: impl Fn(FrameTime) + 'static) -> Self {
        let (handle, set_handle) = instance_var(None);
        let state = Rc::new(LoopState {
            scheduler,
            handle,
            set_handle,
            running: Cell::new(true),
            body: Box::new(body),
        });
        schedule_next(&state);
        Self { state }
    }

    /// Whether the loop is still scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// The currently outstanding handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<FrameHandle> {
        self.state.handle.get()
    }

    /// Stop the loop and cancel the outstanding request. Idempotent.
    pub fn cancel(&self) {
        self.state.running.set(false);
        if let Some(handle) = self.state.set_handle.take() {
            self.state.scheduler.cancel_frame(handle);
            trace!(handle = handle.raw(), "frame loop cancelled");
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule_next(state: &Rc<LoopState>) {
    let weak: Weak<LoopState> = Rc::downgrade(state);
    let handle = state.scheduler.request_frame(Box::new(move |time| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if !state.running.get() {
            return;
        }
        schedule_next(&state);
        (state.body)(time);
    }));
    state.set_handle.set(Some(handle));
}
