#![forbid(unsafe_code)]

//! The drag/drop coordinator.
//!
//! [`DragCoordinator`] owns the drag session: which item is active, where the
//! pointer is, and what happens on drop. It publishes state downward on two
//! independent channels, handed out as [`DragContext`] (drag position and
//! the start operation, for item bindings) and [`DropContext`] (registered
//! items and drop resolution, for target bindings).
//!
//! # State Machine
//!
//! ```text
//!            start (Idle only)
//!   Idle ───────────────────────▶ Dragging { item }
//!    ▲                               │   move: update pointer cell
//!    │   stop / drop / interrupt     │   frame: publish (item, coords)
//!    └───────────────────────────────┘
//! ```
//!
//! Stopping is synchronous: there is no observable state between Dragging
//! and Idle.
//!
//! # Invariants
//!
//! 1. At most one drag session is active; a start while Dragging is ignored.
//! 2. While Dragging exactly one frame request is outstanding; while Idle none.
//! 3. After any stop the pointer cell reads `(0, 0)` and the published
//!    snapshot is idle.
//! 4. A drop invokes at most one drop callback, exactly once.
//! 5. Dropping the coordinator cancels the outstanding frame request.
//!
//! # Known limitation
//!
//! The coordinator's surface handlers (`handle_pointer_move`,
//! `handle_pointer_up`) take precedence over any handlers a host attaches to
//! the same surface. Hosts that need their own must call them explicitly; no
//! merge order is defined.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dnd_core::event::{PointerEvent, PointerEventKind};
use dnd_core::geometry::Point;
use dnd_core::instance::{InstanceGetter, InstanceSetter, instance_var};
use dnd_core::key::{ItemId, TargetId};
use tracing::{debug, trace};

use crate::config::DragConfig;
use crate::context::{DragContext, DropContext};
use crate::dispatch::{DragDispatch, DragIgnoredReason, DragOutcome, DragPhase};
use crate::frame::{FrameHandle, FrameLoop, FrameScheduler, FrameTime};
use crate::reactive::Broadcast;
use crate::registry::{DraggableItem, ItemRegistry};

/// Drag state as published on the drag channel.
///
/// Both fields are `None` while Idle. While Dragging they are filled on the
/// first frame after the start.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragSnapshot {
    pub active: Option<ItemId>,
    pub coords: Option<Point>,
}

impl DragSnapshot {
    /// The idle snapshot.
    pub const IDLE: Self = Self {
        active: None,
        coords: None,
    };

    /// Whether `item` is the active assignment.
    #[must_use]
    pub fn is_active(&self, item: &ItemId) -> bool {
        self.active.as_ref() == Some(item)
    }
}

/// Coordinator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { item: ItemId },
}

pub(crate) struct CoordinatorInner {
    config: DragConfig,
    scheduler: Rc<dyn FrameScheduler>,
    pointer: InstanceGetter<Point>,
    set_pointer: InstanceSetter<Point>,
    active: RefCell<Option<ItemId>>,
    frame_loop: RefCell<Option<FrameLoop>>,
    pub(crate) drag_state: Broadcast<DragSnapshot>,
    pub(crate) items: Broadcast<ItemRegistry>,
}

impl CoordinatorInner {
    pub(crate) fn drag_start(self: &Rc<Self>, event: &PointerEvent, item: ItemId) -> DragDispatch {
        if let Some(active) = self.active.borrow().as_ref() {
            debug!(%active, requested = %item, "drag start ignored: session already active");
            return DragDispatch::ignored(
                DragPhase::PointerDown,
                DragIgnoredReason::SessionAlreadyActive,
            );
        }

        let position = event.position();
        self.set_pointer.set(position);
        *self.active.borrow_mut() = Some(item.clone());

        let weak: Weak<Self> = Rc::downgrade(self);
        let frame_loop = FrameLoop::start(Rc::clone(&self.scheduler), move |time| {
            if let Some(inner) = weak.upgrade() {
                inner.publish_frame(time);
            }
        });
        *self.frame_loop.borrow_mut() = Some(frame_loop);

        debug!(%item, x = position.x, y = position.y, "drag session started");
        DragDispatch::handled(DragPhase::PointerDown, DragOutcome::Started { item, position })
    }

    fn publish_frame(&self, time: FrameTime) {
        let active = self.active.borrow().clone();
        let Some(active) = active else {
            return;
        };
        let coords = self.pointer.get();
        trace!(frame = time.frame, item = %active, x = coords.x, y = coords.y, "drag frame");
        self.drag_state.publish(DragSnapshot {
            active: Some(active),
            coords: Some(coords),
        });
    }

    pub(crate) fn pointer_move(&self, event: &PointerEvent) -> DragDispatch {
        if self.active.borrow().is_none() {
            return DragDispatch::ignored(DragPhase::PointerMove, DragIgnoredReason::NoActiveSession);
        }
        let position = event.position();
        self.set_pointer.set(position);
        DragDispatch::handled(DragPhase::PointerMove, DragOutcome::Moved { position })
    }

    pub(crate) fn stop(&self, phase: DragPhase) -> DragDispatch {
        self.set_pointer.set(Point::ORIGIN);
        let item = self.active.borrow_mut().take();
        let frame_loop = self.frame_loop.borrow_mut().take();
        if let Some(frame_loop) = frame_loop {
            frame_loop.cancel();
        }
        self.drag_state.publish(DragSnapshot::IDLE);

        match &item {
            Some(item) => debug!(%item, ?phase, "drag session stopped"),
            None => trace!(?phase, "stop with no active session"),
        }
        DragDispatch::handled(phase, DragOutcome::Stopped { item })
    }

    pub(crate) fn drop_on(&self, target: TargetId) -> DragDispatch {
        let active = self.active.borrow().clone();
        let Some(active) = active else {
            debug!(%target, "drop ignored: no active session");
            return DragDispatch::ignored(DragPhase::Drop, DragIgnoredReason::NoActiveSession);
        };

        let item = self.items.with(|items| items.get(&active).cloned());
        let Some(item) = item else {
            debug!(%active, %target, "drop ignored: no item at active assignment");
            return DragDispatch::ignored(DragPhase::Drop, DragIgnoredReason::NoItemForAssignment);
        };

        debug!(item = %active, %target, "drop resolved");
        item.drop_onto(target.clone());
        self.stop(DragPhase::Drop);
        DragDispatch::handled(
            DragPhase::Drop,
            DragOutcome::Dropped {
                item: active,
                target,
            },
        )
    }
}

impl Drop for CoordinatorInner {
    fn drop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.get_mut().take() {
            frame_loop.cancel();
            debug!("coordinator torn down mid-drag; frame loop cancelled");
        }
    }
}

/// Stateful drag/drop controller.
///
/// One coordinator per drag surface. Dropping it is the teardown: any
/// outstanding frame request is cancelled and contexts handed out earlier
/// degrade to [`DragIgnoredReason::CoordinatorGone`].
pub struct DragCoordinator {
    inner: Rc<CoordinatorInner>,
}

impl std::fmt::Debug for DragCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("state", &self.state())
            .field("pointer", &self.pointer())
            .field("frame_handle", &self.frame_handle())
            .finish()
    }
}

impl DragCoordinator {
    /// Create an idle coordinator driven by `scheduler`.
    #[must_use]
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self::with_config(scheduler, DragConfig::default())
    }

    /// Create an idle coordinator with an explicit configuration.
    #[must_use]
    pub fn with_config(scheduler: Rc<dyn FrameScheduler>, config: DragConfig) -> Self {
        let (pointer, set_pointer) = instance_var(Point::ORIGIN);
        Self {
            inner: Rc::new(CoordinatorInner {
                config,
                scheduler,
                pointer,
                set_pointer,
                active: RefCell::new(None),
                frame_loop: RefCell::new(None),
                drag_state: Broadcast::new(DragSnapshot::IDLE),
                items: Broadcast::new(ItemRegistry::default()),
            }),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> DragConfig {
        self.inner.config
    }

    /// Replace the registered draggable items.
    ///
    /// Call this whenever the host re-renders the item list, typically after
    /// a drop callback updated the assignment map.
    pub fn set_items(&self, items: impl IntoIterator<Item = DraggableItem>) {
        let registry = ItemRegistry::from_items(items);
        trace!(items = registry.len(), "items registered");
        self.inner.items.publish(registry);
    }

    /// Currently registered items.
    #[must_use]
    pub fn items(&self) -> ItemRegistry {
        self.inner.items.get()
    }

    /// Injection point for item bindings.
    #[must_use]
    pub fn drag_context(&self) -> DragContext {
        DragContext::new(
            Rc::downgrade(&self.inner),
            self.inner.drag_state.reader(),
            self.inner.config,
        )
    }

    /// Injection point for target bindings.
    #[must_use]
    pub fn drop_context(&self) -> DropContext {
        DropContext::new(Rc::downgrade(&self.inner), self.inner.items.reader())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DragState {
        match self.inner.active.borrow().as_ref() {
            Some(item) => DragState::Dragging { item: item.clone() },
            None => DragState::Idle,
        }
    }

    /// Whether a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.inner.active.borrow().is_some()
    }

    /// Active assignment key, if dragging.
    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        self.inner.active.borrow().clone()
    }

    /// Latest raw pointer position.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.inner.pointer.get()
    }

    /// Last snapshot published on the drag channel.
    #[must_use]
    pub fn snapshot(&self) -> DragSnapshot {
        self.inner.drag_state.get()
    }

    /// Outstanding frame request, if any.
    #[must_use]
    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.inner
            .frame_loop
            .borrow()
            .as_ref()
            .and_then(FrameLoop::handle)
    }

    /// Start dragging `item` from `event`'s position. Only valid while Idle.
    pub fn handle_drag_start(&self, event: &PointerEvent, item: impl Into<ItemId>) -> DragDispatch {
        self.inner.drag_start(event, item.into())
    }

    /// Pointer moved over the drag surface.
    pub fn handle_pointer_move(&self, event: &PointerEvent) -> DragDispatch {
        self.inner.pointer_move(event)
    }

    /// Pointer released over the drag surface: stop.
    pub fn handle_pointer_up(&self, _event: &PointerEvent) -> DragDispatch {
        self.inner.stop(DragPhase::PointerUp)
    }

    /// Pointer released over drop target `target`.
    ///
    /// Callers are expected to have checked the target accepts drops; the
    /// drop-target binding does that.
    pub fn handle_drop(&self, target: impl Into<TargetId>) -> DragDispatch {
        self.inner.drop_on(target.into())
    }

    /// Route a raw surface event. Pointer-down on the bare surface is not a
    /// drag input and yields `None`.
    pub fn handle_surface_event(&self, event: &PointerEvent) -> Option<DragDispatch> {
        match event.kind {
            PointerEventKind::Move => Some(self.handle_pointer_move(event)),
            PointerEventKind::Up(_) => Some(self.handle_pointer_up(event)),
            PointerEventKind::Down(_) => None,
        }
    }

    /// Stop any active session. Valid from any state and idempotent.
    pub fn stop(&self) -> DragDispatch {
        self.inner.stop(DragPhase::PointerUp)
    }

    /// Host-level interruption (focus loss, hidden document). Same effect
    /// as [`stop`](Self::stop).
    pub fn interrupt(&self) -> DragDispatch {
        self.inner.stop(DragPhase::Interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ManualFrameClock;
    use dnd_core::event::PointerButton;
    use dnd_core::key::DragKey;
    use std::cell::Cell;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};

    fn fixture() -> (Rc<ManualFrameClock>, DragCoordinator) {
        let clock = ManualFrameClock::new();
        let coordinator = DragCoordinator::new(clock.clone());
        (clock, coordinator)
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::down(PointerButton::Left, x, y)
    }

    fn up() -> PointerEvent {
        PointerEvent::up(PointerButton::Left, 0.0, 0.0)
    }

    #[test]
    fn start_from_idle_enters_dragging_with_one_outstanding_frame() {
        let (clock, coordinator) = fixture();
        let dispatch = coordinator.handle_drag_start(&down(10.0, 20.0), "00");

        assert_eq!(
            dispatch.outcome,
            DragOutcome::Started {
                item: "00".into(),
                position: Point::new(10.0, 20.0)
            }
        );
        assert_eq!(coordinator.state(), DragState::Dragging { item: "00".into() });
        assert_eq!(coordinator.pointer(), Point::new(10.0, 20.0));
        for _ in 0..10 {
            assert_eq!(clock.pending(), 1);
            assert!(coordinator.frame_handle().is_some());
            clock.tick_now();
        }
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn snapshot_is_published_on_frames_not_on_start() {
        let (clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(1.0, 2.0), 7);
        assert_eq!(coordinator.snapshot(), DragSnapshot::IDLE);

        clock.tick_now();
        assert_eq!(
            coordinator.snapshot(),
            DragSnapshot {
                active: Some(7.into()),
                coords: Some(Point::new(1.0, 2.0)),
            }
        );

        coordinator.handle_pointer_move(&PointerEvent::moved(30.0, 40.0));
        assert_eq!(coordinator.snapshot().coords, Some(Point::new(1.0, 2.0)));
        clock.tick_now();
        assert_eq!(coordinator.snapshot().coords, Some(Point::new(30.0, 40.0)));
    }

    #[test]
    fn frame_reads_latest_move_before_the_tick() {
        let (clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(0.0, 0.0), 1);
        for step in 1..=5 {
            coordinator.handle_pointer_move(&PointerEvent::moved(f64::from(step), 0.0));
        }
        clock.tick_now();
        assert_eq!(coordinator.snapshot().coords, Some(Point::new(5.0, 0.0)));
    }

    #[test]
    fn start_while_dragging_is_ignored() {
        let (clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(0.0, 0.0), "00");
        clock.tick_now();
        let dispatch = coordinator.handle_drag_start(&down(5.0, 5.0), "01");

        assert_eq!(
            dispatch.ignored_reason(),
            Some(DragIgnoredReason::SessionAlreadyActive)
        );
        assert_eq!(coordinator.active_item(), Some("00".into()));
        assert_eq!(coordinator.pointer(), Point::new(0.0, 0.0));
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn second_start_before_first_frame_is_still_ignored() {
        let (clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(0.0, 0.0), "00");
        let dispatch = coordinator.handle_drag_start(&down(0.0, 0.0), "01");
        assert!(dispatch.is_ignored());
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn move_while_idle_has_no_effect() {
        let (_clock, coordinator) = fixture();
        let dispatch = coordinator.handle_pointer_move(&PointerEvent::moved(9.0, 9.0));
        assert_eq!(
            dispatch.ignored_reason(),
            Some(DragIgnoredReason::NoActiveSession)
        );
        assert!(dispatch.prevent_default);
        assert_eq!(coordinator.pointer(), Point::ORIGIN);
    }

    #[test]
    fn stop_resets_everything_and_is_idempotent() {
        let (clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(3.0, 4.0), "00");
        clock.tick_now();
        coordinator.handle_pointer_move(&PointerEvent::moved(50.0, 60.0));

        let first = coordinator.handle_pointer_up(&up());
        assert_eq!(first.outcome, DragOutcome::Stopped { item: Some("00".into()) });
        let second = coordinator.stop();
        assert_eq!(second.outcome, DragOutcome::Stopped { item: None });

        assert_eq!(coordinator.state(), DragState::Idle);
        assert_eq!(coordinator.pointer(), Point::ORIGIN);
        assert_eq!(coordinator.snapshot(), DragSnapshot::IDLE);
        assert_eq!(coordinator.frame_handle(), None);
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.tick_now(), 0);
    }

    #[test]
    fn stop_while_idle_is_harmless() {
        let (clock, coordinator) = fixture();
        let dispatch = coordinator.stop();
        assert!(!dispatch.is_ignored());
        assert_eq!(coordinator.state(), DragState::Idle);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn drop_while_dragging_invokes_callback_once_then_stops() {
        let (clock, coordinator) = fixture();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_clone = Rc::clone(&calls);
        coordinator.set_items([
            DraggableItem::new("00", move |target| calls_clone.borrow_mut().push(target)),
            DraggableItem::new("01", |_| panic!("wrong item dropped")),
        ]);

        coordinator.handle_drag_start(&down(0.0, 0.0), "00");
        clock.tick_now();
        let dispatch = coordinator.handle_drop(5);

        assert_eq!(
            dispatch.outcome,
            DragOutcome::Dropped {
                item: "00".into(),
                target: 5.into()
            }
        );
        assert_eq!(*calls.borrow(), vec![DragKey::from(5)]);
        assert_eq!(coordinator.state(), DragState::Idle);
        assert_eq!(clock.pending(), 0);

        // The bubbling surface pointer-up is a no-op stop.
        coordinator.handle_pointer_up(&up());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn drop_while_idle_invokes_nothing() {
        let (_clock, coordinator) = fixture();
        let hits = Rc::new(Cell::new(0));
        let hits_clone = Rc::clone(&hits);
        coordinator.set_items([DraggableItem::new("00", move |_| {
            hits_clone.set(hits_clone.get() + 1);
        })]);

        let dispatch = coordinator.handle_drop(5);
        assert_eq!(
            dispatch.ignored_reason(),
            Some(DragIgnoredReason::NoActiveSession)
        );
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn drop_without_matching_item_is_a_no_op() {
        let (clock, coordinator) = fixture();
        coordinator.set_items([DraggableItem::new("01", |_| panic!("unexpected drop"))]);
        coordinator.handle_drag_start(&down(0.0, 0.0), "00");

        let dispatch = coordinator.handle_drop(5);
        assert_eq!(
            dispatch.ignored_reason(),
            Some(DragIgnoredReason::NoItemForAssignment)
        );
        assert!(coordinator.is_dragging());
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn drop_callback_may_re_register_items() {
        let clock = ManualFrameClock::new();
        let coordinator = Rc::new(DragCoordinator::new(clock.clone()));
        let weak = Rc::downgrade(&coordinator);
        coordinator.set_items([DraggableItem::new("00", move |target| {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.set_items([DraggableItem::new(target, |_| {})]);
            }
        })]);

        coordinator.handle_drag_start(&down(0.0, 0.0), "00");
        coordinator.handle_drop(5);

        let items = coordinator.items();
        assert!(items.contains(&5.into()));
        assert!(!items.contains(&"00".into()));
    }

    #[test]
    fn teardown_while_dragging_cancels_frame_request() {
        let (clock, coordinator) = fixture();
        let context = coordinator.drag_context();
        coordinator.handle_drag_start(&down(0.0, 0.0), "00");
        clock.tick_now();
        assert_eq!(clock.pending(), 1);

        drop(coordinator);
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.tick_now(), 0);
        assert_eq!(
            context.start_drag(&down(0.0, 0.0), "01".into()).ignored_reason(),
            Some(DragIgnoredReason::CoordinatorGone)
        );
    }

    #[test]
    fn interrupt_reports_interrupt_phase() {
        let (clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(0.0, 0.0), 3);
        let dispatch = coordinator.interrupt();
        assert_eq!(dispatch.phase, DragPhase::Interrupt);
        assert_eq!(dispatch.outcome, DragOutcome::Stopped { item: Some(3.into()) });
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn surface_events_route_to_move_and_stop() {
        let (_clock, coordinator) = fixture();
        coordinator.handle_drag_start(&down(0.0, 0.0), 3);
        let moved = coordinator
            .handle_surface_event(&PointerEvent::moved(4.0, 4.0))
            .expect("move is routed");
        assert_eq!(moved.phase, DragPhase::PointerMove);
        assert!(coordinator.handle_surface_event(&down(1.0, 1.0)).is_none());
        let stopped = coordinator
            .handle_surface_event(&up())
            .expect("up is routed");
        assert_eq!(stopped.outcome, DragOutcome::Stopped { item: Some(3.into()) });
    }

    #[test]
    fn subscriber_sees_each_frame_and_the_reset() {
        let (clock, coordinator) = fixture();
        let context = coordinator.drag_context();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = context.subscribe(move |snapshot| seen_clone.borrow_mut().push(snapshot.clone()));

        coordinator.handle_drag_start(&down(1.0, 1.0), 1);
        clock.tick_now();
        coordinator.handle_pointer_move(&PointerEvent::moved(2.0, 2.0));
        clock.tick_now();
        clock.tick_now();
        coordinator.stop();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].coords, Some(Point::new(1.0, 1.0)));
        assert_eq!(seen[1].coords, Some(Point::new(2.0, 2.0)));
        assert_eq!(seen[2], DragSnapshot::IDLE);
    }

    #[derive(Default)]
    struct MessageVisitor {
        message: Option<String>,
    }

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = Some(format!("{value:?}"));
            }
        }
    }

    struct MessageCapture {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl tracing::Subscriber for MessageCapture {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            if let Some(message) = visitor.message {
                self.messages.lock().expect("message capture lock").push(message);
            }
        }

        fn enter(&self, _span: &tracing::span::Id) {}

        fn exit(&self, _span: &tracing::span::Id) {}
    }

    #[test]
    fn lifecycle_is_logged() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let _guard = tracing::subscriber::set_default(MessageCapture {
            messages: Arc::clone(&messages),
        });

        let (clock, coordinator) = fixture();
        coordinator.set_items([DraggableItem::new("00", |_| {})]);
        coordinator.handle_drag_start(&down(0.0, 0.0), "00");
        coordinator.handle_drag_start(&down(0.0, 0.0), "01");
        clock.tick_now();
        coordinator.handle_drop(5);

        let messages = messages.lock().expect("message capture lock");
        for expected in [
            "drag session started",
            "drag start ignored: session already active",
            "drop resolved",
            "drag session stopped",
        ] {
            assert!(
                messages.iter().any(|m| m == expected),
                "missing log line {expected:?} in {messages:?}"
            );
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Start(i64),
            Move(f64, f64),
            Up,
            Drop(i64),
            Tick,
            Interrupt,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0i64..4).prop_map(Op::Start),
                (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Op::Move(x, y)),
                Just(Op::Up),
                (0i64..4).prop_map(Op::Drop),
                Just(Op::Tick),
                Just(Op::Interrupt),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn outstanding_frames_track_session(ops in prop::collection::vec(arb_op(), 1..60)) {
                let (clock, coordinator) = fixture();
                coordinator.set_items((0..2).map(|key| DraggableItem::new(key, |_| {})));

                for op in ops {
                    match op {
                        Op::Start(item) => {
                            let before = coordinator.active_item();
                            let dispatch = coordinator.handle_drag_start(&down(1.0, 1.0), item);
                            if before.is_some() {
                                prop_assert!(dispatch.is_ignored());
                                prop_assert_eq!(coordinator.active_item(), before);
                            }
                        }
                        Op::Move(x, y) => {
                            coordinator.handle_pointer_move(&PointerEvent::moved(x, y));
                        }
                        Op::Up => {
                            coordinator.handle_pointer_up(&up());
                        }
                        Op::Drop(target) => {
                            coordinator.handle_drop(target);
                        }
                        Op::Tick => {
                            clock.tick_now();
                        }
                        Op::Interrupt => {
                            coordinator.interrupt();
                        }
                    }

                    let expected = usize::from(coordinator.is_dragging());
                    prop_assert_eq!(clock.pending(), expected);
                    if !coordinator.is_dragging() {
                        prop_assert_eq!(coordinator.pointer(), Point::ORIGIN);
                        prop_assert_eq!(coordinator.snapshot(), DragSnapshot::IDLE);
                    }
                }
            }
        }
    }
}
