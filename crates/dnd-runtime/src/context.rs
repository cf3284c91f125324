#![forbid(unsafe_code)]

//! Injection points handed from the coordinator to bindings.
//!
//! Two contexts, one per channel, so item bindings and target bindings
//! subscribe independently: a target never wakes up because the pointer
//! moved, and an item never wakes up because the item list was rebuilt.
//!
//! Contexts hold a weak reference to the coordinator. Once it is dropped,
//! reads keep returning the last published value and operations report
//! [`DragIgnoredReason::CoordinatorGone`].

use std::rc::{Rc, Weak};

use dnd_core::event::PointerEvent;
use dnd_core::key::{ItemId, TargetId};

use crate::config::DragConfig;
use crate::coordinator::{CoordinatorInner, DragSnapshot};
use crate::dispatch::{DragDispatch, DragIgnoredReason, DragPhase};
use crate::reactive::{BroadcastReader, Subscription};
use crate::registry::{DraggableItem, ItemRegistry};

/// Drag channel: current drag state plus the start operation.
#[derive(Clone)]
pub struct DragContext {
    coordinator: Weak<CoordinatorInner>,
    state: BroadcastReader<DragSnapshot>,
    config: DragConfig,
}

impl std::fmt::Debug for DragContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragContext")
            .field("state", &self.state)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl DragContext {
    pub(crate) fn new(
        coordinator: Weak<CoordinatorInner>,
        state: BroadcastReader<DragSnapshot>,
        config: DragConfig,
    ) -> Self {
        Self {
            coordinator,
            state,
            config,
        }
    }

    /// Last published drag state.
    #[must_use]
    pub fn snapshot(&self) -> DragSnapshot {
        self.state.get()
    }

    /// Active assignment key as last published.
    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        self.state.with(|s| s.active.clone())
    }

    /// Whether `item` is the published active assignment.
    #[must_use]
    pub fn is_active(&self, item: &ItemId) -> bool {
        self.state.with(|s| s.is_active(item))
    }

    /// Channel version, bumped on every published change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Subscribe to drag-state changes.
    pub fn subscribe(&self, callback: impl Fn(&DragSnapshot) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    /// Configuration of the coordinator this context came from.
    #[must_use]
    pub fn config(&self) -> DragConfig {
        self.config
    }

    /// Whether the coordinator is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.coordinator.strong_count() > 0
    }

    /// Ask the coordinator to start dragging `item`.
    pub fn start_drag(&self, event: &PointerEvent, item: ItemId) -> DragDispatch {
        match self.coordinator.upgrade() {
            Some(inner) => inner.drag_start(event, item),
            None => DragDispatch::filtered(DragPhase::PointerDown, DragIgnoredReason::CoordinatorGone),
        }
    }
}

/// Drop channel: registered items plus drop resolution.
#[derive(Clone)]
pub struct DropContext {
    coordinator: Weak<CoordinatorInner>,
    items: BroadcastReader<ItemRegistry>,
}

impl std::fmt::Debug for DropContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropContext")
            .field("items", &self.items)
            .field("attached", &(self.coordinator.strong_count() > 0))
            .finish()
    }
}

impl DropContext {
    pub(crate) fn new(coordinator: Weak<CoordinatorInner>, items: BroadcastReader<ItemRegistry>) -> Self {
        Self { coordinator, items }
    }

    /// Registered items.
    #[must_use]
    pub fn items(&self) -> ItemRegistry {
        self.items.get()
    }

    /// The item currently assigned to `target`.
    #[must_use]
    pub fn item_at(&self, target: &TargetId) -> Option<Rc<DraggableItem>> {
        self.items.with(|items| items.get(target).cloned())
    }

    /// Whether an item is currently assigned to `target`.
    #[must_use]
    pub fn is_occupied(&self, target: &TargetId) -> bool {
        self.items.with(|items| items.contains(target))
    }

    /// Subscribe to item-list changes.
    pub fn subscribe(&self, callback: impl Fn(&ItemRegistry) + 'static) -> Subscription {
        self.items.subscribe(callback)
    }

    /// Resolve a drop onto `target`.
    pub fn drop_on(&self, target: TargetId) -> DragDispatch {
        match self.coordinator.upgrade() {
            Some(inner) => inner.drop_on(target),
            None => DragDispatch::filtered(DragPhase::Drop, DragIgnoredReason::CoordinatorGone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::DragCoordinator;
    use crate::frame::ManualFrameClock;
    use dnd_core::event::PointerButton;
    use std::cell::Cell;

    #[test]
    fn drag_context_starts_and_observes() {
        let clock = ManualFrameClock::new();
        let coordinator = DragCoordinator::new(clock.clone());
        let context = coordinator.drag_context();
        assert!(context.is_attached());
        assert_eq!(context.snapshot(), DragSnapshot::IDLE);

        let dispatch = context.start_drag(&PointerEvent::down(PointerButton::Left, 2.0, 3.0), "00".into());
        assert!(!dispatch.is_ignored());
        assert_eq!(context.active_item(), None);
        clock.tick_now();
        assert!(context.is_active(&"00".into()));
        assert_eq!(context.version(), 1);
    }

    #[test]
    fn drop_context_tracks_item_list() {
        let clock = ManualFrameClock::new();
        let coordinator = DragCoordinator::new(clock);
        let context = coordinator.drop_context();
        let changes = Rc::new(Cell::new(0));
        let changes_clone = Rc::clone(&changes);
        let _sub = context.subscribe(move |_| changes_clone.set(changes_clone.get() + 1));

        assert!(!context.is_occupied(&"00".into()));
        coordinator.set_items([DraggableItem::new("00", |_| {})]);
        assert!(context.is_occupied(&"00".into()));
        assert!(context.item_at(&"00".into()).is_some());
        assert_eq!(context.items().len(), 1);
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn drag_channel_does_not_wake_drop_subscribers() {
        let clock = ManualFrameClock::new();
        let coordinator = DragCoordinator::new(clock.clone());
        let drop_context = coordinator.drop_context();
        let wakeups = Rc::new(Cell::new(0));
        let wakeups_clone = Rc::clone(&wakeups);
        let _sub = drop_context.subscribe(move |_| wakeups_clone.set(wakeups_clone.get() + 1));

        coordinator.handle_drag_start(&PointerEvent::down(PointerButton::Left, 0.0, 0.0), 1);
        clock.tick_now();
        coordinator.handle_pointer_move(&PointerEvent::moved(5.0, 5.0));
        clock.tick_now();
        coordinator.stop();
        assert_eq!(wakeups.get(), 0);
    }

    #[test]
    fn contexts_degrade_after_teardown() {
        let clock = ManualFrameClock::new();
        let coordinator = DragCoordinator::new(clock);
        coordinator.set_items([DraggableItem::new(1, |_| {})]);
        let drag = coordinator.drag_context();
        let drop_ctx = coordinator.drop_context();
        drop(coordinator);

        assert!(!drag.is_attached());
        assert_eq!(drag.snapshot(), DragSnapshot::IDLE);
        assert!(drop_ctx.is_occupied(&1.into()));
        let dispatch = drop_ctx.drop_on(5.into());
        assert_eq!(
            dispatch.ignored_reason(),
            Some(DragIgnoredReason::CoordinatorGone)
        );
        assert!(!dispatch.prevent_default);
    }
}
