#![forbid(unsafe_code)]

//! Registered draggable items, keyed by their current assignment.
//!
//! The coordinator never owns the assignment map. It only needs to answer
//! "which registered item currently sits at key K", for two callers: drop
//! resolution (K = the active key) and drop targets (K = the target's own
//! id). [`ItemRegistry`] keeps an explicit map for that lookup instead of
//! scanning the item list.
//!
//! When two items claim the same assignment, the first one registered wins.

use std::collections::hash_map::Entry;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use dnd_core::key::{ItemId, TargetId};
use tracing::debug;

/// Callback invoked with the target an item was dropped on.
pub type DropCallback = Rc<dyn Fn(TargetId)>;

/// Descriptor of one draggable item.
#[derive(Clone)]
pub struct DraggableItem {
    assigned: ItemId,
    on_drop: DropCallback,
}

impl fmt::Debug for DraggableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableItem")
            .field("assigned", &self.assigned)
            .finish_non_exhaustive()
    }
}

impl DraggableItem {
    /// Describe an item currently assigned to `assigned`.
    ///
    /// `on_drop` is expected to update the caller's assignment map.
    pub fn new(assigned: impl Into<ItemId>, on_drop: impl Fn(TargetId) + 'static) -> Self {
        Self {
            assigned: assigned.into(),
            on_drop: Rc::new(on_drop),
        }
    }

    /// Key of the target this item is currently assigned to.
    #[must_use]
    pub fn assigned(&self) -> &ItemId {
        &self.assigned
    }

    /// Invoke the drop callback.
    pub fn drop_onto(&self, target: TargetId) {
        (self.on_drop)(target);
    }
}

/// Items registered with a coordinator.
#[derive(Clone, Default)]
pub struct ItemRegistry {
    order: Vec<Rc<DraggableItem>>,
    by_assignment: AHashMap<ItemId, Rc<DraggableItem>>,
}

impl fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.order.iter().map(|item| &item.assigned))
            .finish()
    }
}

impl PartialEq for ItemRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.order.len() == other.order.len()
            && self
                .order
                .iter()
                .zip(&other.order)
                .all(|(a, b)| Rc::ptr_eq(a, b))
    }
}

impl ItemRegistry {
    /// Build a registry from items in render order.
    pub fn from_items(items: impl IntoIterator<Item = DraggableItem>) -> Self {
        let mut registry = Self::default();
        for item in items {
            let item = Rc::new(item);
            match registry.by_assignment.entry(item.assigned.clone()) {
                Entry::Occupied(_) => {
                    debug!(assigned = %item.assigned, "duplicate assignment; first item wins");
                }
                Entry::Vacant(slot) => {
                    slot.insert(Rc::clone(&item));
                }
            }
            registry.order.push(item);
        }
        registry
    }

    /// The item whose assignment equals `key`.
    #[must_use]
    pub fn get(&self, key: &ItemId) -> Option<&Rc<DraggableItem>> {
        self.by_assignment.get(key)
    }

    /// Whether any item is assigned to `key`.
    #[must_use]
    pub fn contains(&self, key: &ItemId) -> bool {
        self.by_assignment.contains_key(key)
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no items are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Items in render order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<DraggableItem>> {
        self.order.iter()
    }
}
