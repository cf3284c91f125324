#![forbid(unsafe_code)]

//! Assignment map: which item key sits on which target slot.
//!
//! The host owns the map and re-registers its items whenever it changes.
//! A drop callback typically calls `set_value(item_slot, target)`, which
//! merges one entry into a fresh map value and notifies subscribers.
//! Uniqueness of assigned keys across slots is not enforced.

use std::collections::BTreeMap;

use dnd_core::key::DragKey;

use crate::reactive::{Broadcast, Subscription};

/// Slot key to assigned key.
pub type Assignments = BTreeMap<DragKey, DragKey>;

/// Shared, observable assignment map.
#[derive(Clone, Debug)]
pub struct AssignmentMap {
    map: Broadcast<Assignments>,
}

impl Default for AssignmentMap {
    fn default() -> Self {
        Self::new(Assignments::new())
    }
}

impl AssignmentMap {
    /// Start from a caller-supplied map.
    #[must_use]
    pub fn new(initial: Assignments) -> Self {
        Self {
            map: Broadcast::new(initial),
        }
    }

    /// Build from `(slot, assigned)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<DragKey>,
        V: Into<DragKey>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Key assigned to `slot`.
    #[must_use]
    pub fn get(&self, slot: &DragKey) -> Option<DragKey> {
        self.map.with(|map| map.get(slot).cloned())
    }

    /// Copy of the whole map.
    #[must_use]
    pub fn snapshot(&self) -> Assignments {
        self.map.get()
    }

    /// Assign `value` to `slot`. Returns whether the map changed.
    pub fn set_value(&self, slot: impl Into<DragKey>, value: impl Into<DragKey>) -> bool {
        let (slot, value) = (slot.into(), value.into());
        self.map.update(|map| {
            map.insert(slot, value);
        })
    }

    /// A setter curried over `slot`, suitable as a drop callback.
    pub fn setter(&self, slot: impl Into<DragKey>) -> impl Fn(DragKey) + 'static {
        let slot = slot.into();
        let map = self.clone();
        move |value| {
            map.set_value(slot.clone(), value);
        }
    }

    /// Subscribe to map changes.
    pub fn subscribe(&self, callback: impl Fn(&Assignments) + 'static) -> Subscription {
        self.map.subscribe(callback)
    }

    /// Bumped on every change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.map.version()
    }
}
