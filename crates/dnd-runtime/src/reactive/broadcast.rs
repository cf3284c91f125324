#![forbid(unsafe_code)]

//! Broadcast channel: a shared value with change notification.
//!
//! # Design
//!
//! [`Broadcast<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Publishing a value that differs from the current one
//! (by `PartialEq`) bumps the version and notifies live subscribers in
//! registration order. The coordinator owns the `Broadcast`; consumers get a
//! [`BroadcastReader`], which can read and subscribe but never publish.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing publish.
//! 2. Publishing a value equal to the current one is a no-op.
//! 3. Subscribers are notified in registration order.
//! 4. No `RefCell` borrow is held while a subscriber runs, so subscribers may
//!    read the channel or publish to other channels.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: a [`Subscription`] kept forever keeps its callback
//!   alive. Dead entries are pruned lazily on the next notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug_span, trace};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct BroadcastInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
}

/// Writable end of a broadcast channel.
///
/// Cloning creates another handle to the same channel.
pub struct Broadcast<T> {
    inner: Rc<RefCell<BroadcastInner<T>>>,
}

/// Read-only end of a broadcast channel.
pub struct BroadcastReader<T> {
    inner: Rc<RefCell<BroadcastInner<T>>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for BroadcastReader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Broadcast")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for BroadcastReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("BroadcastReader")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Broadcast<T> {
    /// Create a channel holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BroadcastInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// A read-only view onto this channel.
    #[must_use]
    pub fn reader(&self) -> BroadcastReader<T> {
        BroadcastReader {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Publish a new value. Returns `true` if it differed from the current
    /// value and subscribers were notified.
    pub fn publish(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
        }
        notify(&self.inner);
        true
    }

    /// Modify the value in place. Subscribers are notified only if the value
    /// actually changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            notify(&self.inner);
        }
        changed
    }

    /// Subscribe to value changes. See [`BroadcastReader::subscribe`].
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.inner, callback)
    }

    /// Current version number.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone + 'static> BroadcastReader<T> {
    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Subscribe to value changes. The callback receives the new value each
    /// time it changes.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.inner, callback)
    }

    /// Current version number. Useful for dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}

fn subscribe<T: 'static>(
    inner: &Rc<RefCell<BroadcastInner<T>>>,
    callback: impl Fn(&T) + 'static,
) -> Subscription {
    let strong: CallbackRc<T> = Rc::new(callback);
    inner.borrow_mut().subscribers.push(Rc::downgrade(&strong));
    Subscription {
        _guard: Box::new(strong),
    }
}

fn notify<T: Clone + 'static>(inner: &Rc<RefCell<BroadcastInner<T>>>) {
    let (callbacks, value, version) = {
        let mut inner = inner.borrow_mut();
        inner.subscribers.retain(|w| w.strong_count() > 0);
        let callbacks: Vec<CallbackRc<T>> =
            inner.subscribers.iter().filter_map(|w| w.upgrade()).collect();
        (callbacks, inner.value.clone(), inner.version)
    };

    if callbacks.is_empty() {
        return;
    }

    let _span = debug_span!("dnd.broadcast", subscribers = callbacks.len(), version).entered();
    for cb in &callbacks {
        cb(&value);
    }
    trace!(subscribers = callbacks.len(), version, "broadcast delivered");
}

/// RAII guard for a subscriber callback.
///
/// Dropping it makes the callback unreachable; the channel prunes the dead
/// entry on its next notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
