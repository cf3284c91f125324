#![forbid(unsafe_code)]

//! Instance-variable cell: a single mutable slot that survives re-renders.
//!
//! # Design
//!
//! [`instance_var`] allocates one slot and hands back a getter and a setter.
//! Both are cheap `Rc` handles onto the same slot, so clones made on later
//! render passes are interchangeable with the originals and compare equal
//! (`PartialEq` is slot identity, not value equality). Putting them in a
//! dependency list never looks like a change.
//!
//! Writing through the setter notifies nobody. That is the whole point: the
//! cell holds bookkeeping (an in-flight frame handle, the latest pointer
//! position) that must not itself cause a re-render.
//!
//! # Failure Modes
//!
//! - **Re-entrant access**: calling `set` from inside a `with` closure on the
//!   same slot panics (RefCell borrow rules). `get`/`set` never hold a borrow
//!   past their return.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Create an instance-variable cell holding `initial`.
#[must_use]
pub fn instance_var<T: 'static>(initial: T) -> (InstanceGetter<T>, InstanceSetter<T>) {
    let slot = Rc::new(RefCell::new(initial));
    (
        InstanceGetter {
            slot: Rc::clone(&slot),
        },
        InstanceSetter { slot },
    )
}

/// Read accessor for an instance-variable cell.
pub struct InstanceGetter<T> {
    slot: Rc<RefCell<T>>,
}

/// Write accessor for an instance-variable cell.
pub struct InstanceSetter<T> {
    slot: Rc<RefCell<T>>,
}

impl<T: Clone> InstanceGetter<T> {
    /// Latest value written to the slot.
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().clone()
    }
}

impl<T> InstanceGetter<T> {
    /// Access the value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow())
    }

    /// Whether `other` reads the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &InstanceSetter<T>) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T> InstanceSetter<T> {
    /// Overwrite the slot. Does not notify anyone.
    pub fn set(&self, value: T) {
        *self.slot.borrow_mut() = value;
    }

    /// Overwrite the slot, returning the previous value.
    pub fn replace(&self, value: T) -> T {
        self.slot.replace(value)
    }
}

impl<T: Default> InstanceSetter<T> {
    /// Take the value out, leaving `T::default()` behind.
    pub fn take(&self) -> T {
        self.slot.take()
    }
}

impl<T> Clone for InstanceGetter<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> Clone for InstanceSetter<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> PartialEq for InstanceGetter<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T> Eq for InstanceGetter<T> {}

impl<T> PartialEq for InstanceSetter<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T> Eq for InstanceSetter<T> {}

impl<T: fmt::Debug> fmt::Debug for InstanceGetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceGetter")
            .field("value", &*self.slot.borrow())
            .finish()
    }
}

impl<T> fmt::Debug for InstanceSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceSetter").finish_non_exhaustive()
    }
}
