#![forbid(unsafe_code)]

//! Element references and box metrics.
//!
//! A binding needs the rendered element's offset box to center the dragged
//! element under the pointer. The host attaches something that can report
//! that box (a [`LayoutBox`]) to the binding's [`ElementRef`] after layout.
//! Metrics are read on every call, never cached, so a box that moves between
//! frames is always current.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use dnd_core::geometry::ElementBox;
use dnd_core::instance::{InstanceGetter, InstanceSetter, instance_var};

/// Anything that can report its current offset box.
pub trait LayoutBox {
    fn layout_box(&self) -> ElementBox;
}

impl LayoutBox for ElementBox {
    fn layout_box(&self) -> ElementBox {
        *self
    }
}

/// A box the host updates in place after each layout pass.
impl LayoutBox for Cell<ElementBox> {
    fn layout_box(&self) -> ElementBox {
        self.get()
    }
}

type Slot = Option<Rc<dyn LayoutBox>>;

/// Attachable reference to a rendered element.
///
/// Clones share the same slot.
#[derive(Clone)]
pub struct ElementRef {
    get: InstanceGetter<Slot>,
    set: InstanceSetter<Slot>,
}

impl Default for ElementRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("metrics", &self.metrics())
            .finish()
    }
}

impl ElementRef {
    /// An empty reference.
    #[must_use]
    pub fn new() -> Self {
        let (get, set) = instance_var(None);
        Self { get, set }
    }

    /// Attach the rendered element.
    pub fn attach(&self, element: Rc<dyn LayoutBox>) {
        self.set.set(Some(element));
    }

    /// Detach on unmount.
    pub fn detach(&self) {
        self.set.set(None);
    }

    /// Whether an element is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.get.with(Option::is_some)
    }

    /// Current box of the attached element.
    #[must_use]
    pub fn metrics(&self) -> Option<ElementBox> {
        self.get.get().map(|el| el.layout_box())
    }
}
