#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The coordinator and the bindings only ever see these types. Hosts convert
//! their native mouse/pointer events once at the boundary.
//!
//! # Design Notes
//!
//! - Coordinates are client-space pixels as `f64` (fractional on HiDPI hosts).
//! - Button numbering follows the DOM `MouseEvent.button` convention when
//!   converting from an index (0 = left, 1 = middle, 2 = right).
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Point;

/// A pointer event delivered to the drag surface, an item, or a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Client-space X coordinate.
    pub x: f64,

    /// Client-space Y coordinate.
    pub y: f64,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pointer-down with `button` at `(x, y)`.
    #[must_use]
    pub const fn down(button: PointerButton, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(button), x, y)
    }

    /// Pointer-up with `button` at `(x, y)`.
    #[must_use]
    pub const fn up(button: PointerButton, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(button), x, y)
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a [`Point`].
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The button involved, if this is a down or up event.
    #[must_use]
    pub const fn button(&self) -> Option<PointerButton> {
        match self.kind {
            PointerEventKind::Down(button) | PointerEventKind::Up(button) => Some(button),
            PointerEventKind::Move => None,
        }
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved (with or without a button held).
    Move,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerButton {
    /// Left (primary) button.
    #[default]
    Left,

    /// Middle button (wheel click).
    Middle,

    /// Right (secondary) button.
    Right,

    /// Back, forward, or any other auxiliary button.
    Other(u8),
}

impl PointerButton {
    /// Convert a DOM-style button index.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => Self::Other(other),
        }
    }

    /// DOM-style button index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Other(other) => other,
        }
    }
}

bitflags! {
    /// Modifier keys that can be held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
