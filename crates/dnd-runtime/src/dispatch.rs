#![forbid(unsafe_code)]

//! Dispatch records returned by every coordinator and binding handler.
//!
//! Nothing in drag coordination fails. Inputs that do not apply (a second
//! pointer-down mid-drag, a drop with no session, a release over an occupied
//! target) are reported as [`DragOutcome::Ignored`] with a deterministic
//! [`DragIgnoredReason`] instead of an error.

use dnd_core::geometry::Point;
use dnd_core::key::{ItemId, TargetId};

/// Lifecycle phase a dispatch was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Pointer-down on a draggable item.
    PointerDown,
    /// Pointer-move over the drag surface.
    PointerMove,
    /// Pointer-up over the drag surface.
    PointerUp,
    /// Pointer-up over a drop target.
    Drop,
    /// Host-level interruption (blur, visibility loss, explicit stop).
    Interrupt,
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragIgnoredReason {
    /// Pointer-down with a button other than the activation button.
    ButtonNotAllowed,
    /// Pointer-down while another drag session is active.
    SessionAlreadyActive,
    /// Move or drop with no drag session.
    NoActiveSession,
    /// Drop with no registered item at the active assignment.
    NoItemForAssignment,
    /// Release over a target that already renders an item.
    TargetOccupied,
    /// Release over a disabled target.
    TargetDisabled,
    /// The coordinator behind a context has been dropped.
    CoordinatorGone,
}

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// A drag session began for `item`.
    Started { item: ItemId, position: Point },
    /// The pointer cell was updated.
    Moved { position: Point },
    /// The session (if any) was torn down. `item` is the key that was active.
    Stopped { item: Option<ItemId> },
    /// `item`'s drop callback ran with `target`; the session then stopped.
    Dropped { item: ItemId, target: TargetId },
    /// The input did not apply.
    Ignored(DragIgnoredReason),
}

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DragDispatch {
    pub phase: DragPhase,
    pub outcome: DragOutcome,
    /// Whether the host should suppress the native default action.
    ///
    /// True whenever a coordinator handler ran, including ignored moves and
    /// redundant stops. False when a binding filtered the event before it
    /// reached the coordinator.
    pub prevent_default: bool,
}

impl DragDispatch {
    pub(crate) const fn handled(phase: DragPhase, outcome: DragOutcome) -> Self {
        Self {
            phase,
            outcome,
            prevent_default: true,
        }
    }

    pub(crate) const fn ignored(phase: DragPhase, reason: DragIgnoredReason) -> Self {
        Self::handled(phase, DragOutcome::Ignored(reason))
    }

    /// An input a binding filtered out before it reached the coordinator.
    #[must_use]
    pub const fn filtered(phase: DragPhase, reason: DragIgnoredReason) -> Self {
        Self {
            phase,
            outcome: DragOutcome::Ignored(reason),
            prevent_default: false,
        }
    }

    /// Whether the input was ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, DragOutcome::Ignored(_))
    }

    /// The ignore reason, if the input was ignored.
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<DragIgnoredReason> {
        match self.outcome {
            DragOutcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }
}
