//! Semantic events delivered to gadget listeners.

use super::GadgetId;
use crate::input::{KeyCode, KeyModifiers};
use crate::layout::Point;

/// What happened to a gadget, with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Pointer pressed on the gadget.
    Click {
        /// Absolute pointer position.
        point: Point,
    },
    /// Second click within the double-click window.
    DoubleClick {
        /// Absolute pointer position.
        point: Point,
    },
    /// Pointer released inside the clicked gadget.
    Release {
        /// Absolute pointer position.
        point: Point,
    },
    /// Pointer released outside the clicked gadget.
    ReleaseOutside {
        /// Absolute pointer position.
        point: Point,
    },
    /// Pointer moved while the gadget was clicked.
    Drag {
        /// Absolute pointer position.
        point: Point,
        /// Horizontal movement since the previous position.
        vx: i32,
        /// Vertical movement since the previous position.
        vy: i32,
    },
    /// The gadget was activated (click released inside, or keyboard).
    Action,
    /// The gadget's value changed.
    ValueChange,
    /// The gadget is about to be closed.
    Close,
    /// The gadget gained focus.
    Focus,
    /// The gadget lost focus.
    Blur,
    /// A key was pressed while the gadget had focus.
    KeyPress {
        /// The key.
        code: KeyCode,
        /// Modifiers held.
        modifiers: KeyModifiers,
    },
    /// A key was released while the gadget had focus.
    KeyRelease {
        /// The key.
        code: KeyCode,
        /// Modifiers held.
        modifiers: KeyModifiers,
    },
    /// An entry of a context menu was chosen.
    ContextMenuSelection {
        /// Value attached to the entry.
        value: u32,
    },
    /// The gadget moved.
    Move,
    /// The gadget changed size.
    Resize,
    /// The gadget became visible.
    Show,
    /// The gadget was hidden.
    Hide,
    /// The gadget was enabled.
    Enable,
    /// The gadget was disabled.
    Disable,
}

/// An event raised by a gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// The gadget that raised the event.
    pub source: GadgetId,
    /// What happened.
    pub kind: EventKind,
}

impl Event {
    /// Create a new event.
    pub const fn new(source: GadgetId, kind: EventKind) -> Self {
        Self { source, kind }
    }
}
