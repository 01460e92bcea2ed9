//! Gadget state flags.

use bitflags::bitflags;

bitflags! {
    /// Per-gadget state bits.
    ///
    /// A new gadget starts as `ENABLED | CAN_FOCUS`.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct GadgetFlags: u16 {
        /// Not drawn, not hit-testable, occludes nothing.
        const HIDDEN = 1 << 0;
        /// Accepts clicks and keys.
        const ENABLED = 1 << 1;
        /// Currently holds the application's clicked slot.
        const CLICKED = 1 << 2;
        /// Following the pointer after a click.
        const DRAGGING = 1 << 3;
        /// Currently holds the application's focus slot.
        const FOCUSED = 1 << 4;
        /// Repositions itself while dragged.
        const DRAGGABLE = 1 << 5;
        /// No border insets; the client rect is the whole gadget.
        const BORDERLESS = 1 << 6;
        /// Removed from screen and not yet redrawn.
        const ERASED = 1 << 7;
        /// Part of its parent's chrome (title bar, close glyph).
        const DECORATION = 1 << 8;
        /// May receive focus.
        const CAN_FOCUS = 1 << 9;
        /// On the modal stack.
        const MODAL = 1 << 10;
        /// Raises `DoubleClick` on a second quick click.
        const DOUBLE_CLICKABLE = 1 << 11;
    }
}

impl Default for GadgetFlags {
    fn default() -> Self {
        Self::ENABLED | Self::CAN_FOCUS
    }
}
