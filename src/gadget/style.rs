//! Style: The colour palette handed to a gadget when it draws.

use crate::buffer::Rgb;

/// Colours a gadget draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Background fill.
    pub back: Rgb,
    /// Text and glyphs.
    pub text: Rgb,
    /// Light bevel edge.
    pub shine: Rgb,
    /// Dark bevel edge.
    pub shadow: Rgb,
    /// Focus / pressed accent.
    pub highlight: Rgb,
    /// Text of disabled gadgets.
    pub disabled_text: Rgb,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            back: Rgb::new(40, 44, 52),
            text: Rgb::new(220, 220, 220),
            shine: Rgb::new(120, 126, 140),
            shadow: Rgb::new(16, 16, 20),
            highlight: Rgb::new(0, 160, 200),
            disabled_text: Rgb::new(100, 100, 100),
        }
    }
}

/// Per-side insets separating a gadget's chrome from its client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    /// Left inset.
    pub left: i32,
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl Border {
    /// No insets.
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    /// Create a border from per-side insets.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every side.
    pub const fn uniform(inset: i32) -> Self {
        Self::new(inset, inset, inset, inset)
    }
}
