//! Input types fed to the core by the platform layer.
//!
//! The core never polls hardware. A platform adapter (see
//! [`crate::backend`]) or a test builds these and hands them to
//! [`crate::Gui::handle_input`] or the input queue.

use std::time::Instant;

use crate::layout::Point;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// A discrete platform input event with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        /// Absolute position.
        point: Point,
        /// When the press happened.
        timestamp: Instant,
    },
    /// Pointer moved.
    PointerMove {
        /// Absolute position.
        point: Point,
        /// When the move happened.
        timestamp: Instant,
    },
    /// Pointer released.
    PointerUp {
        /// Absolute position.
        point: Point,
        /// When the release happened.
        timestamp: Instant,
    },
    /// A key was pressed.
    KeyDown {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
        /// When the press happened.
        timestamp: Instant,
    },
    /// A key was released.
    KeyUp {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during release.
        modifiers: KeyModifiers,
        /// When the release happened.
        timestamp: Instant,
    },
}

impl InputEvent {
    /// Pointer-down at (x, y), stamped now.
    pub fn pointer_down(x: i32, y: i32) -> Self {
        Self::PointerDown {
            point: Point::new(x, y),
            timestamp: Instant::now(),
        }
    }

    /// Pointer-move to (x, y), stamped now.
    pub fn pointer_move(x: i32, y: i32) -> Self {
        Self::PointerMove {
            point: Point::new(x, y),
            timestamp: Instant::now(),
        }
    }

    /// Pointer-up at (x, y), stamped now.
    pub fn pointer_up(x: i32, y: i32) -> Self {
        Self::PointerUp {
            point: Point::new(x, y),
            timestamp: Instant::now(),
        }
    }

    /// Key-down without modifiers, stamped now.
    pub fn key_down(code: KeyCode) -> Self {
        Self::KeyDown {
            code,
            modifiers: KeyModifiers::NONE,
            timestamp: Instant::now(),
        }
    }

    /// Key-up without modifiers, stamped now.
    pub fn key_up(code: KeyCode) -> Self {
        Self::KeyUp {
            code,
            modifiers: KeyModifiers::NONE,
            timestamp: Instant::now(),
        }
    }

    /// When the event happened.
    pub const fn timestamp(&self) -> Instant {
        match self {
            Self::PointerDown { timestamp, .. }
            | Self::PointerMove { timestamp, .. }
            | Self::PointerUp { timestamp, .. }
            | Self::KeyDown { timestamp, .. }
            | Self::KeyUp { timestamp, .. } => *timestamp,
        }
    }
}
