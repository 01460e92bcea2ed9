//! Behavior: The capability interface every gadget kind implements.
//!
//! A gadget's tree state (geometry, flags, children) lives in the core. What
//! makes a button a button lives in its `Behavior`: how it draws, whether it
//! takes focus, how it reacts to keys. Shared chrome is built by composition
//! (decoration children), not by layering behaviours.

use std::any::Any;

use super::{GadgetFlags, Style};
use crate::gfx::Graphics;
use crate::input::{KeyCode, KeyModifiers};
use crate::layout::Rect;

/// What the core should do after a behaviour handled a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// Appearance changed; redraw.
    Redraw,
    /// The value changed; redraw and raise `ValueChange`.
    ValueChanged,
    /// The gadget was activated; raise `Action`.
    Activated,
}

/// Read-only gadget state passed to [`Behavior::draw`].
#[derive(Debug, Clone, Copy)]
pub struct GadgetView<'a> {
    /// Full gadget rect in local coordinates (origin 0,0).
    pub rect: Rect,
    /// Client rect in local coordinates.
    pub client: Rect,
    /// Current flags.
    pub flags: GadgetFlags,
    /// Palette.
    pub style: &'a Style,
}

impl GadgetView<'_> {
    /// Check if the gadget is pressed.
    pub const fn is_clicked(&self) -> bool {
        self.flags.contains(GadgetFlags::CLICKED)
    }

    /// Check if the gadget has focus.
    pub const fn is_focused(&self) -> bool {
        self.flags.contains(GadgetFlags::FOCUSED)
    }

    /// Check if the gadget is enabled.
    pub const fn is_enabled(&self) -> bool {
        self.flags.contains(GadgetFlags::ENABLED)
    }

    /// Text colour honouring the enabled state.
    pub const fn text_color(&self) -> crate::buffer::Rgb {
        if self.is_enabled() {
            self.style.text
        } else {
            self.style.disabled_text
        }
    }
}

/// Polymorphic gadget behaviour.
///
/// Only [`Behavior::draw`] is required. `draw` is called once per visible
/// clip rectangle; the [`Graphics`] it receives confines every write to that
/// rectangle.
pub trait Behavior: Any {
    /// Paint the gadget.
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>);

    /// Whether the gadget is willing to take focus.
    fn accepts_focus(&self) -> bool {
        true
    }

    /// Whether a click anywhere in the gadget raises it to the top.
    fn raises_on_click(&self) -> bool {
        false
    }

    /// React to a key press while focused.
    fn on_key_press(&mut self, _code: KeyCode, _modifiers: KeyModifiers) -> Response {
        Response::Ignored
    }
}

/// A plain gadget: fills its bounds with the background colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Behavior for Plain {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        gfx.fill_rect(view.rect, view.style.back);
    }
}
