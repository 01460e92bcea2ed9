//! Button: A push button with a text label, and its one-glyph variant.
//!
//! Buttons raise `Action` through the core's normal release handling; the
//! keyboard path (Enter or Space while focused) reports `Activated`.

use super::label::{aligned_x, Align};
use crate::gadget::{Behavior, Gadget, GadgetFlags, GadgetId, GadgetView, Response};
use crate::gfx::{Bevel, Graphics};
use crate::gui::Gui;
use crate::input::{KeyCode, KeyModifiers};
use crate::layout::{Point, Rect};

/// A push button.
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
}

impl Button {
    /// Create a button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Add a button to `parent`.
    pub fn spawn(
        gui: &mut Gui,
        parent: GadgetId,
        rect: Rect,
        label: impl Into<String>,
    ) -> Option<GadgetId> {
        gui.spawn(parent, Gadget::new(rect, Self::new(label)))
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

impl Behavior for Button {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        let style = view.style;
        let back = if view.is_clicked() { style.highlight } else { style.back };
        gfx.fill_rect(view.rect, back);
        if view.rect.height >= 3 {
            let bevel = if view.is_clicked() { Bevel::Sunken } else { Bevel::Raised };
            gfx.draw_bevel(view.rect, bevel, style.shine, style.shadow);
        }

        let text = if view.is_focused() {
            format!("[{}]", self.label)
        } else {
            self.label.clone()
        };
        let x = aligned_x(Align::Center, view.rect.width, Graphics::text_width(&text));
        gfx.draw_text(Point::new(x, view.rect.height / 2), &text, view.text_color(), back);
    }

    fn on_key_press(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> Response {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => Response::Activated,
            _ => Response::Ignored,
        }
    }
}

/// A one-glyph button used as window chrome (close box and the like).
///
/// Never takes focus.
#[derive(Debug, Clone, Copy)]
pub struct GlyphButton {
    glyph: char,
}

impl GlyphButton {
    /// Create a glyph button.
    pub const fn new(glyph: char) -> Self {
        Self { glyph }
    }

    /// Add a glyph button to `parent` as a decoration.
    pub fn spawn_decoration(
        gui: &mut Gui,
        parent: GadgetId,
        rect: Rect,
        glyph: char,
    ) -> Option<GadgetId> {
        let gadget = Gadget::new(rect, Self::new(glyph))
            .decoration()
            .without_flags(GadgetFlags::CAN_FOCUS);
        gui.spawn(parent, gadget)
    }

    /// The glyph.
    pub const fn glyph(&self) -> char {
        self.glyph
    }
}

impl Behavior for GlyphButton {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        let back = if view.is_clicked() {
            view.style.highlight
        } else {
            view.style.shadow
        };
        gfx.fill_rect(view.rect, back);
        let mut buf = [0; 4];
        let glyph = self.glyph.encode_utf8(&mut buf);
        let x = aligned_x(Align::Center, view.rect.width, Graphics::text_width(glyph));
        gfx.draw_text(Point::new(x, view.rect.height / 2), glyph, view.text_color(), back);
    }

    fn accepts_focus(&self) -> bool {
        false
    }
}
