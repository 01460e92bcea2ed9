//! Label: Static, non-focusable text.

use crate::buffer::Rgb;
use crate::gadget::{Behavior, Gadget, GadgetId, GadgetView};
use crate::gfx::Graphics;
use crate::gui::Gui;
use crate::layout::{Point, Rect};

/// Horizontal placement of a label's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centred.
    Center,
    /// Flush right.
    Right,
}

/// A single line of text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    align: Align,
    fg: Option<Rgb>,
}

impl Label {
    /// Create a left-aligned label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder: set the alignment.
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Builder: override the text colour.
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Add a label to `parent`.
    pub fn spawn(gui: &mut Gui, parent: GadgetId, rect: Rect, label: Self) -> Option<GadgetId> {
        gui.spawn(parent, Gadget::new(rect, label))
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Column at which text of `width` starts inside `avail` columns.
pub(crate) const fn aligned_x(align: Align, avail: i32, width: i32) -> i32 {
    let x = match align {
        Align::Left => 0,
        Align::Center => (avail - width) / 2,
        Align::Right => avail - width,
    };
    if x < 0 {
        0
    } else {
        x
    }
}

impl Behavior for Label {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        gfx.fill_rect(view.rect, view.style.back);
        let fg = self.fg.unwrap_or_else(|| view.text_color());
        let x = aligned_x(self.align, view.rect.width, Graphics::text_width(&self.text));
        gfx.draw_text(Point::new(x, view.rect.height / 2), &self.text, fg, view.style.back);
    }

    fn accepts_focus(&self) -> bool {
        false
    }
}
