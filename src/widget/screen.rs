//! Screen: A full-screen backdrop that top-level windows live on.

use crate::buffer::Rgb;
use crate::gadget::{Behavior, Gadget, GadgetFlags, GadgetId, GadgetView};
use crate::gfx::Graphics;
use crate::gui::Gui;
use crate::layout::{Point, Rect};

/// Configuration for a screen backdrop.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Backdrop colour.
    pub back: Rgb,
    /// Optional caption drawn in the top-left corner.
    pub caption: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            back: Rgb::new(0, 64, 96),
            caption: String::new(),
        }
    }
}

/// A backdrop covering the whole application area.
#[derive(Debug, Default)]
pub struct Screen {
    config: ScreenConfig,
}

impl Screen {
    /// Create a screen behaviour.
    pub const fn new(config: ScreenConfig) -> Self {
        Self { config }
    }

    /// Add a screen covering the whole application area to the root.
    pub fn spawn(gui: &mut Gui, config: ScreenConfig) -> Option<GadgetId> {
        let area = gui.screen();
        let gadget = Gadget::new(Rect::from_size(area.width, area.height), Self::new(config))
            .with_flags(GadgetFlags::BORDERLESS)
            .without_flags(GadgetFlags::CAN_FOCUS);
        gui.spawn(gui.root(), gadget)
    }

    /// The caption.
    pub fn caption(&self) -> &str {
        &self.config.caption
    }

    /// Replace the caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.config.caption = caption.into();
    }
}

impl Behavior for Screen {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        gfx.fill_rect(view.rect, self.config.back);
        if !self.config.caption.is_empty() {
            gfx.draw_text(Point::new(1, 0), &self.config.caption, view.style.text, self.config.back);
        }
    }

    fn accepts_focus(&self) -> bool {
        false
    }
}
