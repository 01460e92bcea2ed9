//! Configuration for a [`super::Gui`].

use std::time::Duration;

use crate::gadget::Style;

/// Configuration for the application root.
#[derive(Debug, Clone)]
pub struct GuiConfig {
    /// Screen width; the root gadget covers the whole screen.
    pub screen_width: i32,
    /// Screen height.
    pub screen_height: i32,
    /// Maximum gap between two clicks that still counts as a double-click.
    pub double_click_time: Duration,
    /// Capacity of the platform input queue.
    pub input_queue_capacity: usize,
    /// Palette for gadgets inserted without their own style.
    pub style: Style,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            screen_width: 80,
            screen_height: 24,
            double_click_time: Duration::from_millis(400),
            input_queue_capacity: 64,
            style: Style::default(),
        }
    }
}

impl GuiConfig {
    /// Default configuration for a screen of the given size.
    pub fn with_screen(width: i32, height: i32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }
}
