//! Window: A bordered, draggable container with a title bar and close box.
//!
//! The title bar is drawn in the top border. The close box is a
//! [`GlyphButton`] decoration child whose `Action` closes the window, so the
//! chrome is built from ordinary gadgets rather than special cases.

use super::button::GlyphButton;
use crate::gadget::{Behavior, Border, EventKind, Gadget, GadgetId, GadgetView};
use crate::gfx::{Bevel, Graphics};
use crate::gui::Gui;
use crate::layout::{Point, Rect};

/// Configuration for a window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Title shown in the top border.
    pub title: String,
    /// Whether the window follows pointer drags.
    pub draggable: bool,
    /// Whether the window gets a close box.
    pub closable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            draggable: true,
            closable: true,
        }
    }
}

impl WindowConfig {
    /// Default configuration with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Window chrome.
#[derive(Debug, Clone)]
pub struct Window {
    title: String,
}

/// Width of the close box.
const CLOSE_WIDTH: i32 = 3;

impl Window {
    /// Create a window behaviour.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Add a window to `parent`, with its close box when configured.
    ///
    /// Returns the window's id.
    pub fn spawn(gui: &mut Gui, parent: GadgetId, rect: Rect, config: WindowConfig) -> Option<GadgetId> {
        let mut gadget = Gadget::new(rect, Self::new(config.title)).with_border(Border::uniform(1));
        if config.draggable {
            gadget = gadget.draggable();
        }
        let window = gui.spawn(parent, gadget)?;

        if config.closable {
            let close = GlyphButton::spawn_decoration(gui, window, close_box(rect.width), 'x')?;
            gui.add_listener(close, move |gui, event| {
                if event.kind == EventKind::Action {
                    gui.close(window);
                }
            });
            gui.add_listener(window, move |gui, event| {
                if event.kind == EventKind::Resize {
                    if let Some(rect) = gui.rect(event.source) {
                        gui.change_dimensions(close, close_box(rect.width));
                    }
                }
            });
        }
        Some(window)
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

/// Close box position for a window `width` columns wide.
const fn close_box(width: i32) -> Rect {
    Rect::new(width - CLOSE_WIDTH - 1, 0, CLOSE_WIDTH, 1)
}

impl Behavior for Window {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        let style = view.style;
        gfx.fill_rect(view.rect, style.back);
        gfx.draw_bevel(view.rect, Bevel::Raised, style.shine, style.shadow);

        let bar = Rect::new(0, 0, view.rect.width, 1);
        gfx.fill_rect(bar, style.highlight);
        gfx.draw_text(Point::new(1, 0), &self.title, style.text, style.highlight);
    }

    fn accepts_focus(&self) -> bool {
        false
    }

    fn raises_on_click(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::gui::GuiConfig;
    use crate::input::InputEvent;
    use crate::widget::Button;

    fn gui() -> Gui {
        Gui::new(GuiConfig::with_screen(60, 20))
    }

    #[test]
    fn test_close_box_closes_window() {
        let mut gui = gui();
        let root = gui.root();
        let window = Window::spawn(&mut gui, root, Rect::new(5, 5, 20, 8), WindowConfig::titled("Notes")).unwrap();
        let close = gui.children(window)[0];
        assert_eq!(gui.absolute_rect(close), Some(Rect::new(21, 5, 3, 1)));

        gui.handle_input(InputEvent::pointer_down(22, 5));
        gui.handle_input(InputEvent::pointer_up(22, 5));
        assert!(!gui.is_alive(window));
        assert!(!gui.is_alive(close));
    }

    #[test]
    fn test_window_drag_and_raise() {
        let mut gui = gui();
        let root = gui.root();
        let back = Window::spawn(&mut gui, root, Rect::new(0, 0, 20, 8), WindowConfig::titled("A")).unwrap();
        let front = Window::spawn(&mut gui, root, Rect::new(10, 4, 20, 8), WindowConfig::titled("B")).unwrap();

        gui.handle_input(InputEvent::pointer_down(2, 0));
        assert_eq!(gui.children(root), &[front, back]);
        gui.handle_input(InputEvent::pointer_move(7, 3));
        gui.handle_input(InputEvent::pointer_up(7, 3));
        assert_eq!(gui.rect(back), Some(Rect::new(5, 3, 20, 8)));
    }

    #[test]
    fn test_content_stays_in_client_area() {
        let mut gui = gui();
        let root = gui.root();
        let window = Window::spawn(&mut gui, root, Rect::new(0, 0, 20, 8), WindowConfig::default()).unwrap();
        let ok = Button::spawn(&mut gui, window, Rect::new(1, 1, 6, 1), "OK").unwrap();
        assert_eq!(gui.children(window).last(), Some(&ok));
        assert_eq!(gui.client_rect(window), Some(Rect::new(1, 1, 18, 6)));
    }

    #[test]
    fn test_resize_moves_close_box() {
        let mut gui = gui();
        let root = gui.root();
        let window = Window::spawn(&mut gui, root, Rect::new(0, 0, 20, 8), WindowConfig::default()).unwrap();
        let close = gui.children(window)[0];
        gui.resize(window, 30, 8);
        assert_eq!(gui.rect(close), Some(Rect::new(26, 0, 3, 1)));
    }

    #[test]
    fn test_title_drawn_in_bar() {
        let mut gui = gui();
        let root = gui.root();
        Window::spawn(&mut gui, root, Rect::new(0, 0, 20, 8), WindowConfig::titled("Notes")).unwrap();
        let mut buffer = Buffer::new(60, 20);
        gui.render(&mut buffer);
        assert!(buffer.row_text(0).starts_with(" Notes"));
        assert_eq!(buffer.get(8, 0).unwrap().bg(), gui.config().style.highlight);
    }
}
