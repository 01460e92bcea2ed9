//! Text Box: Single-line editable text with a cursor.
//!
//! Edits report `ValueChanged` so the core raises `ValueChange`; cursor
//! movement only asks for a redraw. Enter activates.

use crate::gadget::{Behavior, Gadget, GadgetId, GadgetView, Response};
use crate::gfx::Graphics;
use crate::gui::Gui;
use crate::input::{KeyCode, KeyModifiers};
use crate::layout::{Point, Rect};

/// Configuration for a text box.
#[derive(Debug, Clone, Default)]
pub struct TextBoxConfig {
    /// Placeholder text shown when empty.
    pub placeholder: String,
    /// Maximum number of characters; `None` means unlimited.
    pub max_chars: Option<usize>,
}

/// A single-line text field.
#[derive(Debug, Clone, Default)]
pub struct TextBox {
    /// Current text content.
    content: String,
    /// Cursor position as a byte offset on a char boundary.
    cursor: usize,
    config: TextBoxConfig,
}

impl TextBox {
    /// Create an empty text box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty text box with custom configuration.
    pub const fn with_config(config: TextBoxConfig) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            config,
        }
    }

    /// Add a text box to `parent`.
    pub fn spawn(gui: &mut Gui, parent: GadgetId, rect: Rect, config: TextBoxConfig) -> Option<GadgetId> {
        gui.spawn(parent, Gadget::new(rect, Self::with_config(config)))
    }

    /// Get the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the content, moving the cursor to the end.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = self.content.len();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Check if the text box is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }

    fn insert_char(&mut self, c: char) -> bool {
        if self
            .config
            .max_chars
            .is_some_and(|max| self.content.chars().count() >= max)
        {
            return false;
        }
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i)
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.content.remove(prev);
        self.cursor = prev;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        self.content.remove(self.cursor);
        true
    }

    fn cursor_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = self.prev_boundary();
        true
    }

    fn cursor_right(&mut self) -> bool {
        match self.content[self.cursor..].chars().next() {
            Some(c) => {
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    fn cursor_to(&mut self, position: usize) -> bool {
        let moved = self.cursor != position;
        self.cursor = position;
        moved
    }
}

const fn edited(changed: bool) -> Response {
    if changed {
        Response::ValueChanged
    } else {
        Response::Ignored
    }
}

const fn moved(changed: bool) -> Response {
    if changed {
        Response::Redraw
    } else {
        Response::Ignored
    }
}

impl Behavior for TextBox {
    fn draw(&self, gfx: &mut Graphics<'_>, view: &GadgetView<'_>) {
        let style = view.style;
        let bg = style.shadow;
        gfx.fill_rect(view.rect, bg);
        let y = view.rect.height / 2;
        let width = usize::try_from(view.rect.width).unwrap_or(0);

        if self.content.is_empty() && !view.is_focused() {
            gfx.draw_text(Point::new(0, y), &self.config.placeholder, style.disabled_text, bg);
            return;
        }

        // keep the cursor cell visible
        let cursor = self.cursor();
        let scroll = (cursor + 1).saturating_sub(width);
        let visible: String = self.content.chars().skip(scroll).take(width).collect();
        gfx.draw_text(Point::new(0, y), &visible, view.text_color(), bg);

        if view.is_focused() {
            let x = i32::try_from(cursor - scroll).unwrap_or(0);
            let under = self.content.chars().nth(cursor).unwrap_or(' ');
            let mut buf = [0; 4];
            gfx.draw_text(Point::new(x, y), under.encode_utf8(&mut buf), bg, style.highlight);
        }
    }

    fn on_key_press(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Response {
        match code {
            KeyCode::Char(c) if !modifiers.control && !modifiers.alt => edited(self.insert_char(c)),
            KeyCode::Backspace => edited(self.backspace()),
            KeyCode::Delete => edited(self.delete()),
            KeyCode::Left => moved(self.cursor_left()),
            KeyCode::Right => moved(self.cursor_right()),
            KeyCode::Home => moved(self.cursor_to(0)),
            KeyCode::End => moved(self.cursor_to(self.content.len())),
            KeyCode::Enter => Response::Activated,
            _ => Response::Ignored,
        }
    }
}
