//! Presenter: Writes the damaged parts of a [`Buffer`] to a terminal.
//!
//! Commands are queued into a reusable byte buffer and flushed with a single
//! write, so a frame never reaches the terminal half-drawn.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::buffer::{Buffer, Cell, Modifiers, Rgb};
use crate::layout::Rect;

/// Pre-allocated command buffer for presenting frames.
pub struct Presenter {
    data: Vec<u8>,
}

/// Colours and attributes currently set on the terminal.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl Presenter {
    /// Create a presenter with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a presenter sized for a typical terminal (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Bytes produced by the last [`Presenter::present`].
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the cells of `buffer` inside `rects` to `writer`.
    ///
    /// Rectangles are clipped to the buffer; wide-glyph continuation cells
    /// are skipped.
    pub fn present<W: Write>(
        &mut self,
        buffer: &Buffer,
        rects: &[Rect],
        writer: &mut W,
    ) -> io::Result<()> {
        self.data.clear();
        let area = buffer.area();
        let mut pen: Option<Pen> = None;

        for rect in rects {
            let rect = rect.intersection(&area);
            for y in rect.y..rect.bottom() {
                queue!(self.data, MoveTo(to_u16(rect.x), to_u16(y)))?;
                for x in rect.x..rect.right() {
                    let Some(cell) = buffer.get(x, y) else {
                        continue;
                    };
                    if cell.is_wide_continuation() {
                        continue;
                    }
                    pen = Some(self.apply_pen(pen, cell)?);
                    queue!(self.data, Print(cell.symbol()))?;
                }
            }
        }

        if pen.is_some() {
            queue!(self.data, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        writer.write_all(&self.data)?;
        writer.flush()
    }

    /// Full redraw of the whole buffer.
    pub fn present_all<W: Write>(&mut self, buffer: &Buffer, writer: &mut W) -> io::Result<()> {
        self.present(buffer, &[buffer.area()], writer)
    }

    fn apply_pen(&mut self, current: Option<Pen>, cell: &Cell) -> io::Result<Pen> {
        let wanted = Pen {
            fg: cell.fg(),
            bg: cell.bg(),
            modifiers: cell.modifiers(),
        };
        if current == Some(wanted) {
            return Ok(wanted);
        }
        if current.is_none_or(|pen| pen.modifiers != wanted.modifiers) {
            queue!(self.data, SetAttribute(Attribute::Reset))?;
            for (flag, attribute) in [
                (Modifiers::BOLD, Attribute::Bold),
                (Modifiers::DIM, Attribute::Dim),
                (Modifiers::ITALIC, Attribute::Italic),
                (Modifiers::UNDERLINE, Attribute::Underlined),
                (Modifiers::REVERSED, Attribute::Reverse),
            ] {
                if wanted.modifiers.contains(flag) {
                    queue!(self.data, SetAttribute(attribute))?;
                }
            }
            // attribute reset also drops colours
            queue!(
                self.data,
                SetForegroundColor(color(wanted.fg)),
                SetBackgroundColor(color(wanted.bg))
            )?;
            return Ok(wanted);
        }
        if current.is_none_or(|pen| pen.fg != wanted.fg) {
            queue!(self.data, SetForegroundColor(color(wanted.fg)))?;
        }
        if current.is_none_or(|pen| pen.bg != wanted.bg) {
            queue!(self.data, SetBackgroundColor(color(wanted.bg)))?;
        }
        Ok(wanted)
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

const fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn to_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}
