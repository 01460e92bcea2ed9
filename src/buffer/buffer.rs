//! Buffer: The cell grid gadgets paint into.
//!
//! One flat `Vec<Cell>`, row after row. Widgets never touch it directly; they
//! go through [`crate::Graphics`], which clips every write first.

use super::cell::{Cell, Rgb};
use crate::gfx::Surface;
use crate::layout::{Point, Rect};

/// Off-screen framebuffer.
///
/// Cell `(x, y)` lives at `y * width + x`; anything off the grid is dropped.
#[derive(Clone)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// A `width` x `height` grid of [`Cell::EMPTY`].
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::EMPTY; cell_count(width, height)],
            width,
            height,
        }
    }

    /// Columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole grid as a rect anchored at (0, 0).
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Slot of `(x, y)` in [`Buffer::cells`], or `None` off the grid.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let column = usize::try_from(x).ok().filter(|&c| c < usize::from(self.width))?;
        let row = usize::try_from(y).ok().filter(|&r| r < usize::from(self.height))?;
        Some(row * usize::from(self.width) + column)
    }

    /// Cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at `(x, y)`; `false` when off the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        let Some(slot) = self.index_of(x, y) else {
            return false;
        };
        self.cells[slot] = cell;
        true
    }

    /// Stamp `cell` over the part of `rect` that lies on the grid.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.area());
        if rect.is_empty() {
            return;
        }
        for y in rect.y..rect.bottom() {
            if let Some(start) = self.index_of(rect.x, y) {
                let span = usize::try_from(rect.width).unwrap_or(0);
                self.cells[start..start + span].fill(cell);
            }
        }
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Change the grid size. The top-left overlap keeps its content.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        let mut resized = Self::new(width, height);
        let keep = usize::from(self.width.min(width));
        for (old_row, new_row) in self.rows().zip(resized.cells.chunks_mut(usize::from(width.max(1)))) {
            new_row[..keep].copy_from_slice(&old_row[..keep]);
        }
        *self = resized;
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// Symbols of row `y` as text, without wide-glyph continuations.
    pub fn row_text(&self, y: i32) -> String {
        (0..i32::from(self.width))
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_wide_continuation())
            .map(Cell::symbol)
            .collect()
    }
}

impl Surface for Buffer {
    fn bounds(&self) -> Rect {
        self.area()
    }

    fn fill(&mut self, rect: Rect, color: Rgb) {
        self.fill_rect(rect, Cell::solid(color));
    }

    fn put_glyph(&mut self, at: Point, grapheme: &str, fg: Rgb, bg: Rgb) -> u8 {
        if self.index_of(at.x, at.y).is_none() {
            return 0;
        }
        let width = u8::try_from(unicode_width::UnicodeWidthStr::width(grapheme))
            .unwrap_or(1)
            .clamp(1, 2);
        let symbol = grapheme.chars().next().unwrap_or(' ');
        self.set(at.x, at.y, Cell::new(symbol).with_fg(fg).with_bg(bg).with_width(width));
        if width == 2 {
            self.set(at.x + 1, at.y, Cell::wide_continuation(bg));
        }
        width
    }
}

fn cell_count(width: u16, height: u16) -> usize {
    usize::from(width) * usize::from(height)
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
