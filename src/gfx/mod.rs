//! Graphics port: Clipped drawing primitives over a target surface.
//!
//! The core never writes pixels itself. It hands each gadget a [`Graphics`]
//! bound to one visible clip rectangle and the gadget's absolute origin; every
//! primitive works in gadget-local coordinates and is clipped before it
//! reaches the [`Surface`], so a gadget cannot paint outside the rectangle it
//! was given.

mod bitmap;

pub use bitmap::Bitmap;

use crate::buffer::Rgb;
use crate::layout::{Point, Rect};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A framebuffer the graphics port can paint into.
///
/// Coordinates are absolute. Callers have already clipped every request to
/// [`Surface::bounds`] and the active clip rectangle.
pub trait Surface {
    /// The drawable area.
    fn bounds(&self) -> Rect;

    /// Fill a rectangle with a solid colour.
    fn fill(&mut self, rect: Rect, color: Rgb);

    /// Draw one grapheme at `at`, returning the number of columns it covers.
    fn put_glyph(&mut self, at: Point, grapheme: &str, fg: Rgb, bg: Rgb) -> u8;
}

/// Bevel direction for [`Graphics::draw_bevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bevel {
    /// Light top/left edges, dark bottom/right edges.
    Raised,
    /// Dark top/left edges, light bottom/right edges.
    Sunken,
}

/// A clipped drawing context for one gadget and one clip rectangle.
pub struct Graphics<'a> {
    surface: &'a mut dyn Surface,
    origin: Point,
    clip: Rect,
}

impl<'a> Graphics<'a> {
    /// Create a port drawing at `origin` (absolute) confined to `clip`
    /// (absolute). The clip is further limited to the surface bounds.
    pub fn new(surface: &'a mut dyn Surface, origin: Point, clip: Rect) -> Self {
        let clip = clip.intersection(&surface.bounds());
        Self {
            surface,
            origin,
            clip,
        }
    }

    /// The active clip rectangle in absolute coordinates.
    #[inline]
    pub const fn clip_rect(&self) -> Rect {
        self.clip
    }

    /// The active clip rectangle in gadget-local coordinates.
    #[inline]
    pub const fn local_clip_rect(&self) -> Rect {
        self.clip.translate(Point::new(-self.origin.x, -self.origin.y))
    }

    /// The absolute origin of the gadget being drawn.
    #[inline]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    fn to_absolute(&self, rect: Rect) -> Rect {
        rect.translate(self.origin)
    }

    /// Fill a local rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let rect = self.to_absolute(rect).intersection(&self.clip);
        if !rect.is_empty() {
            self.surface.fill(rect, color);
        }
    }

    /// Plot a single pixel.
    pub fn draw_pixel(&mut self, at: Point, color: Rgb) {
        self.fill_rect(Rect::new(at.x, at.y, 1, 1), color);
    }

    /// Draw a horizontal line `length` pixels long.
    pub fn draw_horiz_line(&mut self, at: Point, length: i32, color: Rgb) {
        self.fill_rect(Rect::new(at.x, at.y, length, 1), color);
    }

    /// Draw a vertical line `length` pixels long.
    pub fn draw_vert_line(&mut self, at: Point, length: i32, color: Rgb) {
        self.fill_rect(Rect::new(at.x, at.y, 1, length), color);
    }

    /// Draw a line between two points (inclusive), Bresenham style.
    pub fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        if from.y == to.y {
            let x = from.x.min(to.x);
            self.draw_horiz_line(Point::new(x, from.y), (from.x - to.x).abs() + 1, color);
            return;
        }
        if from.x == to.x {
            let y = from.y.min(to.y);
            self.draw_vert_line(Point::new(from.x, y), (from.y - to.y).abs() + 1, color);
            return;
        }

        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut p = from;
        loop {
            self.draw_pixel(p, color);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p.y += sy;
            }
        }
    }

    /// Draw a one-pixel rectangular outline.
    pub fn draw_frame(&mut self, rect: Rect, color: Rgb) {
        if rect.is_empty() {
            return;
        }
        self.draw_horiz_line(rect.origin(), rect.width, color);
        self.draw_horiz_line(Point::new(rect.x, rect.bottom() - 1), rect.width, color);
        self.draw_vert_line(rect.origin(), rect.height, color);
        self.draw_vert_line(Point::new(rect.right() - 1, rect.y), rect.height, color);
    }

    /// Draw a bevelled outline using `light` and `dark` edge colours.
    pub fn draw_bevel(&mut self, rect: Rect, bevel: Bevel, light: Rgb, dark: Rgb) {
        if rect.is_empty() {
            return;
        }
        let (top_left, bottom_right) = match bevel {
            Bevel::Raised => (light, dark),
            Bevel::Sunken => (dark, light),
        };
        self.draw_horiz_line(rect.origin(), rect.width, top_left);
        self.draw_vert_line(rect.origin(), rect.height, top_left);
        self.draw_horiz_line(Point::new(rect.x, rect.bottom() - 1), rect.width, bottom_right);
        self.draw_vert_line(Point::new(rect.right() - 1, rect.y), rect.height, bottom_right);
    }

    /// Copy a bitmap to `at`. Transparent pixels are skipped.
    pub fn blit(&mut self, bitmap: &Bitmap, at: Point) {
        let target = self
            .to_absolute(Rect::new(at.x, at.y, bitmap.width(), bitmap.height()))
            .intersection(&self.clip);
        let base = at.offset(self.origin);
        for y in target.y..target.bottom() {
            for x in target.x..target.right() {
                if let Some(color) = bitmap.pixel(x - base.x, y - base.y) {
                    self.surface.fill(Rect::new(x, y, 1, 1), color);
                }
            }
        }
    }

    /// Draw a line of text starting at `at`.
    ///
    /// Graphemes that only partially fit the clip rectangle are replaced by
    /// background so nothing spills outside it. Returns the columns advanced.
    pub fn draw_text(&mut self, at: Point, text: &str, fg: Rgb, bg: Rgb) -> i32 {
        let mut x = at.x;
        for grapheme in text.graphemes(true) {
            let width = i32::try_from(grapheme.width()).unwrap_or(0);
            if width == 0 {
                continue;
            }
            let cell = self.to_absolute(Rect::new(x, at.y, width, 1));
            if self.clip.contains_rect(&cell) {
                self.surface.put_glyph(cell.origin(), grapheme, fg, bg);
            } else {
                let visible = cell.intersection(&self.clip);
                if !visible.is_empty() {
                    self.surface.fill(visible, bg);
                }
            }
            x += width;
        }
        x - at.x
    }

    /// Display width of `text` in columns.
    pub fn text_width(text: &str) -> i32 {
        i32::try_from(text.width()).unwrap_or(i32::MAX)
    }
}
