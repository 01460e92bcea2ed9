//! Bitmap: A small pixel image for blitting.

use crate::buffer::Rgb;

/// A rectangular image. `None` pixels are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: i32,
    height: i32,
    pixels: Vec<Option<Rgb>>,
}

impl Bitmap {
    /// Create a bitmap filled with one colour.
    pub fn filled(width: i32, height: i32, color: Rgb) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = usize::try_from(width * height).unwrap_or(0);
        Self {
            width,
            height,
            pixels: vec![Some(color); len],
        }
    }

    /// Create a bitmap from row-major pixels.
    ///
    /// Missing pixels are transparent; extra pixels are dropped.
    pub fn from_pixels(width: i32, height: i32, mut pixels: Vec<Option<Rgb>>) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        pixels.resize(usize::try_from(width * height).unwrap_or(0), None);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The pixel at (x, y), or `None` if transparent or out of range.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let idx = usize::try_from(y * self.width + x).ok()?;
        self.pixels.get(idx).copied().flatten()
    }
}
