//! Cell: One character position of the framebuffer.
//!
//! Gadgets paint in cells the way a bitmap toolkit paints in pixels. A solid
//! fill is a space whose background carries the fill colour.

use bitflags::bitflags;

/// 24-bit colour.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Colour from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#000000`
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `#ffffff`
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Text colour of an unpainted cell.
    pub const DEFAULT_FG: Self = Self::WHITE;
    /// Paper colour of an unpainted cell.
    pub const DEFAULT_BG: Self = Self::BLACK;

    /// Colour from `0xRRGGBB`; the top byte is ignored.
    #[inline]
    pub const fn from_u32(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self::new(r, g, b)
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(rgb: u32) -> Self {
        Self::from_u32(rgb)
    }
}

bitflags! {
    /// Text attributes carried by a cell.
    ///
    /// # Example
    /// ```
    /// use gadgetry::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct Modifiers: u8 {
        /// Heavy weight.
        const BOLD = 0b0000_0001;
        /// Faint.
        const DIM = 0b0000_0010;
        /// Slanted.
        const ITALIC = 0b0000_0100;
        /// Underline.
        const UNDERLINE = 0b0000_1000;
        /// Foreground and background exchanged.
        const REVERSED = 0b0010_0000;
    }
}

/// Glyph, colours and attributes at one grid position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    /// First scalar of the grapheme shown in this cell.
    symbol: char,
    /// Display width (0 = continuation of a wide glyph, 1, or 2).
    width: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Blank cell in the default colours.
    pub const EMPTY: Self = Self {
        symbol: ' ',
        width: 1,
        fg: Rgb::DEFAULT_FG,
        bg: Rgb::DEFAULT_BG,
        modifiers: Modifiers::empty(),
    };

    /// `symbol` in the default colours.
    #[inline]
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            ..Self::EMPTY
        }
    }

    /// A solid cell of the given colour.
    #[inline]
    pub const fn solid(color: Rgb) -> Self {
        Self::new(' ').with_bg(color)
    }

    /// The right half of a double-width glyph.
    #[inline]
    pub const fn wide_continuation(bg: Rgb) -> Self {
        Self {
            symbol: ' ',
            width: 0,
            fg: Rgb::DEFAULT_FG,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Same cell, new text colour.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Same cell, new paper colour.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Same cell, new attributes.
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Same cell, new column span.
    #[inline]
    #[must_use]
    pub const fn with_width(mut self, width: u8) -> Self {
        self.width = width;
        self
    }

    /// First scalar of the glyph.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Text colour.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Paper colour.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Attributes.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Columns covered: 0, 1 or 2.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Whether this cell only pads the glyph to its left.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.width == 0
    }
}
