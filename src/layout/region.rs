//! Region: Rectangle subtraction and clip regions.
//!
//! The clipping engine works on sets of disjoint rectangles. Removing an
//! occluder from a rectangle splits it into at most four fragments:
//!
//! ```text
//! ┌───────────────────┐
//! │        top        │
//! ├──────┬─────┬──────┤
//! │ left │ occ │ right│
//! ├──────┴─────┴──────┤
//! │      bottom       │
//! └───────────────────┘
//! ```
//!
//! Top and bottom bands span the full width; left and right bands span only
//! the occluder's rows, so the fragments never overlap.

use super::rect::Rect;

/// Subtract `occluder` from `rect`.
///
/// Returns the disjoint parts of `rect` not covered by `occluder`, in
/// top, left, right, bottom order. Empty fragments are dropped.
pub fn subtract(rect: Rect, occluder: Rect) -> Vec<Rect> {
    if rect.is_empty() {
        return Vec::new();
    }
    if !rect.intersects(&occluder) {
        return vec![rect];
    }

    let hole = rect.intersection(&occluder);
    let mut out = Vec::with_capacity(4);

    let top = Rect::from_edges(rect.x, rect.y, rect.right(), hole.y);
    let left = Rect::from_edges(rect.x, hole.y, hole.x, hole.bottom());
    let right = Rect::from_edges(hole.right(), hole.y, rect.right(), hole.bottom());
    let bottom = Rect::from_edges(rect.x, hole.bottom(), rect.right(), rect.bottom());

    for fragment in [top, left, right, bottom] {
        if !fragment.is_empty() {
            out.push(fragment);
        }
    }
    out
}

/// Remove every occluder from `rect`, returning the visible fragments.
pub fn visible_rects<'a, I>(rect: Rect, occluders: I) -> Vec<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut region = ClipRegion::from_rect(rect);
    for occluder in occluders {
        if region.is_empty() {
            break;
        }
        region.subtract(*occluder);
    }
    region.into_rects()
}

/// An ordered set of disjoint rectangles.
///
/// Recomputed for every redraw pass; never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipRegion {
    rects: Vec<Rect>,
}

impl ClipRegion {
    /// Create an empty region.
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Create a region covering a single rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        if !rect.is_empty() {
            region.rects.push(rect);
        }
        region
    }

    /// Get the rectangles of the region.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Consume the region into its rectangles.
    #[inline]
    pub fn into_rects(self) -> Vec<Rect> {
        self.rects
    }

    /// Check if the region covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of rectangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Total covered area.
    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Bounding box of the whole region.
    pub fn bounds(&self) -> Rect {
        self.rects.iter().fold(Rect::ZERO, |acc, r| acc.union(r))
    }

    /// Remove `occluder` from every rectangle of the region.
    pub fn subtract(&mut self, occluder: Rect) {
        if occluder.is_empty() {
            return;
        }
        let mut next = Vec::with_capacity(self.rects.len() + 3);
        for rect in self.rects.drain(..) {
            next.extend(subtract(rect, occluder));
        }
        self.rects = next;
    }

    /// Clip every rectangle of the region to `bounds`.
    pub fn intersect(&mut self, bounds: Rect) {
        self.rects.retain_mut(|rect| {
            *rect = rect.intersection(&bounds);
            !rect.is_empty()
        });
    }

    /// Check if a point lies inside the region.
    pub fn contains(&self, point: super::Point) -> bool {
        self.rects.iter().any(|r| r.contains(point))
    }
}

impl IntoIterator for ClipRegion {
    type Item = Rect;
    type IntoIter = std::vec::IntoIter<Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClipRegion {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}
