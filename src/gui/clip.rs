//! Clipping engine: What part of a gadget is visible, and painting it.
//!
//! A gadget's visible region is its absolute bounds, clipped by every
//! ancestor's bounds, minus every shown sibling above it and every shown
//! sibling above each of its ancestors. The part a gadget paints itself (its
//! draw region) additionally excludes its own shown children, which are
//! painted afterwards with the same rule.

use super::app::Damage;
use super::Gui;
use crate::gadget::{GadgetFlags, GadgetId, GadgetView};
use crate::gfx::{Graphics, Surface};
use crate::layout::{ClipRegion, Rect};

impl Gui {
    /// The visible part of a gadget (absolute coordinates).
    pub fn visible_region(&self, id: GadgetId) -> ClipRegion {
        self.absolute_rect(id)
            .map_or_else(ClipRegion::new, |rect| self.visible_region_within(id, rect))
    }

    /// The visible part of a gadget within `dirty` (absolute coordinates).
    pub fn visible_region_within(&self, id: GadgetId, dirty: Rect) -> ClipRegion {
        if !self.is_shown(id) {
            return ClipRegion::new();
        }
        let Some(bounds) = self.absolute_rect(id) else {
            return ClipRegion::new();
        };

        let mut clip = bounds.intersection(&dirty);
        let mut occluders = Vec::new();
        let mut current = id;
        while let Some(parent) = self.gadgets[current].parent {
            if let Some(parent_rect) = self.absolute_rect(parent) {
                clip = clip.intersection(&parent_rect);
            }
            if clip.is_empty() {
                return ClipRegion::new();
            }
            let siblings = &self.gadgets[parent].children;
            if let Some(index) = siblings.iter().position(|c| *c == current) {
                occluders.extend(
                    siblings[index + 1..]
                        .iter()
                        .filter(|s| !self.gadgets[**s].is_hidden())
                        .filter_map(|s| self.absolute_rect(*s)),
                );
            }
            current = parent;
        }

        let mut region = ClipRegion::from_rect(clip);
        for occluder in occluders {
            if region.is_empty() {
                break;
            }
            if occluder.intersects(&clip) {
                region.subtract(occluder);
            }
        }
        region
    }

    /// The part of a gadget it paints itself: visible region minus children.
    pub fn draw_region(&self, id: GadgetId) -> ClipRegion {
        self.absolute_rect(id)
            .map_or_else(ClipRegion::new, |rect| self.draw_region_within(id, rect))
    }

    /// [`Gui::draw_region`] limited to `dirty`.
    pub fn draw_region_within(&self, id: GadgetId, dirty: Rect) -> ClipRegion {
        let mut region = self.visible_region_within(id, dirty);
        for child in self.children(id) {
            if region.is_empty() {
                break;
            }
            if self.gadgets[*child].is_hidden() {
                continue;
            }
            if let Some(rect) = self.absolute_rect(*child) {
                region.subtract(rect);
            }
        }
        region
    }

    /// Paint all queued damage onto `surface`.
    ///
    /// Returns the absolute rectangles painted, in paint order.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Vec<Rect> {
        let queued = std::mem::take(&mut self.damage);
        let damage = self.coalesce_damage(queued);
        let mut painted = Vec::new();
        for entry in damage {
            if self.is_alive(entry.id) {
                self.paint_subtree(entry.id, entry.rect, surface, &mut painted);
            }
        }
        painted
    }

    /// Drop entries already covered by another entry for the same gadget or
    /// one of its ancestors; repainting the outer subtree repaints them too.
    fn coalesce_damage(&self, damage: Vec<Damage>) -> Vec<Damage> {
        let mut kept: Vec<Damage> = Vec::with_capacity(damage.len());
        for entry in damage {
            if !self.is_alive(entry.id) {
                continue;
            }
            if kept.iter().any(|outer| self.damage_covers(outer, &entry)) {
                continue;
            }
            kept.retain(|inner| !self.damage_covers(&entry, inner));
            kept.push(entry);
        }
        kept
    }

    fn damage_covers(&self, outer: &Damage, inner: &Damage) -> bool {
        // empty entries still clear ERASED on their gadget
        !inner.rect.is_empty()
            && outer.rect.contains_rect(&inner.rect)
            && (outer.id == inner.id || self.is_descendant_of(inner.id, outer.id))
    }

    fn paint_subtree(
        &mut self,
        id: GadgetId,
        dirty: Rect,
        surface: &mut dyn Surface,
        painted: &mut Vec<Rect>,
    ) {
        if !self.is_shown(id) {
            return;
        }
        self.gadgets[id].flags.remove(GadgetFlags::ERASED);
        let region = self.draw_region_within(id, dirty);
        if !region.is_empty() {
            self.paint_gadget(id, &region, surface);
            painted.extend_from_slice(region.rects());
        }

        let children = self.gadgets[id].children.clone();
        for child in children {
            let Some(rect) = self.absolute_rect(child) else {
                continue;
            };
            if rect.intersects(&dirty) && !self.gadgets[child].is_hidden() {
                self.paint_subtree(child, dirty, surface, painted);
            }
        }
    }

    fn paint_gadget(&self, id: GadgetId, region: &ClipRegion, surface: &mut dyn Surface) {
        let Some(origin) = self.absolute_origin(id) else {
            return;
        };
        let gadget = &self.gadgets[id];
        let style = gadget.style.unwrap_or(self.config.style);
        let view = GadgetView {
            rect: Rect::from_size(gadget.rect.width, gadget.rect.height),
            client: gadget.client_rect(),
            flags: gadget.flags,
            style: &style,
        };
        for rect in region {
            let mut gfx = Graphics::new(&mut *surface, origin, *rect);
            gadget.behavior.draw(&mut gfx, &view);
        }
    }
}
