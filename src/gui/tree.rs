//! Tree operations: ownership, geometry and z-order of gadgets.
//!
//! Every mutation that changes what is on screen queues damage. Geometry
//! changes are two-phase: the old footprint is queued as damage on the
//! parent (repainting whatever is now exposed) before the gadget itself is
//! queued at its new footprint.

use tracing::{debug, trace};

use super::app::Damage;
use super::Gui;
use crate::gadget::{EventKind, Gadget, GadgetFlags, GadgetId};
use crate::layout::{Point, Rect};

impl Gui {
    /// Put a gadget into the arena as an orphan.
    ///
    /// The gadget is not on screen until added to a parent.
    pub fn insert(&mut self, mut gadget: Gadget) -> GadgetId {
        gadget.style.get_or_insert(self.config.style);
        gadget.parent = None;
        gadget.children.clear();
        self.gadgets.insert(gadget)
    }

    /// Insert a gadget and add it to `parent` in one step.
    ///
    /// Returns `None` (and drops the gadget) if `parent` is stale.
    pub fn spawn(&mut self, parent: GadgetId, gadget: Gadget) -> Option<GadgetId> {
        if !self.is_alive(parent) {
            trace!(?parent, "spawn under stale parent ignored");
            return None;
        }
        let id = self.insert(gadget);
        if self.add_child(parent, id) {
            Some(id)
        } else {
            self.gadgets.remove(id);
            None
        }
    }

    /// Append `child` to the front of `parent`'s z-order.
    ///
    /// Decorations are kept behind ordinary children. Returns `false` if
    /// either id is stale, the child already has a parent, or the move
    /// would make a gadget its own ancestor.
    pub fn add_child(&mut self, parent: GadgetId, child: GadgetId) -> bool {
        if parent == child || child == self.root || !self.is_alive(parent) {
            trace!(?parent, ?child, "add_child rejected");
            return false;
        }
        let Some(node) = self.gadgets.get(child) else {
            return false;
        };
        if node.parent.is_some() || self.is_descendant_of(parent, child) {
            trace!(?parent, ?child, "add_child rejected: already parented or cyclic");
            return false;
        }

        let index = if node.is_decoration() {
            self.decoration_count(parent)
        } else {
            self.gadgets[parent].children.len()
        };
        self.gadgets[parent].children.insert(index, child);
        let node = &mut self.gadgets[child];
        node.parent = Some(parent);
        node.flags.remove(GadgetFlags::ERASED);
        self.redraw(child);
        true
    }

    /// Detach `child` from `parent`.
    ///
    /// The child stays alive as an orphan and may be added elsewhere or
    /// destroyed. Returns `false` if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: GadgetId, child: GadgetId) -> bool {
        if self.parent(child) != Some(parent) {
            trace!(?parent, ?child, "remove_child of a non-child ignored");
            return false;
        }
        self.detach(child);
        true
    }

    /// Destroy a gadget and everything it owns.
    ///
    /// Focus, clicked and modal state referring to any destroyed gadget is
    /// cleared. The root cannot be destroyed.
    pub fn destroy(&mut self, id: GadgetId) -> bool {
        if id == self.root || !self.is_alive(id) {
            trace!(?id, "destroy rejected");
            return false;
        }
        if self.gadgets[id].parent.is_some() {
            self.detach(id);
        }
        let subtree = self.subtree(id);
        self.release_slots(&subtree);
        for gadget in &subtree {
            self.gadgets.remove(*gadget);
        }
        debug!(?id, count = subtree.len(), "destroyed gadget");
        true
    }

    /// Move a gadget to (x, y) in its parent's coordinates.
    pub fn move_to(&mut self, id: GadgetId, x: i32, y: i32) -> bool {
        let Some(rect) = self.rect(id) else {
            return false;
        };
        if id == self.root || (rect.x == x && rect.y == y) {
            return false;
        }
        self.change_dimensions(id, Rect::new(x, y, rect.width, rect.height))
    }

    /// Resize a gadget. Negative sizes clamp to zero.
    pub fn resize(&mut self, id: GadgetId, width: i32, height: i32) -> bool {
        let Some(rect) = self.rect(id) else {
            return false;
        };
        if id == self.root {
            return false;
        }
        self.change_dimensions(id, Rect::new(rect.x, rect.y, width, height))
    }

    /// Set position and size at once with a single erase/redraw.
    pub fn change_dimensions(&mut self, id: GadgetId, rect: Rect) -> bool {
        let Some(old) = self.rect(id) else {
            return false;
        };
        if id == self.root || old == rect {
            return false;
        }
        self.erase_footprint(id);
        self.gadgets[id].rect = rect;
        self.redraw(id);

        if old.origin() != rect.origin() {
            self.raise(id, EventKind::Move);
        }
        if (old.width, old.height) != (rect.width, rect.height) && self.is_alive(id) {
            self.raise(id, EventKind::Resize);
        }
        true
    }

    /// Bring a gadget to the front of its siblings.
    ///
    /// Decorations only move to the front of the decoration band.
    pub fn raise_to_top(&mut self, id: GadgetId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let target = if self.gadgets[id].is_decoration() {
            self.decoration_count(parent).saturating_sub(1)
        } else {
            self.gadgets[parent].children.len() - 1
        };
        if !self.reorder(parent, id, target) {
            return false;
        }
        self.redraw(id);
        true
    }

    /// Send a gadget behind its siblings.
    pub fn lower_to_bottom(&mut self, id: GadgetId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let target = if self.gadgets[id].is_decoration() {
            0
        } else {
            self.decoration_count(parent)
        };
        let footprint = self.absolute_rect(id);
        if !self.reorder(parent, id, target) {
            return false;
        }
        if let Some(rect) = footprint {
            self.damage.push(Damage { id: parent, rect });
        }
        true
    }

    /// Make a hidden gadget visible.
    pub fn show(&mut self, id: GadgetId) -> bool {
        match self.gadgets.get_mut(id) {
            Some(g) if g.is_hidden() => g.flags.remove(GadgetFlags::HIDDEN),
            _ => return false,
        }
        self.redraw(id);
        self.raise(id, EventKind::Show);
        true
    }

    /// Hide a gadget and its subtree.
    ///
    /// Focus and click state inside the subtree is released.
    pub fn hide(&mut self, id: GadgetId) -> bool {
        if id == self.root || self.gadgets.get(id).is_none_or(Gadget::is_hidden) {
            return false;
        }
        self.erase_footprint(id);
        self.gadgets[id].flags.insert(GadgetFlags::HIDDEN | GadgetFlags::ERASED);
        self.release_subtree_input(id);
        self.raise(id, EventKind::Hide);
        true
    }

    /// Enable a gadget.
    pub fn enable(&mut self, id: GadgetId) -> bool {
        match self.gadgets.get_mut(id) {
            Some(g) if !g.flags.contains(GadgetFlags::ENABLED) => g.flags.insert(GadgetFlags::ENABLED),
            _ => return false,
        }
        self.redraw(id);
        self.raise(id, EventKind::Enable);
        true
    }

    /// Disable a gadget: it and its subtree stop taking clicks and focus.
    pub fn disable(&mut self, id: GadgetId) -> bool {
        match self.gadgets.get_mut(id) {
            Some(g) if g.flags.contains(GadgetFlags::ENABLED) => g.flags.remove(GadgetFlags::ENABLED),
            _ => return false,
        }
        self.release_subtree_input(id);
        self.redraw(id);
        self.raise(id, EventKind::Disable);
        true
    }

    /// The parent of a gadget.
    pub fn parent(&self, id: GadgetId) -> Option<GadgetId> {
        self.gadgets.get(id)?.parent
    }

    /// Children of a gadget, back to front (decorations first).
    pub fn children(&self, id: GadgetId) -> &[GadgetId] {
        self.gadgets.get(id).map_or(&[], |g| &g.children)
    }

    /// Ordinary children only, back to front.
    pub fn content_children(&self, id: GadgetId) -> &[GadgetId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.gadgets[id].children[self.decoration_count(id)..]
    }

    /// Parent-relative bounds.
    pub fn rect(&self, id: GadgetId) -> Option<Rect> {
        self.gadgets.get(id).map(Gadget::rect)
    }

    /// Absolute position of a gadget's origin.
    pub fn absolute_origin(&self, id: GadgetId) -> Option<Point> {
        let mut node = self.gadgets.get(id)?;
        let mut origin = node.rect.origin();
        while let Some(parent) = node.parent {
            node = self.gadgets.get(parent)?;
            origin = origin.offset(node.rect.origin());
        }
        Some(origin)
    }

    /// Absolute bounds of a gadget.
    pub fn absolute_rect(&self, id: GadgetId) -> Option<Rect> {
        let rect = self.gadgets.get(id)?.rect;
        let origin = self.absolute_origin(id)?;
        Some(Rect::new(origin.x, origin.y, rect.width, rect.height))
    }

    /// Absolute client rect of a gadget.
    pub fn client_rect(&self, id: GadgetId) -> Option<Rect> {
        let client = self.gadgets.get(id)?.client_rect();
        Some(client.translate(self.absolute_origin(id)?))
    }

    /// Check if `id` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, id: GadgetId, ancestor: GadgetId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Check if a gadget hangs off the root.
    pub fn is_attached(&self, id: GadgetId) -> bool {
        id == self.root || (self.is_alive(id) && self.is_descendant_of(id, self.root))
    }

    /// Check if a gadget is attached and neither it nor an ancestor is hidden.
    pub fn is_shown(&self, id: GadgetId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            let gadget = &self.gadgets[node];
            if gadget.is_hidden() {
                return false;
            }
            current = gadget.parent;
        }
        true
    }

    /// Check if a gadget and all its ancestors are enabled.
    pub fn is_enabled(&self, id: GadgetId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(gadget) = self.gadgets.get(node) else {
                return false;
            };
            if !gadget.flags.contains(GadgetFlags::ENABLED) {
                return false;
            }
            current = gadget.parent;
        }
        true
    }

    /// The gadget and all its descendants, pre-order.
    pub(crate) fn subtree(&self, id: GadgetId) -> Vec<GadgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if let Some(gadget) = self.gadgets.get(node) {
                out.push(node);
                stack.extend(gadget.children.iter().rev());
            }
        }
        out
    }

    /// Queue a repaint of a gadget and its subtree.
    pub fn redraw(&mut self, id: GadgetId) {
        if let Some(rect) = self.absolute_rect(id) {
            if self.is_shown(id) {
                self.damage.push(Damage { id, rect });
            }
        }
    }

    /// Queue a repaint of part of a gadget (`rect` in local coordinates).
    pub fn redraw_rect(&mut self, id: GadgetId, rect: Rect) {
        if let Some(origin) = self.absolute_origin(id) {
            if self.is_shown(id) {
                self.damage.push(Damage {
                    id,
                    rect: rect.translate(origin),
                });
            }
        }
    }

    /// Queue a repaint of everything.
    pub fn redraw_all(&mut self) {
        self.redraw(self.root);
    }

    /// Queue the parent to repaint the area `id` currently covers.
    fn erase_footprint(&mut self, id: GadgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if !self.is_shown(id) {
            return;
        }
        if let Some(rect) = self.absolute_rect(id) {
            self.damage.push(Damage { id: parent, rect });
        }
    }

    fn detach(&mut self, id: GadgetId) {
        self.erase_footprint(id);
        let Some(parent) = self.gadgets.get_mut(id).and_then(|g| g.parent.take()) else {
            return;
        };
        self.gadgets[id].flags.insert(GadgetFlags::ERASED);
        if let Some(p) = self.gadgets.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        let subtree = self.subtree(id);
        self.release_slots(&subtree);
    }

    /// Clear every single slot that refers to one of `ids`.
    fn release_slots(&mut self, ids: &[GadgetId]) {
        if let Some(focused) = self.focused.filter(|f| ids.contains(f)) {
            self.focused = None;
            if let Some(g) = self.gadgets.get_mut(focused) {
                g.flags.remove(GadgetFlags::FOCUSED);
            }
        }
        if let Some(clicked) = self.clicked.filter(|c| ids.contains(c)) {
            self.clicked = None;
            self.pointer = None;
            if let Some(g) = self.gadgets.get_mut(clicked) {
                g.flags.remove(GadgetFlags::CLICKED | GadgetFlags::DRAGGING);
            }
        }
        if self.modal.iter().any(|m| ids.contains(m)) {
            self.modal.retain(|m| !ids.contains(m));
            for id in ids {
                if let Some(g) = self.gadgets.get_mut(*id) {
                    g.flags.remove(GadgetFlags::MODAL);
                }
            }
            debug!(depth = self.modal.len(), "modal stack trimmed");
        }
        if self.last_click.is_some_and(|(id, _)| ids.contains(&id)) {
            self.last_click = None;
        }
    }

    /// Blur and release a subtree that just stopped taking input.
    fn release_subtree_input(&mut self, id: GadgetId) {
        if let Some(focused) = self.focused {
            if focused == id || self.is_descendant_of(focused, id) {
                self.blur(focused);
            }
        }
        if let Some(clicked) = self.clicked {
            if clicked == id || self.is_descendant_of(clicked, id) {
                self.release_clicked();
            }
        }
    }

    fn decoration_count(&self, parent: GadgetId) -> usize {
        self.gadgets[parent]
            .children
            .iter()
            .take_while(|c| self.gadgets[**c].is_decoration())
            .count()
    }

    fn reorder(&mut self, parent: GadgetId, id: GadgetId, target: usize) -> bool {
        let children = &mut self.gadgets[parent].children;
        let Some(index) = children.iter().position(|c| *c == id) else {
            return false;
        };
        if index == target {
            return false;
        }
        children.remove(index);
        children.insert(target, id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::GuiConfig;

    fn gui() -> Gui {
        Gui::new(GuiConfig::with_screen(200, 200))
    }

    #[test]
    fn test_add_child_sets_parent() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(10, 10, 50, 50))).unwrap();
        let b = gui.spawn(a, Gadget::plain(Rect::new(5, 5, 10, 10))).unwrap();
        assert_eq!(gui.parent(b), Some(a));
        assert_eq!(gui.children(a), &[b]);
        assert_eq!(gui.absolute_rect(b), Some(Rect::new(15, 15, 10, 10)));
    }

    #[test]
    fn test_add_child_rejects_reparent_and_cycles() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 50, 50))).unwrap();
        let b = gui.spawn(a, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let c = gui.insert(Gadget::plain(Rect::new(0, 0, 10, 10)));

        assert!(!gui.add_child(root, b), "already parented");
        assert!(!gui.remove_child(root, b), "not a child of root");
        assert!(gui.remove_child(a, b));
        assert!(gui.add_child(b, c));
        assert!(gui.remove_child(root, a));

        // a -> b -> c; putting a under its own grandchild would loop
        assert!(gui.add_child(a, b));
        assert!(!gui.add_child(c, a));
        assert!(!gui.add_child(a, a));
        assert!(gui.add_child(root, a));
    }

    #[test]
    fn test_decorations_stay_behind() {
        let mut gui = gui();
        let root = gui.root();
        let w = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 50, 50))).unwrap();
        let a = gui.spawn(w, Gadget::plain(Rect::new(0, 0, 5, 5))).unwrap();
        let deco = gui.spawn(w, Gadget::plain(Rect::new(0, 0, 5, 1)).decoration()).unwrap();
        let b = gui.spawn(w, Gadget::plain(Rect::new(0, 0, 5, 5))).unwrap();
        assert_eq!(gui.children(w), &[deco, a, b]);

        assert!(gui.raise_to_top(a));
        assert_eq!(gui.children(w), &[deco, b, a]);
        assert!(!gui.raise_to_top(a));
        assert!(gui.lower_to_bottom(a));
        assert_eq!(gui.children(w), &[deco, a, b]);
        assert!(!gui.raise_to_top(deco));
        assert_eq!(gui.content_children(w), &[a, b]);
    }

    #[test]
    fn test_destroy_recursively_frees() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 50, 50))).unwrap();
        let b = gui.spawn(a, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let c = gui.spawn(b, Gadget::plain(Rect::new(0, 0, 5, 5))).unwrap();
        let before = gui.len();

        assert!(gui.destroy(a));
        assert!(!gui.is_alive(a));
        assert!(!gui.is_alive(b));
        assert!(!gui.is_alive(c));
        assert_eq!(gui.len(), before - 3);
        assert!(gui.children(root).is_empty());
        assert!(!gui.destroy(a));
        assert!(!gui.destroy(root));
    }

    #[test]
    fn test_move_queues_erase_then_redraw() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(10, 10, 20, 20))).unwrap();
        gui.damage.clear();

        assert!(gui.move_to(a, 50, 60));
        assert_eq!(
            gui.damage,
            vec![
                Damage { id: root, rect: Rect::new(10, 10, 20, 20) },
                Damage { id: a, rect: Rect::new(50, 60, 20, 20) },
            ]
        );
        assert!(!gui.move_to(a, 50, 60));
    }

    #[test]
    fn test_hidden_gadget_queues_no_redraw() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(10, 10, 20, 20))).unwrap();
        assert!(gui.hide(a));
        assert!(!gui.hide(a));
        gui.damage.clear();
        gui.redraw(a);
        assert!(gui.damage.is_empty());
        assert!(gui.flags(a).unwrap().contains(GadgetFlags::ERASED));
        assert!(gui.show(a));
        assert_eq!(gui.damage.len(), 1);
    }

    #[test]
    fn test_orphans_are_not_shown() {
        let mut gui = gui();
        let orphan = gui.insert(Gadget::plain(Rect::new(0, 0, 10, 10)));
        assert!(!gui.is_shown(orphan));
        assert!(!gui.is_attached(orphan));
    }

    #[test]
    fn test_disabled_ancestor_disables_subtree() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 50, 50))).unwrap();
        let b = gui.spawn(a, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        assert!(gui.is_enabled(b));
        assert!(gui.disable(a));
        assert!(!gui.is_enabled(b));
        assert!(!gui.disable(a));
        assert!(gui.enable(a));
        assert!(gui.is_enabled(b));
    }

    #[test]
    fn test_negative_resize_clamps() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 50, 50))).unwrap();
        assert!(gui.resize(a, -4, 10));
        assert_eq!(gui.rect(a), Some(Rect::new(0, 0, 0, 10)));
    }
}
