//! Input dispatch: Hit testing, click/drag/release, keys, focus and modals.
//!
//! Pointer input goes to the topmost shown gadget under the pointer, searched
//! front to back inside the innermost modal (or the whole tree). Key input
//! goes to the focused gadget. Everything a gadget should react to is turned
//! into an [`EventKind`] and raised on it.

use std::time::Instant;

use tracing::{debug, trace};

use super::Gui;
use crate::gadget::{EventKind, GadgetFlags, GadgetId, Response};
use crate::input::{InputEvent, KeyCode, KeyModifiers};
use crate::layout::{Point, Rect};

impl Gui {
    /// Process one platform input event.
    ///
    /// Returns `true` if the event reached a gadget.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        trace!(?event, "input");
        match event {
            InputEvent::PointerDown { point, timestamp } => self.pointer_down(point, timestamp),
            InputEvent::PointerMove { point, .. } => self.pointer_move(point),
            InputEvent::PointerUp { point, .. } => self.pointer_up(point),
            InputEvent::KeyDown {
                code, modifiers, ..
            } => self.key_down(code, modifiers),
            InputEvent::KeyUp {
                code, modifiers, ..
            } => self.key_up(code, modifiers),
        }
    }

    /// The topmost shown gadget under `point` that may receive input.
    pub fn gadget_at(&self, point: Point) -> Option<GadgetId> {
        let scope = self.modal().unwrap_or(self.root);
        if !self.is_shown(scope) {
            return None;
        }
        let clip = match self.parent(scope) {
            Some(parent) => self.clipped_rect(parent)?,
            None => self.screen(),
        };
        self.hit_test(scope, point, clip)
    }

    fn hit_test(&self, id: GadgetId, point: Point, clip: Rect) -> Option<GadgetId> {
        let gadget = self.gadgets.get(id)?;
        if gadget.is_hidden() {
            return None;
        }
        let clip = self.absolute_rect(id)?.intersection(&clip);
        if !clip.contains(point) {
            return None;
        }
        gadget
            .children
            .iter()
            .rev()
            .find_map(|child| self.hit_test(*child, point, clip))
            .or(Some(id))
    }

    /// Absolute bounds clipped by every ancestor.
    fn clipped_rect(&self, id: GadgetId) -> Option<Rect> {
        let mut rect = self.absolute_rect(id)?;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            rect = rect.intersection(&self.absolute_rect(parent)?);
            current = self.parent(parent);
        }
        Some(rect)
    }

    fn pointer_down(&mut self, point: Point, timestamp: Instant) -> bool {
        let Some(target) = self.gadget_at(point) else {
            trace!(?point, "pointer down outside input scope");
            return false;
        };
        if !self.is_enabled(target) {
            trace!(?target, "click on disabled gadget swallowed");
            return false;
        }
        self.release_clicked();

        let origin = self.absolute_origin(target).unwrap_or(Point::ZERO);
        let gadget = &mut self.gadgets[target];
        gadget.flags.insert(GadgetFlags::CLICKED);
        if gadget.flags.contains(GadgetFlags::DRAGGABLE) {
            gadget.drag_anchor = point.minus(origin);
            gadget.flags.insert(GadgetFlags::DRAGGING);
        }
        self.clicked = Some(target);
        self.pointer = Some(point);

        // focus listeners may tear down the target or its ancestors
        if self.can_focus(target) {
            self.focus(target);
        }
        if !self.is_alive(target) {
            return true;
        }
        self.raise_on_click(target);
        if !self.is_alive(target) {
            return true;
        }
        self.redraw(target);

        let double = self.register_click(target, timestamp);
        self.raise(target, EventKind::Click { point });
        if double && self.is_alive(target) {
            self.raise(target, EventKind::DoubleClick { point });
        }
        true
    }

    /// Record a click and report whether it completes a double-click.
    fn register_click(&mut self, target: GadgetId, timestamp: Instant) -> bool {
        let double = self.gadgets[target].flags.contains(GadgetFlags::DOUBLE_CLICKABLE)
            && self.last_click.is_some_and(|(previous, at)| {
                previous == target
                    && timestamp.saturating_duration_since(at) <= self.config.double_click_time
            });
        self.last_click = if double { None } else { Some((target, timestamp)) };
        double
    }

    fn raise_on_click(&mut self, target: GadgetId) {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == self.root {
                break;
            }
            let Some(gadget) = self.gadgets.get(id) else {
                break;
            };
            let (raises, parent) = (gadget.behavior.raises_on_click(), gadget.parent);
            if raises {
                self.raise_to_top(id);
            }
            current = parent;
        }
    }

    fn pointer_move(&mut self, point: Point) -> bool {
        let Some(clicked) = self.clicked() else {
            return false;
        };
        let previous = self.pointer.replace(point).unwrap_or(point);
        let velocity = point.minus(previous);
        let (vx, vy) = (velocity.x, velocity.y);
        if vx == 0 && vy == 0 {
            return false;
        }
        if self.gadgets[clicked].flags.contains(GadgetFlags::DRAGGING) {
            self.drag_to(clicked, point);
        }
        if self.is_alive(clicked) {
            self.raise(clicked, EventKind::Drag { point, vx, vy });
        }
        true
    }

    /// Move a dragged gadget so its anchor sits under `point`, kept inside
    /// the parent's client area.
    fn drag_to(&mut self, id: GadgetId, point: Point) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(parent_origin) = self.absolute_origin(parent) else {
            return;
        };
        let client = self.gadgets[parent].client_rect();
        let gadget = &self.gadgets[id];
        let (anchor, width, height) = (gadget.drag_anchor, gadget.rect.width, gadget.rect.height);

        let local = point.minus(parent_origin).minus(anchor);
        let x = local.x.min(client.right().saturating_sub(width)).max(client.x);
        let y = local.y.min(client.bottom().saturating_sub(height)).max(client.y);
        self.move_to(id, x, y);
    }

    fn pointer_up(&mut self, point: Point) -> bool {
        let Some(clicked) = self.clicked() else {
            self.clicked = None;
            return false;
        };
        let inside = self.clipped_rect(clicked).is_some_and(|rect| rect.contains(point));
        self.release_clicked();

        if inside {
            self.raise(clicked, EventKind::Release { point });
            if self.is_alive(clicked) {
                self.raise(clicked, EventKind::Action);
            }
        } else {
            self.raise(clicked, EventKind::ReleaseOutside { point });
        }
        true
    }

    /// Clear the clicked slot without raising anything.
    pub(crate) fn release_clicked(&mut self) {
        self.pointer = None;
        let Some(id) = self.clicked.take() else {
            return;
        };
        if let Some(gadget) = self.gadgets.get_mut(id) {
            gadget.flags.remove(GadgetFlags::CLICKED | GadgetFlags::DRAGGING);
            self.redraw(id);
        }
    }

    fn key_down(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Some(target) = self.focused().filter(|id| self.input_allowed(*id)) else {
            return false;
        };
        let response = self.gadgets[target].behavior.on_key_press(code, modifiers);
        if matches!(response, Response::Redraw | Response::ValueChanged) {
            self.redraw(target);
        }
        self.raise(target, EventKind::KeyPress { code, modifiers });
        if !self.is_alive(target) {
            return true;
        }
        match response {
            Response::ValueChanged => {
                self.raise(target, EventKind::ValueChange);
            }
            Response::Activated => {
                self.raise(target, EventKind::Action);
            }
            Response::Ignored | Response::Redraw => {}
        }
        true
    }

    fn key_up(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Some(target) = self.focused().filter(|id| self.input_allowed(*id)) else {
            return false;
        };
        self.raise(target, EventKind::KeyRelease { code, modifiers });
        true
    }

    /// Check if a gadget lies inside the innermost modal (or no modal is up).
    pub fn input_allowed(&self, id: GadgetId) -> bool {
        self.modal()
            .is_none_or(|modal| id == modal || self.is_descendant_of(id, modal))
    }

    /// Check if a gadget would accept focus right now.
    pub fn can_focus(&self, id: GadgetId) -> bool {
        let Some(gadget) = self.gadgets.get(id) else {
            return false;
        };
        gadget.flags.contains(GadgetFlags::CAN_FOCUS)
            && gadget.behavior.accepts_focus()
            && self.is_shown(id)
            && self.is_enabled(id)
            && self.input_allowed(id)
    }

    /// Give a gadget keyboard focus, blurring the previous holder.
    pub fn focus(&mut self, id: GadgetId) -> bool {
        if self.focused() == Some(id) {
            return true;
        }
        if !self.can_focus(id) {
            trace!(?id, "focus refused");
            return false;
        }
        if let Some(previous) = self.focused() {
            self.blur(previous);
        }
        // a Blur listener may have changed the tree
        if !self.can_focus(id) {
            return false;
        }
        self.gadgets[id].flags.insert(GadgetFlags::FOCUSED);
        self.focused = Some(id);
        debug!(?id, "focus");
        self.redraw(id);
        self.raise(id, EventKind::Focus);
        true
    }

    /// Take focus away from a gadget.
    pub fn blur(&mut self, id: GadgetId) -> bool {
        if self.focused() != Some(id) {
            return false;
        }
        self.focused = None;
        self.gadgets[id].flags.remove(GadgetFlags::FOCUSED);
        debug!(?id, "blur");
        self.redraw(id);
        self.raise(id, EventKind::Blur);
        true
    }

    /// Make a gadget modal: input outside its subtree is ignored until it
    /// is popped, closed or destroyed.
    pub fn push_modal(&mut self, id: GadgetId) -> bool {
        if id == self.root || !self.is_shown(id) || self.modal.contains(&id) {
            trace!(?id, "push_modal rejected");
            return false;
        }
        self.release_clicked();
        self.modal.push(id);
        self.gadgets[id].flags.insert(GadgetFlags::MODAL);
        self.raise_to_top(id);
        debug!(?id, depth = self.modal.len(), "modal pushed");

        match self.focused() {
            Some(focused) if self.input_allowed(focused) => {}
            Some(focused) => {
                self.blur(focused);
                self.focus(id);
            }
            None => {
                self.focus(id);
            }
        }
        true
    }

    /// Pop the innermost modal gadget.
    pub fn pop_modal(&mut self) -> Option<GadgetId> {
        let id = self.modal.pop()?;
        if let Some(gadget) = self.gadgets.get_mut(id) {
            gadget.flags.remove(GadgetFlags::MODAL);
        }
        debug!(?id, depth = self.modal.len(), "modal popped");
        Some(id)
    }

    /// Raise `Close` on a gadget, then destroy it.
    pub fn close(&mut self, id: GadgetId) -> bool {
        if id == self.root || !self.is_alive(id) {
            return false;
        }
        self.raise(id, EventKind::Close);
        if self.is_alive(id) {
            self.destroy(id);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::gadget::{Behavior, Border, Gadget, GadgetView};
    use crate::gfx::Graphics;
    use crate::gui::GuiConfig;

    #[derive(Default)]
    struct Probe {
        refuses_focus: bool,
        raises: bool,
        typed: String,
    }

    impl Behavior for Probe {
        fn draw(&self, _gfx: &mut Graphics<'_>, _view: &GadgetView<'_>) {}

        fn accepts_focus(&self) -> bool {
            !self.refuses_focus
        }

        fn raises_on_click(&self) -> bool {
            self.raises
        }

        fn on_key_press(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> Response {
            match code {
                KeyCode::Char(c) => {
                    self.typed.push(c);
                    Response::ValueChanged
                }
                KeyCode::Enter => Response::Activated,
                _ => Response::Ignored,
            }
        }
    }

    fn gui() -> Gui {
        Gui::new(GuiConfig::with_screen(100, 50))
    }

    fn record(gui: &mut Gui, id: GadgetId) -> Rc<RefCell<Vec<EventKind>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        gui.add_listener(id, move |_, event| sink.borrow_mut().push(event.kind))
            .unwrap();
        log
    }

    fn click(gui: &mut Gui, x: i32, y: i32) -> bool {
        let down = gui.handle_input(InputEvent::pointer_down(x, y));
        gui.handle_input(InputEvent::pointer_up(x, y));
        down
    }

    #[test]
    fn test_front_sibling_wins_hit_test() {
        let mut gui = gui();
        let root = gui.root();
        let back = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 20, 20))).unwrap();
        let front = gui.spawn(root, Gadget::plain(Rect::new(10, 10, 20, 20))).unwrap();

        assert_eq!(gui.gadget_at(Point::new(15, 15)), Some(front));
        assert_eq!(gui.gadget_at(Point::new(5, 5)), Some(back));
        assert_eq!(gui.gadget_at(Point::new(50, 40)), Some(root));
        assert_eq!(gui.gadget_at(Point::new(500, 5)), None);

        assert!(gui.handle_input(InputEvent::pointer_down(15, 15)));
        assert_eq!(gui.clicked(), Some(front));
    }

    #[test]
    fn test_hit_test_respects_clipping_and_hidden() {
        let mut gui = gui();
        let root = gui.root();
        let window = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 20, 20))).unwrap();
        let spill = gui.spawn(window, Gadget::plain(Rect::new(15, 0, 20, 5))).unwrap();
        assert_eq!(gui.gadget_at(Point::new(16, 1)), Some(spill));
        assert_eq!(gui.gadget_at(Point::new(25, 1)), Some(root));

        gui.hide(spill);
        assert_eq!(gui.gadget_at(Point::new(16, 1)), Some(window));
    }

    #[test]
    fn test_click_release_inside_raises_action() {
        let mut gui = gui();
        let root = gui.root();
        let button = gui.spawn(root, Gadget::plain(Rect::new(10, 10, 10, 3))).unwrap();
        let log = record(&mut gui, button);

        assert!(click(&mut gui, 12, 11));
        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::Focus,
                EventKind::Click { point: Point::new(12, 11) },
                EventKind::Release { point: Point::new(12, 11) },
                EventKind::Action,
            ]
        );
        assert_eq!(gui.clicked(), None);
        assert_eq!(gui.focused(), Some(button));
    }

    #[test]
    fn test_drag_off_button_releases_outside() {
        let mut gui = gui();
        let root = gui.root();
        let button = gui
            .spawn(root, Gadget::plain(Rect::new(10, 10, 10, 3)).without_flags(GadgetFlags::CAN_FOCUS))
            .unwrap();
        let log = record(&mut gui, button);

        gui.handle_input(InputEvent::pointer_down(15, 11));
        gui.handle_input(InputEvent::pointer_move(25, 11));
        gui.handle_input(InputEvent::pointer_up(25, 11));

        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::Click { point: Point::new(15, 11) },
                EventKind::Drag { point: Point::new(25, 11), vx: 10, vy: 0 },
                EventKind::ReleaseOutside { point: Point::new(25, 11) },
            ]
        );
        assert!(!log.borrow().contains(&EventKind::Action));
        assert_eq!(gui.clicked(), None);
        assert_eq!(gui.rect(button), Some(Rect::new(10, 10, 10, 3)), "not draggable");
    }

    #[test]
    fn test_drag_clamps_to_parent_client() {
        let mut gui = gui();
        let root = gui.root();
        let window = gui
            .spawn(root, Gadget::plain(Rect::new(10, 10, 40, 20)).with_border(Border::uniform(1)))
            .unwrap();
        let knob = gui
            .spawn(window, Gadget::plain(Rect::new(5, 5, 10, 5)).draggable())
            .unwrap();

        gui.handle_input(InputEvent::pointer_down(16, 16));
        assert!(gui.flags(knob).unwrap().contains(GadgetFlags::DRAGGING));

        gui.handle_input(InputEvent::pointer_move(18, 17));
        assert_eq!(gui.rect(knob), Some(Rect::new(7, 6, 10, 5)));

        gui.handle_input(InputEvent::pointer_move(100, 100));
        assert_eq!(gui.rect(knob), Some(Rect::new(29, 14, 10, 5)));
        let client = gui.gadget(window).unwrap().client_rect();
        assert!(client.contains_rect(&gui.rect(knob).unwrap()));

        gui.handle_input(InputEvent::pointer_move(0, 0));
        assert_eq!(gui.rect(knob), Some(Rect::new(1, 1, 10, 5)));

        gui.handle_input(InputEvent::pointer_up(0, 0));
        assert!(!gui.flags(knob).unwrap().contains(GadgetFlags::DRAGGING));
    }

    #[test]
    fn test_drag_moves_before_event() {
        let mut gui = gui();
        let root = gui.root();
        let knob = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 4, 4)).draggable()).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        gui.add_listener(knob, move |gui, event| {
            if matches!(event.kind, EventKind::Drag { .. }) {
                *s.borrow_mut() = gui.rect(event.source);
            }
        });

        gui.handle_input(InputEvent::pointer_down(1, 1));
        gui.handle_input(InputEvent::pointer_move(6, 3));
        assert_eq!(*seen.borrow(), Some(Rect::new(5, 2, 4, 4)));
    }

    #[test]
    fn test_disabled_gadget_swallows_click() {
        let mut gui = gui();
        let root = gui.root();
        let back = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 20, 20))).unwrap();
        let front = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let back_log = record(&mut gui, back);
        gui.disable(front);

        assert!(!gui.handle_input(InputEvent::pointer_down(5, 5)));
        assert_eq!(gui.clicked(), None);
        assert!(back_log.borrow().is_empty());
    }

    #[test]
    fn test_second_press_releases_silently() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let b = gui.spawn(root, Gadget::plain(Rect::new(20, 0, 10, 10))).unwrap();

        gui.handle_input(InputEvent::pointer_down(5, 5));
        let a_log = record(&mut gui, a);
        gui.handle_input(InputEvent::pointer_down(25, 5));

        assert_eq!(gui.clicked(), Some(b));
        assert!(!gui.flags(a).unwrap().contains(GadgetFlags::CLICKED));
        assert_eq!(*a_log.borrow(), vec![EventKind::Blur]);
    }

    #[test]
    fn test_double_click_within_window() {
        let mut gui = gui();
        let root = gui.root();
        let icon = gui
            .spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10)).with_flags(GadgetFlags::DOUBLE_CLICKABLE))
            .unwrap();
        let log = record(&mut gui, icon);
        let point = Point::new(3, 3);
        let start = Instant::now();
        let press = |timestamp| InputEvent::PointerDown { point, timestamp };
        let release = |timestamp| InputEvent::PointerUp { point, timestamp };

        gui.handle_input(press(start));
        gui.handle_input(release(start));
        gui.handle_input(press(start + Duration::from_millis(100)));
        gui.handle_input(release(start + Duration::from_millis(100)));
        let doubles = |log: &[EventKind]| {
            log.iter()
                .filter(|k| matches!(k, EventKind::DoubleClick { .. }))
                .count()
        };
        assert_eq!(doubles(&log.borrow()), 1);

        gui.handle_input(press(start + Duration::from_secs(5)));
        assert_eq!(doubles(&log.borrow()), 1, "too slow");
    }

    #[test]
    fn test_plain_gadget_never_double_clicks() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let log = record(&mut gui, a);
        click(&mut gui, 1, 1);
        click(&mut gui, 1, 1);
        assert!(!log.borrow().iter().any(|k| matches!(k, EventKind::DoubleClick { .. })));
    }

    #[test]
    fn test_raise_on_click_brings_window_forward() {
        let mut gui = gui();
        let root = gui.root();
        let raising = || Probe { raises: true, ..Probe::default() };
        let back = gui.spawn(root, Gadget::new(Rect::new(0, 0, 20, 20), raising())).unwrap();
        let front = gui.spawn(root, Gadget::new(Rect::new(10, 10, 20, 20), raising())).unwrap();
        let inner = gui.spawn(back, Gadget::plain(Rect::new(1, 1, 5, 5))).unwrap();

        click(&mut gui, 2, 2);
        assert_eq!(gui.children(root), &[front, back]);
        assert_eq!(gui.focused(), Some(inner));
    }

    #[test]
    fn test_focus_refusals() {
        let mut gui = gui();
        let root = gui.root();
        let label = gui
            .spawn(root, Gadget::new(Rect::new(0, 0, 5, 1), Probe { refuses_focus: true, ..Probe::default() }))
            .unwrap();
        let fixed = gui
            .spawn(root, Gadget::plain(Rect::new(0, 2, 5, 1)).without_flags(GadgetFlags::CAN_FOCUS))
            .unwrap();
        let hidden = gui.spawn(root, Gadget::plain(Rect::new(0, 4, 5, 1))).unwrap();
        let disabled = gui.spawn(root, Gadget::plain(Rect::new(0, 6, 5, 1))).unwrap();
        let stale = gui.spawn(root, Gadget::plain(Rect::new(0, 8, 5, 1))).unwrap();
        gui.hide(hidden);
        gui.disable(disabled);
        gui.destroy(stale);

        for id in [root, label, fixed, hidden, disabled, stale] {
            assert!(!gui.focus(id));
        }
        assert_eq!(gui.focused(), None);

        // clicking a gadget that refuses focus leaves focus alone
        let field = gui.spawn(root, Gadget::plain(Rect::new(10, 0, 5, 1))).unwrap();
        assert!(gui.focus(field));
        click(&mut gui, 1, 0);
        assert_eq!(gui.focused(), Some(field));
    }

    #[test]
    fn test_focus_transfer_blurs_first() {
        let mut gui = gui();
        let root = gui.root();
        let a = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 5, 1))).unwrap();
        let b = gui.spawn(root, Gadget::plain(Rect::new(0, 2, 5, 1))).unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in [a, b] {
            let o = order.clone();
            gui.add_listener(id, move |_, event| o.borrow_mut().push((event.source, event.kind)));
        }

        assert!(gui.focus(a));
        assert!(gui.focus(a));
        assert!(gui.focus(b));
        assert_eq!(
            *order.borrow(),
            vec![(a, EventKind::Focus), (a, EventKind::Blur), (b, EventKind::Focus)]
        );
        assert!(gui.flags(b).unwrap().contains(GadgetFlags::FOCUSED));
        assert!(!gui.flags(a).unwrap().contains(GadgetFlags::FOCUSED));
        assert!(!gui.blur(a));
    }

    #[test]
    fn test_destroying_focused_clears_slot() {
        let mut gui = gui();
        let root = gui.root();
        let window = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 20, 20))).unwrap();
        let field = gui.spawn(window, Gadget::plain(Rect::new(1, 1, 10, 1))).unwrap();
        assert!(gui.focus(field));

        gui.destroy(window);
        assert_eq!(gui.focused(), None);
        assert!(!gui.handle_input(InputEvent::key_down(KeyCode::Char('x'))));
    }

    #[test]
    fn test_hiding_focused_blurs() {
        let mut gui = gui();
        let root = gui.root();
        let field = gui.spawn(root, Gadget::plain(Rect::new(1, 1, 10, 1))).unwrap();
        let log = record(&mut gui, field);
        gui.focus(field);
        gui.hide(field);
        assert_eq!(gui.focused(), None);
        assert_eq!(*log.borrow(), vec![EventKind::Focus, EventKind::Blur, EventKind::Hide]);
    }

    #[test]
    fn test_keys_reach_focused_behavior() {
        let mut gui = gui();
        let root = gui.root();
        let field = gui.spawn(root, Gadget::new(Rect::new(0, 0, 10, 1), Probe::default())).unwrap();
        let log = record(&mut gui, field);
        gui.focus(field);
        log.borrow_mut().clear();

        assert!(gui.handle_input(InputEvent::key_down(KeyCode::Char('h'))));
        assert!(gui.handle_input(InputEvent::key_up(KeyCode::Char('h'))));
        assert!(gui.handle_input(InputEvent::key_down(KeyCode::Enter)));
        assert!(gui.handle_input(InputEvent::key_down(KeyCode::Esc)));

        let none = KeyModifiers::NONE;
        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::KeyPress { code: KeyCode::Char('h'), modifiers: none },
                EventKind::ValueChange,
                EventKind::KeyRelease { code: KeyCode::Char('h'), modifiers: none },
                EventKind::KeyPress { code: KeyCode::Enter, modifiers: none },
                EventKind::Action,
                EventKind::KeyPress { code: KeyCode::Esc, modifiers: none },
            ]
        );
        assert_eq!(gui.behavior::<Probe>(field).unwrap().typed, "h");
    }

    #[test]
    fn test_modal_blocks_outside_input() {
        let mut gui = gui();
        let root = gui.root();
        let main = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 50, 50))).unwrap();
        let field = gui.spawn(main, Gadget::plain(Rect::new(1, 1, 10, 1))).unwrap();
        let dialog = gui.spawn(root, Gadget::plain(Rect::new(20, 20, 20, 10))).unwrap();
        let ok = gui.spawn(dialog, Gadget::plain(Rect::new(1, 1, 4, 1))).unwrap();
        gui.focus(field);
        let main_log = record(&mut gui, main);

        assert!(gui.push_modal(dialog));
        assert!(!gui.push_modal(dialog));
        assert_eq!(gui.modal(), Some(dialog));
        assert_eq!(gui.focused(), Some(dialog));
        assert!(gui.flags(dialog).unwrap().contains(GadgetFlags::MODAL));

        assert!(!gui.handle_input(InputEvent::pointer_down(5, 5)));
        assert!(main_log.borrow().is_empty());
        assert!(!gui.focus(field));
        assert!(click(&mut gui, 21, 21));
        assert_eq!(gui.focused(), Some(ok));

        assert_eq!(gui.pop_modal(), Some(dialog));
        assert!(gui.handle_input(InputEvent::pointer_down(5, 5)));
        assert_eq!(gui.clicked(), Some(main));
    }

    #[test]
    fn test_nested_modals_and_destroy() {
        let mut gui = gui();
        let root = gui.root();
        let outer = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 40, 40))).unwrap();
        let inner = gui.spawn(root, Gadget::plain(Rect::new(50, 0, 20, 20))).unwrap();
        gui.push_modal(outer);
        gui.push_modal(inner);
        assert_eq!(gui.gadget_at(Point::new(5, 5)), None);

        gui.destroy(inner);
        assert_eq!(gui.modal(), Some(outer));
        assert_eq!(gui.gadget_at(Point::new(5, 5)), Some(outer));
    }

    #[test]
    fn test_close_raises_then_destroys() {
        let mut gui = gui();
        let root = gui.root();
        let window = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let alive_on_close = Rc::new(RefCell::new(false));
        let a = alive_on_close.clone();
        gui.add_listener(window, move |gui, event| {
            if event.kind == EventKind::Close {
                *a.borrow_mut() = gui.is_alive(event.source);
            }
        });

        assert!(gui.close(window));
        assert!(*alive_on_close.borrow());
        assert!(!gui.is_alive(window));
        assert!(!gui.close(window));
        assert!(!gui.close(root));
    }

    #[test]
    fn test_listener_destroys_source_mid_click() {
        let mut gui = gui();
        let root = gui.root();
        let button = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        gui.add_listener(button, |gui, event| {
            if matches!(event.kind, EventKind::Click { .. }) {
                gui.destroy(event.source);
            }
        });

        assert!(gui.handle_input(InputEvent::pointer_down(1, 1)));
        assert!(!gui.is_alive(button));
        assert_eq!(gui.clicked(), None);
        assert_eq!(gui.focused(), None);
        assert!(!gui.handle_input(InputEvent::pointer_move(3, 3)));
        assert!(!gui.handle_input(InputEvent::pointer_up(3, 3)));
    }

    #[test]
    fn test_focus_listener_destroys_source_mid_click() {
        let mut gui = gui();
        let root = gui.root();
        let button = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let log = record(&mut gui, button);
        gui.add_listener(button, |gui, event| {
            if event.kind == EventKind::Focus {
                gui.destroy(event.source);
            }
        });

        assert!(gui.handle_input(InputEvent::pointer_down(1, 1)));
        assert!(!gui.is_alive(button));
        assert_eq!(*log.borrow(), vec![EventKind::Focus]);
        assert_eq!(gui.clicked(), None);
        assert_eq!(gui.focused(), None);
        assert!(!gui.handle_input(InputEvent::pointer_up(1, 1)));
    }

    #[test]
    fn test_blur_listener_destroys_clicked_ancestor() {
        let mut gui = gui();
        let root = gui.root();
        let field = gui.spawn(root, Gadget::plain(Rect::new(50, 0, 10, 1))).unwrap();
        let panel = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 20, 20))).unwrap();
        let inner = gui.spawn(panel, Gadget::plain(Rect::new(2, 2, 5, 5))).unwrap();
        assert!(gui.focus(field));
        gui.add_listener(field, move |gui, event| {
            if event.kind == EventKind::Blur {
                gui.destroy(panel);
            }
        });

        assert!(gui.handle_input(InputEvent::pointer_down(3, 3)));
        assert!(!gui.is_alive(inner));
        assert!(!gui.is_alive(panel));
        assert_eq!(gui.clicked(), None);
        assert_eq!(gui.focused(), None);
        assert!(gui.is_alive(field));
    }

    #[test]
    fn test_tick_drains_queue_in_order() {
        let mut gui = gui();
        let root = gui.root();
        let button = gui.spawn(root, Gadget::plain(Rect::new(0, 0, 10, 10))).unwrap();
        let log = record(&mut gui, button);
        let sender = gui.input_sender();
        sender.send(InputEvent::pointer_down(2, 2)).unwrap();
        sender.send(InputEvent::pointer_up(2, 2)).unwrap();

        let mut buffer = crate::buffer::Buffer::new(100, 50);
        let stats = gui.tick(&mut buffer);
        assert_eq!(stats.events, 2);
        assert!(!stats.painted.is_empty());
        assert_eq!(log.borrow().last(), Some(&EventKind::Action));

        let stats = gui.tick(&mut buffer);
        assert_eq!(stats.events, 0);
        assert!(stats.painted.is_empty());
    }
}
