//! Gui: The application root.
//!
//! The `Gui` owns every gadget (in a generational arena), the single-slot
//! focus/clicked state, the modal stack, the pending damage list, and the
//! platform input queue. Tree mutation, clipping and dispatch are split
//! across the sibling modules as further `impl Gui` blocks.

use std::any::Any;
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender};
use slotmap::SlotMap;

use super::GuiConfig;
use crate::gadget::{Behavior, Gadget, GadgetFlags, GadgetId};
use crate::gfx::Surface;
use crate::input::InputEvent;
use crate::layout::{Point, Rect};

/// A pending repaint: the subtree of `id`, limited to `rect` (absolute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Damage {
    pub(crate) id: GadgetId,
    pub(crate) rect: Rect,
}

/// Statistics for one [`Gui::tick`].
#[derive(Debug, Clone, Default)]
pub struct TickStats {
    /// Input events dispatched.
    pub events: usize,
    /// Absolute rectangles repainted, in paint order.
    pub painted: Vec<Rect>,
}

/// The application root: gadget tree, input state and redraw queue.
pub struct Gui {
    pub(crate) gadgets: SlotMap<GadgetId, Gadget>,
    pub(crate) root: GadgetId,
    pub(crate) config: GuiConfig,
    pub(crate) focused: Option<GadgetId>,
    pub(crate) clicked: Option<GadgetId>,
    pub(crate) modal: Vec<GadgetId>,
    /// Last pointer position while a gadget is clicked.
    pub(crate) pointer: Option<Point>,
    /// Previous click, for double-click detection.
    pub(crate) last_click: Option<(GadgetId, Instant)>,
    pub(crate) damage: Vec<Damage>,
    pub(crate) next_listener: u64,
    input_tx: Sender<InputEvent>,
    input_rx: Receiver<InputEvent>,
}

impl Gui {
    /// Create an application with a root gadget covering the screen.
    pub fn new(config: GuiConfig) -> Self {
        let (input_tx, input_rx) = bounded(config.input_queue_capacity.max(1));
        let mut gadgets = SlotMap::with_key();
        let mut root = Gadget::plain(Rect::from_size(config.screen_width, config.screen_height))
            .with_flags(GadgetFlags::BORDERLESS)
            .without_flags(GadgetFlags::CAN_FOCUS);
        root.style = Some(config.style);
        let root = gadgets.insert(root);

        let mut gui = Self {
            gadgets,
            root,
            config,
            focused: None,
            clicked: None,
            modal: Vec::new(),
            pointer: None,
            last_click: None,
            damage: Vec::new(),
            next_listener: 0,
            input_tx,
            input_rx,
        };
        gui.redraw(root);
        gui
    }

    /// The root gadget (the whole screen).
    #[inline]
    pub const fn root(&self) -> GadgetId {
        self.root
    }

    /// The configuration.
    #[inline]
    pub const fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// The screen rectangle.
    pub fn screen(&self) -> Rect {
        self.gadgets[self.root].rect
    }

    /// Look up a gadget.
    #[inline]
    pub fn gadget(&self, id: GadgetId) -> Option<&Gadget> {
        self.gadgets.get(id)
    }

    /// Check if `id` still refers to a live gadget.
    #[inline]
    pub fn is_alive(&self, id: GadgetId) -> bool {
        self.gadgets.contains_key(id)
    }

    /// Number of live gadgets, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.gadgets.len()
    }

    /// Always false: the root is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gadgets.is_empty()
    }

    /// Flags of a gadget.
    pub fn flags(&self, id: GadgetId) -> Option<GadgetFlags> {
        self.gadgets.get(id).map(Gadget::flags)
    }

    /// The focused gadget, if any.
    pub fn focused(&self) -> Option<GadgetId> {
        self.focused.filter(|id| self.is_alive(*id))
    }

    /// The clicked gadget, if any.
    pub fn clicked(&self) -> Option<GadgetId> {
        self.clicked.filter(|id| self.is_alive(*id))
    }

    /// The innermost modal gadget, if any.
    pub fn modal(&self) -> Option<GadgetId> {
        self.modal.last().copied()
    }

    /// Borrow a gadget's behaviour as its concrete type.
    pub fn behavior<T: Behavior>(&self, id: GadgetId) -> Option<&T> {
        let behavior: &dyn Any = &*self.gadgets.get(id)?.behavior;
        behavior.downcast_ref::<T>()
    }

    /// Mutate a gadget's behaviour as its concrete type, then redraw it.
    pub fn update_behavior<T: Behavior, R>(
        &mut self,
        id: GadgetId,
        update: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let behavior: &mut dyn Any = &mut *self.gadgets.get_mut(id)?.behavior;
        let result = update(behavior.downcast_mut::<T>()?);
        self.redraw(id);
        Some(result)
    }

    /// A sender platform threads can feed input through.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input_tx.clone()
    }

    /// Queue an input event from the core thread.
    ///
    /// Returns `false` if the queue is full.
    pub fn queue_input(&self, event: InputEvent) -> bool {
        self.input_tx.try_send(event).is_ok()
    }

    /// Drain queued input, dispatch it in order, then render the damage.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> TickStats {
        let mut events = 0;
        while let Ok(event) = self.input_rx.try_recv() {
            self.handle_input(event);
            events += 1;
        }
        let painted = self.render(surface);
        TickStats { events, painted }
    }
}

impl std::fmt::Debug for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gui")
            .field("gadgets", &self.gadgets.len())
            .field("focused", &self.focused)
            .field("clicked", &self.clicked)
            .field("modal", &self.modal)
            .field("damage", &self.damage.len())
            .finish_non_exhaustive()
    }
}
