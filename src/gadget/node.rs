//! Gadget: One node of the gadget tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{Behavior, Border, GadgetFlags, GadgetId, Plain, Style};
use crate::gui::{Gui, ListenerId};
use crate::layout::{Point, Rect};
use crate::Event;

/// A listener shared between the gadget and an in-progress delivery.
pub(crate) type SharedListener = Rc<RefCell<dyn FnMut(&mut Gui, &Event)>>;

/// A node of the gadget tree.
///
/// Build one with [`Gadget::new`] and the `with_*` methods, then hand it to
/// [`Gui::insert`] or [`Gui::spawn`]. Once inside the tree it is addressed
/// by its [`GadgetId`].
pub struct Gadget {
    /// Bounds relative to the parent's origin.
    pub(crate) rect: Rect,
    pub(crate) flags: GadgetFlags,
    /// Non-owning back-reference.
    pub(crate) parent: Option<GadgetId>,
    /// Owned children, back (index 0) to front.
    pub(crate) children: Vec<GadgetId>,
    pub(crate) border: Border,
    /// `None` until inserted, then the application default applies.
    pub(crate) style: Option<Style>,
    pub(crate) behavior: Box<dyn Behavior>,
    pub(crate) listeners: Vec<(ListenerId, SharedListener)>,
    /// Pointer offset from the gadget origin when a drag started.
    pub(crate) drag_anchor: Point,
}

impl Gadget {
    /// Create a gadget with the given parent-relative bounds and behaviour.
    pub fn new(rect: Rect, behavior: impl Behavior) -> Self {
        Self {
            rect,
            flags: GadgetFlags::default(),
            parent: None,
            children: Vec::new(),
            border: Border::NONE,
            style: None,
            behavior: Box::new(behavior),
            listeners: Vec::new(),
            drag_anchor: Point::ZERO,
        }
    }

    /// A [`Plain`] gadget.
    pub fn plain(rect: Rect) -> Self {
        Self::new(rect, Plain)
    }

    /// Builder: add flags.
    #[must_use]
    pub fn with_flags(mut self, flags: GadgetFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Builder: remove flags.
    #[must_use]
    pub fn without_flags(mut self, flags: GadgetFlags) -> Self {
        self.flags.remove(flags);
        self
    }

    /// Builder: make the gadget follow drags.
    #[must_use]
    pub fn draggable(self) -> Self {
        self.with_flags(GadgetFlags::DRAGGABLE)
    }

    /// Builder: mark the gadget as parent chrome.
    #[must_use]
    pub fn decoration(self) -> Self {
        self.with_flags(GadgetFlags::DECORATION)
    }

    /// Builder: set the border insets.
    #[must_use]
    pub const fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Builder: set the palette.
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Parent-relative bounds.
    #[inline]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Current flags.
    #[inline]
    pub const fn flags(&self) -> GadgetFlags {
        self.flags
    }

    /// The parent, if attached.
    #[inline]
    pub const fn parent(&self) -> Option<GadgetId> {
        self.parent
    }

    /// Children, back to front.
    #[inline]
    pub fn children(&self) -> &[GadgetId] {
        &self.children
    }

    /// Client area in local coordinates.
    pub fn client_rect(&self) -> Rect {
        let local = Rect::from_size(self.rect.width, self.rect.height);
        if self.flags.contains(GadgetFlags::BORDERLESS) {
            local
        } else {
            local.inset(self.border.left, self.border.top, self.border.right, self.border.bottom)
        }
    }

    pub(crate) const fn is_hidden(&self) -> bool {
        self.flags.contains(GadgetFlags::HIDDEN)
    }

    pub(crate) const fn is_decoration(&self) -> bool {
        self.flags.contains(GadgetFlags::DECORATION)
    }
}

impl fmt::Debug for Gadget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gadget")
            .field("rect", &self.rect)
            .field("flags", &self.flags)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
