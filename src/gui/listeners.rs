//! Listener registry and synchronous event delivery.
//!
//! Listeners get `&mut Gui` and may do anything to the tree, including
//! destroying the gadget that raised the event. Delivery works from a
//! snapshot of the listener list and re-validates before every call.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use super::Gui;
use crate::gadget::{Event, EventKind, GadgetId, SharedListener};

/// Handle for removing a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl Gui {
    /// Register a listener for events raised by `id`.
    ///
    /// Listeners run in registration order. A listener added while an event
    /// is being delivered is first called for the next event.
    pub fn add_listener<F>(&mut self, id: GadgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &Event) + 'static,
    {
        let gadget = self.gadgets.get_mut(id)?;
        self.next_listener += 1;
        let handle = ListenerId(self.next_listener);
        let shared: SharedListener = Rc::new(RefCell::new(listener));
        gadget.listeners.push((handle, shared));
        Some(handle)
    }

    /// Unregister a listener.
    ///
    /// Removing a listener during delivery stops it from being called for
    /// the rest of that delivery.
    pub fn remove_listener(&mut self, id: GadgetId, listener: ListenerId) -> bool {
        let Some(gadget) = self.gadgets.get_mut(id) else {
            return false;
        };
        let before = gadget.listeners.len();
        gadget.listeners.retain(|(handle, _)| *handle != listener);
        gadget.listeners.len() != before
    }

    /// Raise an event on `source` and deliver it to its listeners.
    ///
    /// Returns `true` if at least one listener ran. Delivery stops as soon
    /// as the source is destroyed.
    pub fn raise(&mut self, source: GadgetId, kind: EventKind) -> bool {
        let Some(gadget) = self.gadgets.get(source) else {
            return false;
        };
        if gadget.listeners.is_empty() {
            return false;
        }
        let snapshot: Vec<_> = gadget.listeners.clone();
        let event = Event::new(source, kind);
        trace!(?source, ?kind, listeners = snapshot.len(), "raise");

        let mut delivered = false;
        for (handle, listener) in snapshot {
            if !self.is_registered(source, handle) {
                continue;
            }
            // A listener that raises the same event again does not recurse
            // into itself.
            let Ok(mut callback) = listener.try_borrow_mut() else {
                trace!(?source, ?handle, "re-entrant listener skipped");
                continue;
            };
            (&mut *callback)(self, &event);
            delivered = true;
        }
        delivered
    }

    fn is_registered(&self, source: GadgetId, handle: ListenerId) -> bool {
        self.gadgets
            .get(source)
            .is_some_and(|g| g.listeners.iter().any(|(h, _)| *h == handle))
    }
}
