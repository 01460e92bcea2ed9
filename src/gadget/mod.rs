//! Gadget module: Nodes of the UI tree and the contracts they expose.
//!
//! - [`Gadget`]: geometry, flags, parent/child links, behaviour, listeners
//! - [`GadgetId`]: generational handle into the application's arena
//! - [`Behavior`]: draw/focus/key capability with default behaviour
//! - [`Event`]: semantic events delivered to listeners

mod behavior;
mod event;
mod flags;
mod node;
mod style;

pub use behavior::{Behavior, GadgetView, Plain, Response};
pub use event::{Event, EventKind};
pub use flags::GadgetFlags;
pub use node::Gadget;
pub(crate) use node::SharedListener;
pub use style::{Border, Style};

slotmap::new_key_type! {
    /// Handle of a gadget inside a [`crate::Gui`].
    ///
    /// Handles are generational: once a gadget is destroyed its handle never
    /// resolves again, even if the slot is reused.
    pub struct GadgetId;
}
