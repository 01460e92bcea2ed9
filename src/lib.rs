//! # Gadgetry
//!
//! A retained-mode gadget toolkit core with region-based clipping.
//!
//! Gadgetry keeps a tree of rectangular gadgets, works out which part of each
//! one is actually visible, repaints only damaged regions, and routes pointer
//! and key input to the right gadget as semantic events.
//!
//! ## Core Concepts
//!
//! - **Gadget tree**: gadgets live in an arena owned by [`Gui`] and are
//!   addressed by generational [`GadgetId`]s; a parent owns its children
//! - **Clip regions**: a gadget's visible area is its bounds minus everything
//!   above it, as a set of disjoint rectangles
//! - **Damage**: tree changes queue repaints; [`Gui::render`] draws each
//!   gadget once per visible rectangle through a clipped [`Graphics`] port
//! - **Dispatch**: front-to-back hit testing, click/drag/release, focus,
//!   modal stacking and listener delivery
//!
//! ## Example
//!
//! ```rust
//! use gadgetry::{Buffer, Gadget, Gui, GuiConfig, InputEvent, Rect};
//!
//! let mut gui = Gui::new(GuiConfig::with_screen(80, 24));
//! let root = gui.root();
//! let panel = gui.spawn(root, Gadget::plain(Rect::new(10, 5, 20, 8))).unwrap();
//!
//! gui.handle_input(InputEvent::pointer_down(12, 6));
//! assert_eq!(gui.clicked(), Some(panel));
//!
//! let mut buffer = Buffer::new(80, 24);
//! let painted = gui.render(&mut buffer);
//! assert!(!painted.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod buffer;
pub mod gadget;
pub mod gfx;
pub mod gui;
pub mod input;
pub mod layout;
pub mod widget;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use gadget::{
    Behavior, Border, Event, EventKind, Gadget, GadgetFlags, GadgetId, GadgetView, Plain,
    Response, Style,
};
pub use gfx::{Bevel, Bitmap, Graphics, Surface};
pub use gui::{Gui, GuiConfig, ListenerId, TickStats};
pub use input::{InputEvent, KeyCode, KeyModifiers};
pub use layout::{ClipRegion, Point, Rect};
