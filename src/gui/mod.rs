//! Gui module: The application root and everything that operates on the tree.
//!
//! - [`Gui`]: owns the gadget arena, focus/clicked/modal slots, damage queue
//! - tree operations: add/remove/destroy, geometry, z-order, visibility
//! - clipping: visible and draw regions, rendering queued damage
//! - dispatch: pointer and key input, focus, modal stack
//! - listeners: registration and synchronous event delivery

mod app;
mod clip;
mod config;
mod dispatch;
mod listeners;
mod tree;

pub use app::{Gui, TickStats};
pub use config::GuiConfig;
pub use listeners::ListenerId;
