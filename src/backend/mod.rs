//! Backend module: crossterm platform adapter.
//!
//! The core never polls hardware. This adapter is an optional consumer:
//!
//! - [`InputPump`]: input thread feeding the [`crate::Gui`] input queue
//! - [`Presenter`]: writes damaged rectangles of a [`crate::Buffer`] out
//! - [`TerminalGuard`]: raw mode / alternate screen session

mod input;
mod output;
mod terminal;

pub use input::{convert_event, InputPump};
pub use output::Presenter;
pub use terminal::TerminalGuard;
