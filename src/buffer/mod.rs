//! Framebuffer: the [`crate::gfx::Surface`] used by the terminal backend.
//!
//! [`Buffer`] is a grid of [`Cell`]s; each cell carries [`Rgb`] colours and
//! [`Modifiers`].

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use buffer::Buffer;
pub use cell::{Cell, Modifiers, Rgb};
