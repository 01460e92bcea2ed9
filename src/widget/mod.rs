//! Stock gadgets: Behaviours for the common kinds of gadget.
//!
//! Each widget is a [`crate::Behavior`] plus a `spawn` helper that builds the
//! gadget (and any decoration children) and adds it to a parent.
//!
//! # Example
//!
//! ```rust
//! use gadgetry::widget::{Button, Window, WindowConfig};
//! use gadgetry::{Gui, GuiConfig, Rect};
//!
//! let mut gui = Gui::new(GuiConfig::with_screen(80, 24));
//! let root = gui.root();
//! let window = Window::spawn(&mut gui, root, Rect::new(2, 2, 30, 10), WindowConfig::titled("Hello"))
//!     .expect("root is alive");
//! let ok = Button::spawn(&mut gui, window, Rect::new(2, 6, 8, 1), "OK").expect("window is alive");
//! gui.add_listener(ok, move |gui, _event| {
//!     gui.close(window);
//! });
//! ```

mod button;
mod label;
mod screen;
mod text_box;
mod window;

pub use button::{Button, GlyphButton};
pub use label::{Align, Label};
pub use screen::{Screen, ScreenConfig};
pub use text_box::{TextBox, TextBoxConfig};
pub use window::{Window, WindowConfig};
