//! Kindle GUI - widgets drawn by the compositor and driven by input
//!
//! A widget is both a [`Renderer`](kindle_render::Renderer) and an
//! [`InputDevice`](kindle_runtime::InputDevice). [`attach`] registers one
//! shared instance with both.

mod bounds;
mod button;
mod object;
mod panel;

pub use bounds::Bounds;
pub use button::{Button, ButtonStyle};
pub use object::{attach, detach, GuiObject};
pub use panel::Panel;
