//! Kindle Render - layered 2D compositing
//!
//! Game objects implement [`Renderer`] and register themselves on one of the
//! layers of a [`LayerCompositor`]. Each repaint runs one render pass that
//! clears the [`Canvas`] and paints layers bottom to top; a [`Presenter`]
//! then shows the canvas in a window through wgpu.

mod canvas;
mod compositor;
mod layer;
mod present;
mod renderer;
mod shapes;
mod sprite;

pub use canvas::Canvas;
pub use compositor::{LayerCompositor, LayerSetGuard};
pub use layer::{Layer, LayerSet};
pub use present::Presenter;
pub use renderer::{RenderEvent, Renderer, RendererHandle};
pub use shapes::{RectRenderer, SpriteRenderer};
pub use sprite::Sprite;
