//! The renderer capability and the per-layer render event

use crate::canvas::Canvas;
use std::sync::Arc;

/// Context handed to each renderer during a render pass
///
/// Lives only for the duration of one layer's dispatch; renderers must not
/// try to keep it.
pub struct RenderEvent<'a> {
    canvas: &'a mut Canvas,
    layer: usize,
}

impl<'a> RenderEvent<'a> {
    pub fn new(canvas: &'a mut Canvas, layer: usize) -> Self {
        Self { canvas, layer }
    }

    /// The shared drawing surface
    pub fn context(&mut self) -> &mut Canvas {
        self.canvas
    }

    /// Index of the layer currently being painted (0 = bottom)
    pub fn layer_index(&self) -> usize {
        self.layer
    }
}

/// Something that can paint itself onto a canvas
///
/// Renderers are shared between their owning game object and the layer they
/// are registered in, so `render` takes `&self`; keep mutable state behind
/// interior mutability.
pub trait Renderer: Send + Sync {
    fn render(&self, event: &mut RenderEvent<'_>);
}

/// Shared handle to a registered renderer
pub type RendererHandle = Arc<dyn Renderer>;
