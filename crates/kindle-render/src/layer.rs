//! Ordered drawing layers

use crate::canvas::Canvas;
use crate::renderer::{RenderEvent, RendererHandle};
use kindle_core::{KindleError, Result, Size};
use std::sync::Arc;

/// One depth position in a layer set: renderers painted together, in
/// registration order
pub struct Layer {
    index: usize,
    size: Size,
    renderers: Vec<RendererHandle>,
}

impl Layer {
    fn new(index: usize, size: Size) -> Self {
        Self {
            index,
            size,
            renderers: Vec::new(),
        }
    }

    /// Position of this layer in its set (0 = bottom)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Register a renderer at the end of this layer. Returns false if the same
    /// handle is already registered here.
    pub fn add(&mut self, renderer: RendererHandle) -> bool {
        if self.contains(&renderer) {
            return false;
        }
        self.renderers.push(renderer);
        true
    }

    /// Unregister a renderer. Returns false if it was not registered here.
    pub fn remove(&mut self, renderer: &RendererHandle) -> bool {
        let before = self.renderers.len();
        self.renderers.retain(|r| !Arc::ptr_eq(r, renderer));
        self.renderers.len() != before
    }

    pub fn contains(&self, renderer: &RendererHandle) -> bool {
        self.renderers.iter().any(|r| Arc::ptr_eq(r, renderer))
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn clear(&mut self) {
        self.renderers.clear();
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Invoke every renderer in registration order
    pub fn render(&self, canvas: &mut Canvas) {
        let mut event = RenderEvent::new(canvas, self.index);
        for renderer in &self.renderers {
            renderer.render(&mut event);
        }
    }
}

/// A fixed number of layers, painted bottom (index 0) to top
pub struct LayerSet {
    layers: Vec<Layer>,
}

impl LayerSet {
    pub fn new(count: usize, size: Size) -> Self {
        Self {
            layers: (0..count).map(|i| Layer::new(i, size)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Register a renderer on a layer. Returns `Ok(false)` if it was already
    /// registered on that layer.
    pub fn add(&mut self, layer: usize, renderer: RendererHandle) -> Result<bool> {
        let count = self.layers.len();
        let target = self
            .layers
            .get_mut(layer)
            .ok_or(KindleError::LayerOutOfRange { index: layer, count })?;
        Ok(target.add(renderer))
    }

    /// Unregister a renderer from one layer. Unknown layers and renderers
    /// report false.
    pub fn remove(&mut self, layer: usize, renderer: &RendererHandle) -> bool {
        self.layers
            .get_mut(layer)
            .is_some_and(|l| l.remove(renderer))
    }

    /// Unregister a renderer from every layer, returning how many layers held it
    pub fn remove_everywhere(&mut self, renderer: &RendererHandle) -> usize {
        self.layers
            .iter_mut()
            .filter_map(|l| l.remove(renderer).then_some(()))
            .count()
    }

    /// Unregister all renderers; the layers themselves remain
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Propagate new surface dimensions to every layer
    pub fn resize_layers(&mut self, size: Size) {
        for layer in &mut self.layers {
            layer.resize(size);
        }
    }

    /// Paint all layers in ascending order
    pub fn render(&self, canvas: &mut Canvas) {
        for layer in &self.layers {
            layer.render(canvas);
        }
    }
}
