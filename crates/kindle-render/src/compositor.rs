//! Layer compositor: one render pass over every layer into one canvas

use crate::canvas::Canvas;
use crate::layer::LayerSet;
use kindle_core::{Color, Size};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Scene {
    canvas: Canvas,
    layers: LayerSet,
}

/// Owns the layers and the canvas for a single window surface
///
/// The canvas and the layers sit behind one lock, so a render pass, a resize
/// and a [`layer_set`](Self::layer_set) guard never overlap. Size, layer count
/// and background are readable without that lock and may be queried while the
/// guard is held. Renderers must not call back into the compositor while
/// rendering.
pub struct LayerCompositor {
    scene: Mutex<Scene>,
    layer_count: usize,
    /// Width in the high half, height in the low half
    size: AtomicU64,
    background: AtomicU32,
}

/// Exclusive access to a compositor's layers
///
/// Render passes and resizes wait until the guard is dropped. Do not call
/// [`LayerCompositor::render_pass`], [`LayerCompositor::resize`] or
/// [`LayerCompositor::with_canvas`] on the same thread while holding it.
pub struct LayerSetGuard<'a> {
    scene: MutexGuard<'a, Scene>,
}

impl Deref for LayerSetGuard<'_> {
    type Target = LayerSet;

    fn deref(&self) -> &LayerSet {
        &self.scene.layers
    }
}

impl DerefMut for LayerSetGuard<'_> {
    fn deref_mut(&mut self) -> &mut LayerSet {
        &mut self.scene.layers
    }
}

fn pack_size(size: Size) -> u64 {
    (u64::from(size.width) << 32) | u64::from(size.height)
}

fn unpack_size(packed: u64) -> Size {
    Size::new((packed >> 32) as u32, packed as u32)
}

impl LayerCompositor {
    /// Create a compositor with `layer_count` empty layers and a black background
    pub fn new(size: Size, layer_count: usize) -> Self {
        Self::with_background(size, layer_count, Color::BLACK)
    }

    pub fn with_background(size: Size, layer_count: usize, background: Color) -> Self {
        log::debug!("Creating compositor: {size}, {layer_count} layers");
        Self {
            scene: Mutex::new(Scene {
                canvas: Canvas::new(size),
                layers: LayerSet::new(layer_count, size),
            }),
            layer_count,
            size: AtomicU64::new(pack_size(size)),
            background: AtomicU32::new(bytemuck::cast(background)),
        }
    }

    // A renderer panic poisons the lock mid-pass; the next pass clears the
    // canvas anyway, so the state is still usable.
    fn scene(&self) -> MutexGuard<'_, Scene> {
        self.scene.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutable access to the layers for registering renderers
    pub fn layer_set(&self) -> LayerSetGuard<'_> {
        LayerSetGuard {
            scene: self.scene(),
        }
    }

    /// Run `f` with the layers locked
    pub fn with_layer_set<R>(&self, f: impl FnOnce(&mut LayerSet) -> R) -> R {
        f(&mut self.layer_set())
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn size(&self) -> Size {
        unpack_size(self.size.load(Ordering::Relaxed))
    }

    pub fn background(&self) -> Color {
        bytemuck::cast(self.background.load(Ordering::Relaxed))
    }

    /// Takes effect from the next render pass
    pub fn set_background(&self, color: Color) {
        self.background.store(bytemuck::cast(color), Ordering::Relaxed);
    }

    /// Clear the canvas to the background color, then paint every layer
    /// bottom to top. A panicking renderer is not caught.
    pub fn render_pass(&self) {
        let mut scene = self.scene();
        let Scene { canvas, layers } = &mut *scene;
        canvas.clear(self.background());
        layers.render(canvas);
    }

    /// Resize the canvas and every layer
    pub fn resize(&self, size: Size) {
        let mut scene = self.scene();
        if scene.canvas.size() == size {
            return;
        }
        log::debug!("Resizing compositor to {size}");
        scene.canvas.resize(size);
        scene.layers.resize_layers(size);
        self.size.store(pack_size(size), Ordering::Relaxed);
    }

    /// Read the composited pixels, e.g. to present them
    pub fn with_canvas<R>(&self, f: impl FnOnce(&Canvas) -> R) -> R {
        let scene = self.scene();
        f(&scene.canvas)
    }
}
