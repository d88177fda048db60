//! The widget capability and registration helpers

use crate::bounds::Bounds;
use kindle_core::Result;
use kindle_render::{LayerSet, Renderer, RendererHandle};
use kindle_runtime::{InputDevice, InputManager};
use std::sync::Arc;

/// An on-screen object the user interacts with
///
/// Widgets are shared between the compositor and the input manager, so all
/// mutation goes through `&self`. Only `bounds` and `set_bounds` need an
/// implementation; the geometry helpers edit a copy and store it back.
pub trait GuiObject: Renderer + InputDevice {
    fn bounds(&self) -> Bounds;

    fn set_bounds(&self, bounds: Bounds);

    /// Reset transient interaction state (hover, press)
    fn clear(&self) {}

    fn set_pos(&self, x: i32, y: i32) {
        let mut b = self.bounds();
        b.set_pos(x, y);
        self.set_bounds(b);
    }

    fn set_x(&self, x: i32) {
        let mut b = self.bounds();
        b.set_x(x);
        self.set_bounds(b);
    }

    fn set_y(&self, y: i32) {
        let mut b = self.bounds();
        b.set_y(y);
        self.set_bounds(b);
    }

    fn set_dims(&self, width: u32, height: u32) {
        let mut b = self.bounds();
        b.set_dims(width, height);
        self.set_bounds(b);
    }

    fn set_width(&self, width: u32) {
        let mut b = self.bounds();
        b.set_width(width);
        self.set_bounds(b);
    }

    fn set_height(&self, height: u32) {
        let mut b = self.bounds();
        b.set_height(height);
        self.set_bounds(b);
    }

    fn x(&self) -> i32 {
        self.bounds().x()
    }

    fn y(&self) -> i32 {
        self.bounds().y()
    }

    fn width(&self) -> u32 {
        self.bounds().width()
    }

    fn height(&self) -> u32 {
        self.bounds().height()
    }
}

/// Register a widget for drawing on `layer` and for input. Input devices
/// registered later see events after this one.
pub fn attach<G: GuiObject + 'static>(
    widget: &Arc<G>,
    layers: &mut LayerSet,
    layer: usize,
    input: &mut InputManager,
) -> Result<()> {
    let renderer: RendererHandle = widget.clone();
    layers.add(layer, renderer)?;
    let device: Arc<dyn InputDevice> = widget.clone();
    input.register(device);
    Ok(())
}

/// Undo [`attach`]. Returns false if the widget was registered with neither.
pub fn detach<G: GuiObject + 'static>(
    widget: &Arc<G>,
    layers: &mut LayerSet,
    input: &mut InputManager,
) -> bool {
    let renderer: RendererHandle = widget.clone();
    let device: Arc<dyn InputDevice> = widget.clone();
    let removed_layers = layers.remove_everywhere(&renderer);
    let removed_input = input.unregister(&device);
    widget.clear();
    removed_layers > 0 || removed_input
}
