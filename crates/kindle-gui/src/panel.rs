//! Filled rectangle widget

use crate::bounds::Bounds;
use crate::object::GuiObject;
use kindle_core::Color;
use kindle_render::{RenderEvent, Renderer};
use kindle_runtime::{InputDevice, InputEvent};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct PanelState {
    bounds: Bounds,
    fill: Color,
    border: Option<(Color, u32)>,
    blocks_input: bool,
}

/// A solid backdrop with an optional border
///
/// By default a panel lets all input through. A blocking panel swallows
/// mouse buttons over it so devices registered after it never see them.
pub struct Panel {
    state: Mutex<PanelState>,
}

impl Panel {
    pub fn new(bounds: Bounds, fill: Color) -> Self {
        Self {
            state: Mutex::new(PanelState {
                bounds,
                fill,
                border: None,
                blocks_input: false,
            }),
        }
    }

    pub fn with_border(self, color: Color, thickness: u32) -> Self {
        self.state().border = Some((color, thickness));
        self
    }

    fn state(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fill(&self) -> Color {
        self.state().fill
    }

    pub fn set_fill(&self, color: Color) {
        self.state().fill = color;
    }

    pub fn set_border(&self, border: Option<(Color, u32)>) {
        self.state().border = border;
    }

    pub fn set_blocks_input(&self, blocks: bool) {
        self.state().blocks_input = blocks;
    }
}

impl Renderer for Panel {
    fn render(&self, event: &mut RenderEvent<'_>) {
        let (rect, fill, border) = {
            let state = self.state();
            (state.bounds.to_rect(), state.fill, state.border)
        };
        let canvas = event.context();
        canvas.fill_rect(rect, fill);
        if let Some((color, thickness)) = border {
            canvas.stroke_rect(rect, thickness, color);
        }
    }
}

impl InputDevice for Panel {
    fn handle_input(&self, event: &InputEvent) -> bool {
        let state = self.state();
        if !state.blocks_input {
            return false;
        }
        match *event {
            InputEvent::MousePressed { x, y, .. } | InputEvent::MouseReleased { x, y, .. } => {
                state.bounds.contains(x, y)
            }
            _ => false,
        }
    }
}

impl GuiObject for Panel {
    fn bounds(&self) -> Bounds {
        self.state().bounds
    }

    fn set_bounds(&self, bounds: Bounds) {
        self.state().bounds = bounds;
    }
}
