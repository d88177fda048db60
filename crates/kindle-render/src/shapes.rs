//! Basic renderers for filled rectangles and sprites

use crate::renderer::{RenderEvent, Renderer};
use crate::sprite::Sprite;
use kindle_core::{Color, Rect};
use std::sync::{Mutex, PoisonError};

/// Fills a rectangle with a solid color
pub struct RectRenderer {
    state: Mutex<(Rect, Color)>,
}

impl RectRenderer {
    pub fn new(rect: Rect, color: Color) -> Self {
        Self {
            state: Mutex::new((rect, color)),
        }
    }

    pub fn rect(&self) -> Rect {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    pub fn set_rect(&self, rect: Rect) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).0 = rect;
    }

    pub fn set_color(&self, color: Color) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).1 = color;
    }
}

impl Renderer for RectRenderer {
    fn render(&self, event: &mut RenderEvent<'_>) {
        let (rect, color) = *self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let canvas = event.context();
        canvas.set_color(color);
        canvas.fill_rect_current(rect);
    }
}

/// Draws a sprite at a movable position
pub struct SpriteRenderer {
    sprite: Sprite,
    position: Mutex<(i32, i32)>,
}

impl SpriteRenderer {
    pub fn new(sprite: Sprite, x: i32, y: i32) -> Self {
        Self {
            sprite,
            position: Mutex::new((x, y)),
        }
    }

    pub fn set_position(&self, x: i32, y: i32) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
    }

    pub fn position(&self) -> (i32, i32) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Renderer for SpriteRenderer {
    fn render(&self, event: &mut RenderEvent<'_>) {
        let (x, y) = self.position();
        event.context().draw_sprite(&self.sprite, x, y);
    }
}
