//! Decoded images ready to draw

use kindle_core::{Color, Size};
use std::sync::Arc;

/// An immutable RGBA image. Clones share the pixel data.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    size: Size,
    pixels: Arc<[Color]>,
}

impl Sprite {
    /// Build a sprite from row-major pixels. Missing pixels are padded with
    /// transparent black and extra ones are dropped.
    pub fn new(size: Size, mut pixels: Vec<Color>) -> Self {
        pixels.resize(size.area(), Color::TRANSPARENT);
        Self {
            size,
            pixels: pixels.into(),
        }
    }

    /// A sprite filled with a single color
    pub fn solid(size: Size, color: Color) -> Self {
        Self::new(size, vec![color; size.area()])
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixels[y as usize * self.size.width as usize + x as usize])
    }
}
