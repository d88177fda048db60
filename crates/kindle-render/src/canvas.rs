//! Software drawing surface

use crate::sprite::Sprite;
use kindle_core::{Color, Rect, Size};

/// An RGBA pixel buffer that renderers draw into
///
/// Rows are stored top to bottom, pixels left to right. All drawing calls clip
/// against the canvas bounds, so renderers may pass geometry that is partly or
/// entirely off-screen.
pub struct Canvas {
    size: Size,
    pixels: Vec<Color>,
    color: Color,
}

impl Canvas {
    /// Create a canvas filled with transparent black
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Color::TRANSPARENT; size.area()],
            color: Color::WHITE,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Change the canvas size. Existing contents are discarded.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), Color::TRANSPARENT);
    }

    /// Current drawing color used by the `*_current` helpers
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Overwrite every pixel with `color` (no blending)
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major, suitable for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel without blending. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Alpha-blend `color` over the rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clip) = rect.intersect(&self.bounds()) else {
            return;
        };
        let stride = self.size.width as usize;
        for y in clip.y..clip.y + clip.height as i32 {
            let row = y as usize * stride;
            let start = row + clip.x as usize;
            let span = &mut self.pixels[start..start + clip.width as usize];
            if color.is_opaque() {
                span.fill(color);
            } else {
                for px in span {
                    *px = color.blend_over(*px);
                }
            }
        }
    }

    /// Fill with the current drawing color
    pub fn fill_rect_current(&mut self, rect: Rect) {
        self.fill_rect(rect, self.color);
    }

    /// Draw a rectangle border `thickness` pixels wide, inside `rect`
    pub fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Color) {
        if rect.is_empty() || thickness == 0 {
            return;
        }
        let t = thickness
            .min(rect.width / 2 + 1)
            .min(rect.height / 2 + 1)
            .min(i32::MAX as u32);
        let inner_h = rect.height.saturating_sub(t.saturating_mul(2));
        // top, bottom, left, right
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        if rect.height > t {
            let bottom_y = clamp_i32(rect.bottom() - i64::from(t));
            self.fill_rect(Rect::new(rect.x, bottom_y, rect.width, t), color);
        }
        if inner_h > 0 {
            let y = clamp_i32(i64::from(rect.y) + i64::from(t));
            self.fill_rect(Rect::new(rect.x, y, t, inner_h), color);
            let right_x = clamp_i32(rect.right() - i64::from(t));
            self.fill_rect(Rect::new(right_x, y, t, inner_h), color);
        }
    }

    /// Alpha-blend a sprite with its top-left corner at (`x`, `y`)
    pub fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let dest = Rect::new(x, y, sprite.size().width, sprite.size().height);
        let Some(clip) = dest.intersect(&self.bounds()) else {
            return;
        };
        let src_stride = sprite.size().width as usize;
        let dst_stride = self.size.width as usize;
        let src = sprite.pixels();

        for row in 0..clip.height as usize {
            let sy = (clip.y - y) as usize + row;
            let dy = clip.y as usize + row;
            let sx = (clip.x - x) as usize;
            let src_row = &src[sy * src_stride + sx..][..clip.width as usize];
            let dst_start = dy * dst_stride + clip.x as usize;
            let dst_row = &mut self.pixels[dst_start..dst_start + clip.width as usize];
            for (d, s) in dst_row.iter_mut().zip(src_row) {
                *d = s.blend_over(*d);
            }
        }
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
