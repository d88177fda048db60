//! Widget geometry

use kindle_core::Rect;

/// Screen position and size of a widget, in window pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.set_x(x);
        self.set_y(y);
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn set_dims(&mut self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a cursor position falls inside. Fractional positions belong
    /// to the pixel they lie in.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.to_rect().contains(x.floor() as i32, y.floor() as i32)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters() {
        let mut b = Bounds::default();
        b.set_pos(10, -4);
        b.set_dims(30, 20);
        assert_eq!((b.x(), b.y(), b.width(), b.height()), (10, -4, 30, 20));

        b.set_x(1);
        b.set_height(2);
        assert_eq!(b, Bounds::new(1, -4, 30, 2));
    }

    #[test]
    fn test_contains() {
        let b = Bounds::new(10, 10, 5, 5);
        assert!(b.contains(10.0, 10.0));
        assert!(b.contains(14.9, 14.9));
        assert!(!b.contains(15.0, 12.0));
        assert!(!b.contains(9.5, 12.0));
        assert!(!b.contains(f64::NAN, 12.0));
    }

    #[test]
    fn test_rect_conversion() {
        let rect = Rect::new(-2, 3, 4, 5);
        assert_eq!(Bounds::from(rect).to_rect(), rect);
    }
}
