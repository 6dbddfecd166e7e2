use std::fmt;
use std::ops::Mul;

use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy> Rect<T> {
    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }

    pub fn position(&self) -> Pos<T> {
        Pos {
            x: self.x,
            y: self.y,
        }
    }
}

impl Rect<f32> {
    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Strict containment test, matching hover areas whose edges are shared
    /// with neighbouring areas.
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

/// Renders as `<width>x<height>`, the normalized form used to compare
/// element measurements.
impl<T: fmt::Display> fmt::Display for Size<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos<T> {
    pub x: T,
    pub y: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display_is_normalized() {
        assert_eq!(Size::new(800.0f32, 600.0).to_string(), "800x600");
        assert_eq!(Size::new(640u32, 480).to_string(), "640x480");
    }

    #[test]
    fn rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains_strict(Vec2::new(10.0, 10.0)));
        assert!(rect.contains_strict(Vec2::new(50.0, 30.0)));
        assert!(!rect.contains(Vec2::new(111.0, 30.0)));
    }
}
