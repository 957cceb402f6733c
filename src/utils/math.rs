//! src/utils/math.rs
//! Geometric helpers shared by blocks and game objects
use glam::Vec2;

/// Axis-aligned rectangle in chunk pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let a = Rect::from_origin_size(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Rect::from_origin_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let inside = Rect::from_origin_size(Vec2::splat(5.0), Vec2::splat(10.0));

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&inside));
        assert!(inside.intersects(&a));
    }

    #[test]
    fn translate_keeps_size() {
        let a = Rect::from_origin_size(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        let moved = a.translate(Vec2::new(-1.0, 1.0));
        assert_eq!(moved.size(), a.size());
        assert_eq!(moved.min, Vec2::new(0.0, 3.0));
        assert!(moved.contains(moved.center()));
    }
}
