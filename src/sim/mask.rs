//! Pixel occupancy masks and axis-aligned bounding boxes
//!
//! Collision between tiles is pixel-accurate: each tile kind generates a
//! binary occupancy mask from its canonical (unrotated) silhouette, and
//! pairs of tiles are tested by overlapping their masks at the integer
//! pixel offset between their top-left corners. Out-of-range queries are
//! answered with `false` - sampling outside a tile is an expected,
//! frequent occurrence and simply means "no occupancy there".

use glam::Vec2;

/// Binary occupancy mask in a tile's canonical orientation.
///
/// Coordinates are local pixels with (0, 0) at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// Create an empty mask of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Create a fully occupied mask (solid rectangular silhouette).
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Set the occupancy bit at a local pixel. Out-of-range is ignored.
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.bits[(y * self.width + x) as usize] = value;
        }
    }

    /// Query the occupancy bit at a local pixel.
    ///
    /// Out-of-range coordinates report `false` rather than erroring.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Test whether any occupied pixel of `self` coincides with an
    /// occupied pixel of `other`, where `offset` is the position of
    /// `other`'s top-left corner relative to `self`'s top-left corner.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        // Intersection of the two mask rectangles in self's local frame
        let x0 = offset.0.max(0);
        let y0 = offset.1.max(0);
        let x1 = (offset.0 + other.width).min(self.width);
        let y1 = (offset.1 + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.0, y - offset.1) {
                    return true;
                }
            }
        }
        false
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build an AABB from a center point and a pixel size.
    pub fn from_center(center: Vec2, size: (u32, u32)) -> Self {
        let half = Vec2::new(size.0 as f32 / 2.0, size.1 as f32 / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_out_of_range_is_empty() {
        let mask = Mask::filled(4, 4);
        assert!(mask.get(0, 0));
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(0, 4));
        assert!(!mask.get(100, 100));
    }

    #[test]
    fn test_mask_overlap_offset() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);

        // Touching corner-to-corner with one pixel of overlap
        assert!(a.overlaps(&b, (9, 9)));
        // Fully past each other
        assert!(!a.overlaps(&b, (10, 0)));
        assert!(!a.overlaps(&b, (0, 10)));
        assert!(!a.overlaps(&b, (-10, 0)));
    }

    #[test]
    fn test_mask_overlap_respects_holes() {
        let a = Mask::filled(4, 4);
        let mut b = Mask::new(4, 4);
        b.set(3, 3, true);

        // Only b's bottom-right pixel is occupied; shifting it outside
        // a's extent must not overlap.
        assert!(a.overlaps(&b, (0, 0)));
        assert!(!a.overlaps(&b, (1, 1)));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), (100, 100));
        let b = Aabb::from_center(Vec2::new(90.0, 0.0), (100, 100));
        let c = Aabb::from_center(Vec2::new(200.0, 0.0), (100, 100));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(Vec2::new(50.0, 50.0)));
        assert!(!a.contains(Vec2::new(51.0, 0.0)));
    }
}
