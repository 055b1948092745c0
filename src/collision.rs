/// Collision math for the arcade world
///
/// Pure AABB (Axis-Aligned Bounding Box) functions. The arcade world uses these
/// to decide whether two bodies touch and how far to push them apart.
///
/// # Rust Learning Notes
///
/// - **Copy types**: `Aabb` is four floats, so it's passed by value freely
/// - **Pure functions**: no state, trivially unit-testable
use sdl2::rect::Rect;

/// A box described by its top-left corner and size, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Aabb { x, y, width, height }
    }

    /// Builds a box around a center point (sprites are positioned by center)
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Aabb::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Rounds to an SDL2 rect for drawing
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

/// Anything with a box in the arcade world
pub trait Collidable {
    fn get_bounds(&self) -> Aabb;
}

/// Checks if two boxes intersect.
///
/// Two boxes intersect if they overlap on both the X and Y axes. Touching
/// edges do NOT count as intersecting (upper bounds are exclusive).
pub fn aabb_intersect(a: &Aabb, b: &Aabb) -> bool {
    let x_overlap = a.x < b.right() && a.right() > b.x;
    let y_overlap = a.y < b.bottom() && a.bottom() > b.y;

    x_overlap && y_overlap
}

/// Calculates how far two intersecting boxes overlap on each axis.
///
/// - `overlap_x`: positive if `a` is left of (or aligned with) `b`, negative otherwise
/// - `overlap_y`: positive if `a` is above (or aligned with) `b`, negative otherwise
///
/// Subtracting the overlap from `a`'s position separates the boxes on that axis.
/// Only meaningful when the boxes intersect.
pub fn calculate_overlap(a: &Aabb, b: &Aabb) -> (f32, f32) {
    let overlap_x = if a.x <= b.x {
        a.right() - b.x
    } else {
        a.x - b.right()
    };

    let overlap_y = if a.y <= b.y {
        a.bottom() - b.y
    } else {
        a.y - b.bottom()
    };

    (overlap_x, overlap_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersect_overlapping() {
        let a = Aabb::new(0.0, 0.0, 32.0, 32.0);
        let b = Aabb::new(16.0, 16.0, 32.0, 32.0);

        assert!(aabb_intersect(&a, &b));
        assert!(aabb_intersect(&b, &a)); // Symmetric
    }

    #[test]
    fn test_aabb_intersect_touching_edges() {
        // A player standing exactly on a platform is touching, not intersecting
        let player = Aabb::new(0.0, 0.0, 32.0, 48.0);
        let platform = Aabb::new(0.0, 48.0, 400.0, 32.0);

        assert!(!aabb_intersect(&player, &platform));
    }

    #[test]
    fn test_aabb_intersect_contained() {
        let large = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let small = Aabb::new(25.0, 25.0, 50.0, 50.0);

        assert!(aabb_intersect(&large, &small));
        assert!(aabb_intersect(&small, &large));
    }

    #[test]
    fn test_from_center() {
        let ground = Aabb::from_center(400.0, 568.0, 800.0, 64.0);
        assert_eq!(ground.x, 0.0);
        assert_eq!(ground.y, 536.0);
        assert_eq!(ground.right(), 800.0);
        assert_eq!(ground.bottom(), 600.0);
    }

    #[test]
    fn test_calculate_overlap_landing() {
        // Player sinking 6px into a platform from above
        let player = Aabb::new(10.0, 0.0, 32.0, 48.0);
        let platform = Aabb::new(0.0, 42.0, 400.0, 32.0);

        let (_, overlap_y) = calculate_overlap(&player, &platform);
        assert_eq!(overlap_y, 6.0);
    }

    #[test]
    fn test_calculate_overlap_from_right() {
        let a = Aabb::new(20.0, 0.0, 32.0, 32.0);
        let b = Aabb::new(0.0, 0.0, 32.0, 32.0);

        let (overlap_x, _) = calculate_overlap(&a, &b);
        // Negative: push a to the right
        assert_eq!(overlap_x, -12.0);
    }
}
