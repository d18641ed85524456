use crate::math::Vec2;

/// A convex polygon for separating-axis intersection tests.
///
/// This is an optional narrow phase, independent of the axis-aligned box
/// resolution loop: `Body` never consults it. The polygon keeps an
/// untransformed model and lazily re-derives world-space points when its
/// origin or angle changes.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Untransformed model points, counter-clockwise
    model: Vec<Vec2>,
    /// World-space points, valid after [`update`](Self::update)
    points: Vec<Vec2>,
    origin: Vec2,
    angle: f32,
    dirty: bool,
}

impl Polygon {
    /// Creates a polygon from model-space points
    pub fn new(model: Vec<Vec2>) -> Self {
        let points = model.clone();
        Self {
            model,
            points,
            origin: Vec2::ZERO,
            angle: 0.0,
            dirty: true,
        }
    }

    /// World-space position of the polygon
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Moves the polygon and marks its points stale
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
        self.dirty = true;
    }

    /// Rotation in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Rotates the polygon and marks its points stale
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.dirty = true;
    }

    /// World-space points from the last [`update`](Self::update)
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Re-derives world-space points from the model if anything changed
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let (sin, cos) = self.angle.sin_cos();
        for (world, model) in self.points.iter_mut().zip(&self.model) {
            *world = Vec2::new(
                model.x * cos - model.y * sin + self.origin.x,
                model.x * sin + model.y * cos + self.origin.y,
            );
        }
    }

    /// Returns true when two convex polygons overlap.
    ///
    /// Projects both polygons onto every edge normal of both shapes; any axis
    /// with a gap between the projected intervals separates them.
    pub fn intersects(&self, other: &Polygon) -> bool {
        for (first, second) in [(self, other), (other, self)] {
            for i in 0..first.points.len() {
                let j = (i + 1) % first.points.len();
                let edge = first.points[j] - first.points[i];
                let axis = Vec2::new(-edge.y, edge.x);

                let (min_a, max_a) = project(&first.points, axis);
                let (min_b, max_b) = project(&second.points, axis);

                if !(max_b >= min_a && max_a >= min_b) {
                    return false;
                }
            }
        }
        true
    }
}

fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for point in points {
        let dot = point.dot(axis);
        min = min.min(dot);
        max = max.max(dot);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_overlapping_squares() {
        let mut a = Polygon::new(unit_square());
        let mut b = Polygon::new(unit_square());
        b.set_origin(Vec2::new(0.5, 0.5));
        a.update();
        b.update();
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separated_squares() {
        let mut a = Polygon::new(unit_square());
        let mut b = Polygon::new(unit_square());
        b.set_origin(Vec2::new(3.0, 0.0));
        a.update();
        b.update();
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rotated_square_overlap() {
        let mut a = Polygon::new(unit_square());
        // diamond whose left corner pokes into the square's right edge
        let mut b = Polygon::new(vec![
            Vec2::new(-0.7, 0.0),
            Vec2::new(0.0, -0.7),
            Vec2::new(0.7, 0.0),
            Vec2::new(0.0, 0.7),
        ]);
        b.set_origin(Vec2::new(1.5, 0.5));
        a.update();
        b.update();
        assert!(a.intersects(&b));

        b.set_origin(Vec2::new(2.5, 0.5));
        b.update();
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_update_is_lazy() {
        let mut p = Polygon::new(unit_square());
        p.update();
        let before = p.points()[0];
        p.set_origin(Vec2::new(10.0, 0.0));
        p.update();
        assert_ne!(before, p.points()[0]);
    }
}
