use crate::math::Vec2;

/// An axis-aligned rectangle with integer position and size.
///
/// The collision corrector works in whole pixels, so rectangles are stored as
/// `i32` and world-space bounds are produced by truncating a floating point
/// position toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// X coordinate of the left edge
    pub x: i32,
    /// Y coordinate of the top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// X coordinate of the left edge
    #[inline]
    pub const fn left(self) -> i32 {
        self.x
    }

    /// X coordinate of the right edge
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.w
    }

    /// Y coordinate of the top edge
    #[inline]
    pub const fn top(self) -> i32 {
        self.y
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.h
    }

    /// Center point, computed with integer division (a 1x1 rectangle's center
    /// is its top-left corner)
    #[inline]
    pub const fn center(self) -> Vec2 {
        Vec2::new((self.x + self.w / 2) as f32, (self.y + self.h / 2) as f32)
    }

    /// Returns this rectangle translated into world space by a floating point
    /// position, truncated toward zero
    #[inline]
    pub fn translated(self, position: Vec2) -> Self {
        Self {
            x: self.x + position.x as i32,
            y: self.y + position.y as i32,
            w: self.w,
            h: self.h,
        }
    }

    /// Returns true if this rectangle strictly overlaps another.
    ///
    /// Rectangles that merely share an edge do not intersect; edge contact is
    /// what the grounding check classifies separately.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Returns true if this rectangle contains the given point
    #[inline]
    pub fn contains_point(self, point: Vec2) -> bool {
        point.x >= self.left() as f32
            && point.x < self.right() as f32
            && point.y >= self.top() as f32
            && point.y < self.bottom() as f32
    }

    /// Returns true if this rectangle sits below `other`, judged by top edges
    #[inline]
    pub const fn is_below(self, other: Self) -> bool {
        self.top() >= other.top()
    }

    /// Returns the smallest rectangle containing both `self` and `other`
    #[inline]
    pub fn union(self, other: Self) -> Self {
        let min_x = self.left().min(other.left());
        let min_y = self.top().min(other.top());
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Self {
            x: min_x,
            y: min_y,
            w: max_x - min_x,
            h: max_y - min_y,
        }
    }
}
