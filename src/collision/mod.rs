//! Collision capabilities: identity, the peer interface consumed by the
//! resolver, and an optional separating-axis backend for convex polygons.

mod sat;

pub use sat::Polygon;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;
use crate::math::Vec2;

/// Identity of one collidable object in the world.
///
/// Collision correction excludes a body's own collider by comparing
/// identities, never bounds: two distinct bodies with identical boxes must
/// stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId(u64);

impl ColliderId {
    /// Allocates a fresh process-unique identity
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// An object other bodies may collide with.
///
/// The peer set handed to [`Body::update_with`](crate::Body::update_with) is a
/// read-only snapshot; the physics core never mutates its membership and never
/// retains a reference past the call.
pub trait Collidable {
    /// Identity of the owning object, used for self-exclusion
    fn id(&self) -> ColliderId;

    /// Reference position in world space
    fn position(&self) -> Vec2;

    /// World-space bounding rectangle
    fn bounds(&self) -> Rect;

    /// Whether this object currently collides at all
    fn collisions_enabled(&self) -> bool;

    /// Dynamic peers accept forces during collision resolution; immovable
    /// colliders keep the default `None`.
    fn as_dynamic(&self) -> Option<&dyn DynamicBody> {
        None
    }
}

/// Force-accepting capability of a dynamic peer.
///
/// Takes `&self` so the resolver can push an impulse into a peer it only
/// holds a shared reference to; implementors accumulate into an interior
/// force cell drained by their next integration step.
pub trait DynamicBody {
    /// Accumulates a mass-scaled force for the next integration step
    fn apply_force(&self, force: Vec2);
}

/// An immovable axis-aligned collider with no physics state of its own
#[derive(Debug, Clone)]
pub struct StaticCollider {
    bounds: Rect,
    id: ColliderId,
    /// Whether this collider participates in collision at all
    pub enable_collisions: bool,
}

impl StaticCollider {
    /// Creates a static collider covering `bounds`
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            id: ColliderId::next(),
            enable_collisions: true,
        }
    }

    /// World-space bounding rectangle
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center-anchored position
    pub fn position(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Moves the collider so its center lands on `center`
    pub fn set_position(&mut self, center: Vec2) {
        self.bounds.x = center.x as i32 - self.bounds.w / 2;
        self.bounds.y = center.y as i32 - self.bounds.h / 2;
    }
}

impl Collidable for StaticCollider {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.bounds.center()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn collisions_enabled(&self) -> bool {
        self.enable_collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collider_ids_are_unique() {
        let a = ColliderId::next();
        let b = ColliderId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_static_collider_is_not_dynamic() {
        let collider = StaticCollider::new(Rect::new(0, 0, 100, 20));
        assert!(collider.as_dynamic().is_none());
        assert!(collider.collisions_enabled());
    }

    #[test]
    fn test_static_collider_reposition() {
        let mut collider = StaticCollider::new(Rect::new(0, 0, 100, 20));
        collider.set_position(Vec2::new(200.0, 50.0));
        assert_eq!(collider.bounds(), Rect::new(150, 40, 100, 20));
        assert_eq!(collider.position(), Vec2::new(200.0, 50.0));
    }
}
