//! Area-effect force emitters: conveyors, fans and radial fields.
//!
//! Emitters are pure consumers of the [`Collidable`] capability: each frame
//! the host hands them the same peer snapshot the bodies collide against, and
//! they push forces into every dynamic peer in range. They own no bodies and
//! retain no references.

use crate::collision::Collidable;
use crate::geometry::Rect;
use crate::math::{consts, Vec2};

const CONVEYOR_FORCE_SCALE: f32 = 100.0;
const FAN_FORCE_SCALE: f32 = 50.0;

/// Travel direction of a conveyor belt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConveyorDirection {
    Left,
    Right,
}

impl ConveyorDirection {
    const fn axis(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Pushes every dynamic body overlapping its field toward one side
#[derive(Debug, Clone)]
pub struct Conveyor {
    /// World-space region the belt affects
    pub field: Rect,
    pub direction: ConveyorDirection,
    /// Base strength, multiplied by a fixed belt force scale
    pub strength: f32,
}

impl Conveyor {
    /// Creates a conveyor acting on `field`
    pub fn new(field: Rect, direction: ConveyorDirection, strength: f32) -> Self {
        Self {
            field,
            direction,
            strength,
        }
    }

    /// Pushes the belt force into every dynamic peer intersecting the field
    pub fn apply(&self, peers: &[&dyn Collidable]) {
        for peer in peers {
            if !self.field.intersects(peer.bounds()) {
                continue;
            }
            if let Some(dynamic) = peer.as_dynamic() {
                dynamic.apply_force(self.direction.axis() * self.strength * CONVEYOR_FORCE_SCALE);
            }
        }
    }
}

/// Which way a fan's airstream points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanFacing {
    Right,
    Left,
    Up,
    Down,
}

impl FanFacing {
    const fn axis(self) -> Vec2 {
        match self {
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Whether a fan blows outward or sucks inward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanBlower {
    In,
    Out,
}

impl FanBlower {
    const fn sign(self) -> f32 {
        match self {
            Self::In => -1.0,
            Self::Out => 1.0,
        }
    }
}

/// Blows a constant force through a rectangular airstream
#[derive(Debug, Clone)]
pub struct Fan {
    /// World-space region the airstream covers
    pub blower_bounds: Rect,
    pub facing: FanFacing,
    pub blower: FanBlower,
    /// Base strength, multiplied by a fixed airstream force scale
    pub strength: f32,
}

impl Fan {
    /// Creates a fan blowing through `blower_bounds`
    pub fn new(blower_bounds: Rect, facing: FanFacing, blower: FanBlower, strength: f32) -> Self {
        Self {
            blower_bounds,
            facing,
            blower,
            strength,
        }
    }

    /// Pushes the airstream force into every dynamic peer in the stream
    pub fn apply(&self, peers: &[&dyn Collidable]) {
        let force = self.facing.axis() * self.blower.sign() * self.strength * FAN_FORCE_SCALE;
        for peer in peers {
            if !self.blower_bounds.intersects(peer.bounds()) {
                continue;
            }
            if let Some(dynamic) = peer.as_dynamic() {
                dynamic.apply_force(force);
            }
        }
    }
}

/// Pulls dynamic bodies within a radius toward a center point, stronger the
/// closer they are
#[derive(Debug, Clone)]
pub struct RadialField {
    pub center: Vec2,
    /// Effect radius; peers outside it are untouched
    pub radius: f32,
    /// Pull strength at unit distance
    pub strength: f32,
}

impl RadialField {
    /// Creates a radial field centered on `center`
    pub fn new(center: Vec2, radius: f32, strength: f32) -> Self {
        Self {
            center,
            radius,
            strength,
        }
    }

    /// Pulls every dynamic peer inside the radius toward the center with
    /// magnitude `strength * sqrt(1/distance)`
    pub fn apply(&self, peers: &[&dyn Collidable]) {
        for peer in peers {
            let dist_sq = self.center.distance_squared(peer.position());
            if dist_sq > self.radius * self.radius {
                continue;
            }
            // a peer sitting on the center has no pull direction
            if dist_sq <= consts::EPSILON {
                continue;
            }

            let dist = dist_sq.sqrt();
            let force =
                (self.center - peer.position()).normalize() * self.strength * (1.0 / dist).sqrt();

            if let Some(dynamic) = peer.as_dynamic() {
                dynamic.apply_force(force);
            }
        }
    }
}
