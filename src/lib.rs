//! # flatphys
//!
//! A 2D axis-aligned box physics core for real-time simulations.
//!
//! ## Features
//!
//! - **Bodies**: per-instance physics components with split vertical/horizontal
//!   collision boxes, force accumulation and mass-scaled dynamics
//! - **Integrators**: interchangeable Euler and Verlet solvers, selected per body
//! - **Collision Correction**: iterative discrete overlap resolution with
//!   pixel-snapped displacement and impulse transfer to dynamic peers
//! - **Ropes**: multi-segment distance-constraint chains relaxed with
//!   position-based dynamics
//! - **Force Fields**: conveyor, fan and radial emitters that push forces into
//!   any dynamic body in range
//!
//! ## Quick Start
//!
//! ```rust
//! use flatphys::prelude::*;
//!
//! // A dynamic box falling onto an immovable floor
//! let mut player = Body::from_box(Vec2::new(100.0, 100.0), Rect::new(0, 0, 20, 20), 1.0, 500.0);
//! let mut floor = Body::from_box(Vec2::new(0.0, 200.0), Rect::new(0, 0, 400, 20), 1.0, 0.0)
//!     .with_gravity(false);
//! floor.enabled = false;
//!
//! let dt = 1.0 / 60.0;
//! for _ in 0..120 {
//!     let peers: [&dyn Collidable; 1] = [&floor];
//!     player.update_with(dt, &peers);
//! }
//! assert!(player.on_ground());
//! ```

pub mod collision;
pub mod constraints;
pub mod dynamics;
pub mod fields;
pub mod geometry;
pub mod math;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{Collidable, ColliderId, DynamicBody, Polygon, StaticCollider};
    pub use crate::constraints::{Rope, RopeError};
    pub use crate::dynamics::{Body, Solver};
    pub use crate::fields::{Conveyor, ConveyorDirection, Fan, FanBlower, FanFacing, RadialField};
    pub use crate::geometry::Rect;
    pub use crate::math::Vec2;
}

pub use collision::{Collidable, ColliderId, DynamicBody, StaticCollider};
pub use constraints::{Rope, RopeError};
pub use dynamics::{Body, Solver};
pub use geometry::Rect;
pub use math::Vec2;
