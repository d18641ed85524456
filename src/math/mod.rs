//! Scalar and vector helpers shared by the physics core.
//!
//! Vector math comes from [`glam`]; this module only adds the few operations
//! the simulation needs on top of it.

pub use glam::Vec2;

/// Common math constants
pub mod consts {
    /// A small epsilon value for floating point comparisons
    pub const EPSILON: f32 = 1e-6;

    /// Speed threshold below which a body counts as stationary
    pub const SPEED_EPSILON: f32 = 0.01;
}

/// Clamps the magnitude of a vector to `max_length`, preserving direction.
///
/// A `max_length` of zero (or below) is the "no clamp" sentinel and returns
/// the vector unchanged; it never means "clamp to zero speed".
#[inline]
pub fn clamp_magnitude(v: Vec2, max_length: f32) -> Vec2 {
    if max_length <= 0.0 {
        return v;
    }
    let len_sq = v.length_squared();
    if len_sq > max_length * max_length {
        v * (max_length / len_sq.sqrt())
    } else {
        v
    }
}
