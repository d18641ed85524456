use crate::math::clamp_magnitude;

use super::body::Body;

/// Position solvers available to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    /// Semi-implicit Euler with magnitude-clamped velocity
    #[default]
    Euler,
    /// Position Verlet; velocity is reconstructed from the last two positions
    Verlet,
}

/// One Euler step: accumulate acceleration into velocity, clamp, advance
/// position, and drop the single-frame force accumulator.
pub(crate) fn integrate_euler(body: &mut Body, dt: f32) {
    let acceleration = body.take_acceleration();
    body.velocity += acceleration * dt;
    body.velocity = clamp_magnitude(body.velocity, body.max_speed);
    body.position += body.velocity * dt;
    body.velocity_dirty = false;
    body.prev_position = body.position;
}

/// One position-Verlet step.
///
/// A direct velocity assignment since the previous step invalidates the
/// implicit velocity stored in `prev_position`; it is rebuilt by inverting
/// the central-difference formula `v = (position - prev) / (2 dt)` so the
/// step ahead honors the assigned velocity.
pub(crate) fn integrate_verlet(body: &mut Body, dt: f32) {
    if body.velocity_dirty {
        body.prev_position = body.position - 2.0 * dt * body.velocity;
    }

    let acceleration = body.take_acceleration();
    let new_position = 2.0 * body.position - body.prev_position + acceleration * dt * dt;
    body.velocity = (new_position - body.prev_position) / (2.0 * dt);
    body.prev_position = body.position;
    body.position = new_position;
    body.velocity_dirty = false;
}
