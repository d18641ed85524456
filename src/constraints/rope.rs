use thiserror::Error;
use tracing::warn;

use crate::collision::ColliderId;
use crate::dynamics::{Body, Solver};
use crate::geometry::Rect;
use crate::math::{consts, Vec2};

/// Force scale coupling the rope's free end to an attached body
const ATTACH_FORCE_SCALE: f32 = 2000.0;

/// Smallest per-segment rest length a degenerate total length floors to
const MIN_SEGMENT_LENGTH: f32 = 0.01;

const NODE_MASS: f32 = 1.0;
const NODE_MAX_SPEED: f32 = 1000.0;

/// Rope construction failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RopeError {
    /// A rope needs at least one segment between its two endpoints
    #[error("rope needs at least one segment, got {0}")]
    InvalidSegmentCount(usize),
}

/// An ordered chain of Verlet bodies joined by equal-length distance
/// constraints.
///
/// Each frame the chain pins its anchored endpoints, relaxes every adjacent
/// pair with position-based corrections (one pass per node, since a pass only
/// propagates a correction one link), optionally couples its free end to an
/// external body with a spring-like force, and finally integrates every node.
/// Nodes carry degenerate collision boxes and must never be registered as
/// peers for outside bodies; the host preserves that invariant.
#[derive(Debug)]
pub struct Rope {
    nodes: Vec<Body>,
    segment_length: f32,
    /// Pin the first node to `start_pos` (otherwise `start_pos` follows it)
    pub start_anchor: bool,
    /// Pin the last node to `end_pos` (otherwise `end_pos` follows it)
    pub end_anchor: bool,
    /// Anchor position for the start of the rope
    pub start_pos: Vec2,
    /// Anchor position for the end of the rope
    pub end_pos: Vec2,
    /// Friction coefficient applied to a body attached to the free end
    pub attach_friction: f32,
}

impl Rope {
    /// Creates a rope spanning `start` to `end` with `segments` links.
    ///
    /// The node count (`segments + 1`) is fixed for the rope's lifetime;
    /// `segments` of zero is rejected. All nodes share one owner identity so
    /// they can never collision-correct against each other.
    pub fn new(start: Vec2, end: Vec2, segments: usize) -> Result<Self, RopeError> {
        if segments == 0 {
            return Err(RopeError::InvalidSegmentCount(segments));
        }

        let num_nodes = segments + 1;
        let segment_length = start.distance(end) / segments as f32;
        let diff = (end - start) / segments as f32;
        let owner = ColliderId::next();

        let nodes = (0..num_nodes)
            .map(|i| {
                Body::from_box(
                    start + diff * i as f32,
                    Rect::new(0, 0, 1, 1),
                    NODE_MASS,
                    NODE_MAX_SPEED,
                )
                .with_solver(Solver::Verlet)
                .with_owner(owner)
            })
            .collect();

        Ok(Self {
            nodes,
            segment_length,
            start_anchor: true,
            end_anchor: false,
            start_pos: start,
            end_pos: end,
            attach_friction: 0.0,
        })
    }

    /// Desired total rope length
    pub fn length(&self) -> f32 {
        self.segment_length * (self.nodes.len() as f32 - 2.0)
    }

    /// Changes the desired total length, recomputing the per-segment rest
    /// length; degenerate results are floored rather than rejected so the
    /// rope always stays steppable
    pub fn set_length(&mut self, length: f32) {
        self.segment_length = length / (self.nodes.len() as f32 - 2.0);
        if !(self.segment_length > 0.0) {
            warn!(
                segment_length = self.segment_length,
                "degenerate rope segment length, flooring"
            );
            self.segment_length = MIN_SEGMENT_LENGTH;
        }
    }

    /// Rest distance between adjacent nodes
    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Read access to the node chain, start to end
    pub fn nodes(&self) -> &[Body] {
        &self.nodes
    }

    /// Whether gravity is enabled on the chain
    pub fn gravity_enabled(&self) -> bool {
        self.nodes[0].enable_gravity
    }

    /// Enables or disables gravity on every node
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        for node in &mut self.nodes {
            node.enable_gravity = enabled;
        }
    }

    /// Gravity scale of the chain
    pub fn gravity_scale(&self) -> f32 {
        self.nodes[0].gravity_scale
    }

    /// Sets the gravity scale on every node
    pub fn set_gravity_scale(&mut self, scale: f32) {
        for node in &mut self.nodes {
            node.gravity_scale = scale;
        }
    }

    /// Applies a force to every node
    pub fn apply_force(&self, force: Vec2) {
        for node in &self.nodes {
            node.apply_force(force);
        }
    }

    /// Applies a friction force to every node
    pub fn apply_friction(&self, coeff: f32) {
        for node in &self.nodes {
            node.apply_friction(coeff);
        }
    }

    /// Advances the rope one step
    pub fn update(&mut self, dt: f32) {
        self.step(dt, None);
    }

    /// Advances the rope one step with an external body coupled to its free
    /// end.
    ///
    /// The attached body is pulled toward the end node by a stiff spring
    /// force plus `attach_friction`; the end node takes the opposite reaction
    /// scaled by half the attached body's mass. An approximation, not exact
    /// Newtonian coupling.
    pub fn update_attached(&mut self, dt: f32, attached: &Body) {
        self.step(dt, Some(attached));
    }

    fn step(&mut self, dt: f32, attached: Option<&Body>) {
        let last = self.nodes.len() - 1;

        if self.start_anchor {
            self.nodes[0].enabled = false;
            let pinned = self.start_pos;
            self.nodes[0].set_center_position(pinned);
        } else {
            self.nodes[0].enabled = true;
            self.start_pos = self.nodes[0].center_position();
        }

        if self.end_anchor {
            self.nodes[last].enabled = false;
            let pinned = self.end_pos;
            self.nodes[last].set_center_position(pinned);
        } else {
            self.nodes[last].enabled = true;
            self.end_pos = self.nodes[last].center_position();
        }

        // each relaxation pass propagates a correction one link, so run one
        // pass per node
        let iterations = self.nodes.len();
        for _ in 0..iterations {
            for j in 1..self.nodes.len() {
                let (head, tail) = self.nodes.split_at_mut(j);
                relax_constraint(&mut head[j - 1], &mut tail[0], self.segment_length);
            }
        }

        if let Some(attached) = attached {
            let node = &self.nodes[last];
            let diff = node.center_position() - attached.center_position();

            attached.apply_force(diff * ATTACH_FORCE_SCALE);
            attached.apply_friction(self.attach_friction);
            node.apply_force(-diff * ATTACH_FORCE_SCALE * (attached.mass() / 2.0));
        }

        for node in &mut self.nodes {
            node.update(dt);
        }
    }
}

/// Moves both (non-disabled) nodes half the distance error along the line
/// between their centers. Positions only; the integrators are bypassed.
fn relax_constraint(first: &mut Body, second: &mut Body, desired_dist: f32) {
    let delta = second.center_position() - first.center_position();

    // coincident nodes have no defined direction; leave the pair for a later
    // pass instead of normalizing a zero vector
    if delta.length_squared() < consts::EPSILON {
        return;
    }

    let dist = delta.length();
    let dir = delta / dist;
    let error = dist - desired_dist;

    if first.enabled {
        let corrected = first.center_position() + dir * error / 2.0;
        first.set_center_position(corrected);
    }
    if second.enabled {
        let corrected = second.center_position() - dir * error / 2.0;
        second.set_center_position(corrected);
    }
}
