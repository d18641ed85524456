use std::cell::Cell;

use tracing::trace;

use crate::collision::{Collidable, ColliderId, DynamicBody};
use crate::geometry::Rect;
use crate::math::{consts, Vec2};

use super::integrator::{self, Solver};

/// Downward acceleration applied to gravity-enabled bodies, in pixels/s²
pub const GRAVITY: f32 = 670.0;

/// Fixed iteration count of the discrete collision corrector; trades accuracy
/// for cost on deeply overlapping stacks
const COLLISION_ITERATIONS: usize = 4;

/// A dynamically or statically positioned box in the simulation.
///
/// A body owns its position, velocity and a single-frame force accumulator,
/// integrates motion with a per-instance [`Solver`], and corrects box overlap
/// against a caller-supplied set of [`Collidable`] peers. Two independent
/// local-space boxes split the axes: the vertical box governs top/bottom
/// (gravity-axis) contact, the horizontal box left/right contact, so a body
/// can register as grounded independent of horizontal overlap and diagonal
/// approaches never double-correct a corner.
#[derive(Debug)]
pub struct Body {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) prev_position: Vec2,
    /// Set by any direct velocity write; the next Verlet step rebuilds
    /// `prev_position` before integrating
    pub(crate) velocity_dirty: bool,
    /// Single-frame force accumulator. Interior-mutable so peers and ropes
    /// can push forces through a shared reference mid-pass.
    acceleration: Cell<Vec2>,
    gravity_force: Vec2,
    direction: Vec2,
    on_ground: bool,
    is_colliding: bool,

    mass: f32,
    pub(crate) max_speed: f32,
    id: ColliderId,
    owner: ColliderId,

    /// Local-space box for top/bottom collision, offset from `position`
    pub vertical_box: Rect,
    /// Local-space box for left/right collision, offset from `position`
    pub horizontal_box: Rect,

    /// Integration scheme used by this body
    pub solver: Solver,
    /// Whether this body simulates at all; a disabled body skips integration
    /// and acts as an immovable peer
    pub enabled: bool,
    /// Whether gravity is applied while airborne
    pub enable_gravity: bool,
    /// Whether this body corrects collisions and can be collided with
    pub enable_collisions: bool,
    /// Scale on the gravity constant
    pub gravity_scale: f32,
    /// Scale on the friction applied while grounded and moving
    pub ground_friction_scale: f32,
}

impl Body {
    /// Creates a body from explicit vertical and horizontal collision boxes.
    ///
    /// `max_speed` of `0.0` means unclamped.
    pub fn new(
        position: Vec2,
        vertical_box: Rect,
        horizontal_box: Rect,
        mass: f32,
        max_speed: f32,
    ) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive");
        let id = ColliderId::next();
        Self {
            position,
            velocity: Vec2::ZERO,
            prev_position: position,
            velocity_dirty: false,
            acceleration: Cell::new(Vec2::ZERO),
            gravity_force: Vec2::ZERO,
            direction: Vec2::ZERO,
            on_ground: false,
            is_colliding: false,
            mass,
            max_speed,
            id,
            owner: id,
            vertical_box,
            horizontal_box,
            solver: Solver::Euler,
            enabled: true,
            enable_gravity: true,
            enable_collisions: true,
            gravity_scale: 1.0,
            ground_friction_scale: 20.0,
        }
    }

    /// Creates a body from one shared collision box, deriving the two axis
    /// boxes by insetting: the vertical box shrinks horizontally and the
    /// horizontal box shrinks vertically by `box_offset` pixels, which keeps
    /// the corners from belonging to both axes.
    pub fn with_box_offset(
        position: Vec2,
        collision_box: Rect,
        box_offset: i32,
        mass: f32,
        max_speed: f32,
    ) -> Self {
        let inset = box_offset.max(0);
        let vertical_box = Rect::new(
            collision_box.x + inset / 2,
            collision_box.y,
            collision_box.w - inset,
            collision_box.h,
        );
        let horizontal_box = Rect::new(
            collision_box.x,
            collision_box.y + inset / 2,
            collision_box.w,
            collision_box.h - inset,
        );
        Self::new(position, vertical_box, horizontal_box, mass, max_speed)
    }

    /// Creates a body from one shared collision box with the default one
    /// pixel axis inset
    pub fn from_box(position: Vec2, collision_box: Rect, mass: f32, max_speed: f32) -> Self {
        Self::with_box_offset(position, collision_box, 1, mass, max_speed)
    }

    /// Sets the integration scheme
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the identity collision correction excludes as "self".
    ///
    /// Defaults to this body's own id; give several bodies one owner to keep
    /// them from ever resolving against each other.
    pub fn with_owner(mut self, owner: ColliderId) -> Self {
        self.owner = owner;
        self
    }

    /// Enables or disables gravity
    pub fn with_gravity(mut self, enable: bool) -> Self {
        self.enable_gravity = enable;
        self
    }

    /// Enables or disables collision participation
    pub fn with_collisions(mut self, enable: bool) -> Self {
        self.enable_collisions = enable;
        self
    }

    /// Sets the gravity scale
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Sets the grounded friction scale
    pub fn with_ground_friction_scale(mut self, scale: f32) -> Self {
        self.ground_friction_scale = scale;
        self
    }

    /// Top-left reference position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the body without touching its velocity
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Position at the center of the vertical collision box
    pub fn center_position(&self) -> Vec2 {
        self.position + self.vertical_box.center()
    }

    /// Moves the body so the center of its vertical box lands on `center`
    pub fn set_center_position(&mut self, center: Vec2) {
        self.position = center - self.vertical_box.center();
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Assigns the velocity directly and flags the Verlet solver to resync
    /// its previous position before the next step
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.velocity_dirty = true;
    }

    /// Magnitude of the velocity
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit vector of motion, or zero when (near) stationary; never NaN
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Pending accumulated acceleration for the next step
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration.get()
    }

    /// Pending acceleration plus the gravity force last applied
    pub fn current_forces(&self) -> Vec2 {
        self.acceleration.get() + self.gravity_force
    }

    /// Unscaled gravity force vector last applied to this body
    pub fn gravity_force(&self) -> Vec2 {
        self.gravity_force
    }

    /// Mass; heavier bodies accelerate less per unit force
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Speed clamp applied by the Euler solver; `0.0` means unclamped
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// True when the body stood on (or within one pixel of) a peer during the
    /// last corrected update
    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// True when overlap with any peer remained at the end of the last
    /// correction pass
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    /// This body's own identity
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// Identity treated as "self" during collision correction
    pub fn owner(&self) -> ColliderId {
        self.owner
    }

    /// Vertical collision box in world space
    pub fn vertical_bounds(&self) -> Rect {
        self.vertical_box.translated(self.position)
    }

    /// Horizontal collision box in world space
    pub fn horizontal_bounds(&self) -> Rect {
        self.horizontal_box.translated(self.position)
    }

    /// Union of both world-space collision boxes
    pub fn bounds(&self) -> Rect {
        self.vertical_bounds().union(self.horizontal_bounds())
    }

    /// Accumulates a force, scaled down by mass
    pub fn apply_force(&self, force: Vec2) {
        self.acceleration.set(self.acceleration.get() + force / self.mass);
    }

    /// Accumulates a gravity force, ignoring mass
    pub fn apply_gravity(&self, gravity: Vec2) {
        self.acceleration.set(self.acceleration.get() + gravity);
    }

    /// Applies a force of magnitude `coeff` opposing the current velocity;
    /// does nothing when stationary. Mass-scaled, unlike gravity.
    pub fn apply_friction(&self, coeff: f32) {
        if self.velocity != Vec2::ZERO {
            self.apply_force(self.velocity.normalize() * -coeff);
        }
    }

    /// Advances this body one step without collision correction
    pub fn update(&mut self, dt: f32) {
        self.step(dt, None);
    }

    /// Advances this body one step, then corrects box overlap against `peers`.
    ///
    /// Peers are read in the order supplied (the corrector is order
    /// sensitive); membership is never mutated and no reference outlives the
    /// call. Peers sharing this body's owner identity are skipped.
    pub fn update_with(&mut self, dt: f32, peers: &[&dyn Collidable]) {
        self.step(dt, Some(peers));
    }

    fn step(&mut self, dt: f32, peers: Option<&[&dyn Collidable]>) {
        if !self.enabled {
            return;
        }

        // gravity fights the ground normal, so a grounded body gets none
        if self.enable_gravity && !self.on_ground {
            self.gravity_force = Vec2::new(0.0, GRAVITY);
            self.apply_gravity(self.gravity_force * self.gravity_scale);
        }

        match self.solver {
            Solver::Euler => integrator::integrate_euler(self, dt),
            Solver::Verlet => integrator::integrate_verlet(self, dt),
        }

        match peers {
            Some(peers) if self.enable_collisions => self.correct_collisions(peers),
            _ => {
                self.on_ground = false;
                self.is_colliding = false;
            }
        }

        self.direction = if self.velocity.length_squared() >= consts::EPSILON {
            self.velocity.normalize()
        } else {
            Vec2::ZERO
        };
    }

    pub(crate) fn take_acceleration(&self) -> Vec2 {
        self.acceleration.replace(Vec2::ZERO)
    }

    fn correct_collisions(&mut self, peers: &[&dyn Collidable]) {
        self.on_ground = false;
        self.is_colliding = false;

        for iteration in 0..COLLISION_ITERATIONS {
            let mut any_overlap = false;

            for peer in peers {
                if peer.id() == self.owner {
                    continue;
                }
                if !peer.collisions_enabled() {
                    continue;
                }
                if self.resolve_against(*peer) {
                    any_overlap = true;
                }
            }

            self.is_colliding = any_overlap;

            if !any_overlap {
                trace!(iterations = iteration + 1, "collision correction settled");
                break;
            }
        }

        let speed = self.velocity.length();
        if self.on_ground && speed > consts::SPEED_EPSILON {
            self.apply_friction(speed * self.mass * self.ground_friction_scale);
        }
    }

    /// Resolves overlap with one peer on each axis independently; returns
    /// whether either axis box overlapped before correction.
    fn resolve_against(&mut self, peer: &dyn Collidable) -> bool {
        let mut overlapped = false;
        let peer_bounds = peer.bounds();

        let vertical = self.vertical_bounds();

        // standing on: the peer sits below and its top edge is within one
        // pixel of this body's bottom edge, overlap or not
        if peer_bounds.is_below(vertical) && peer_bounds.top() <= vertical.bottom() + 1 {
            self.on_ground = true;
        }

        if peer_bounds.intersects(vertical) {
            overlapped = true;

            let peer_below = peer_bounds.top() >= vertical.top();
            let displacement = if peer_below {
                vertical.bottom() - peer_bounds.top()
            } else {
                vertical.top() - peer_bounds.bottom()
            };
            self.position.y -= displacement as f32;

            // Impulse hand-off: the full pre-zero velocity is pushed into a
            // dynamic peer as a force. Not momentum conserving; stacked
            // dynamic bodies can gain energy from it.
            if let Some(dynamic) = peer.as_dynamic() {
                dynamic.apply_force(self.velocity);
            }

            self.velocity.y = 0.0;
            self.velocity_dirty = true;
            // pixel snap, kills subpixel jitter against the contact edge
            self.position.y = self.position.y.trunc();
        }

        let horizontal = self.horizontal_bounds();
        if peer_bounds.intersects(horizontal) {
            overlapped = true;

            let peer_right = peer_bounds.left() >= horizontal.left();
            let displacement = if peer_right {
                horizontal.right() - peer_bounds.left()
            } else {
                horizontal.left() - peer_bounds.right()
            };
            self.position.x -= displacement as f32;

            if let Some(dynamic) = peer.as_dynamic() {
                dynamic.apply_force(self.velocity);
            }

            self.velocity.x = 0.0;
            self.velocity_dirty = true;
            self.position.x = self.position.x.trunc();
        }

        overlapped
    }
}

impl Collidable for Body {
    fn id(&self) -> ColliderId {
        self.owner
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Rect {
        self.bounds()
    }

    fn collisions_enabled(&self) -> bool {
        self.enable_collisions
    }

    fn as_dynamic(&self) -> Option<&dyn DynamicBody> {
        Some(self)
    }
}

impl DynamicBody for Body {
    fn apply_force(&self, force: Vec2) {
        Body::apply_force(self, force);
    }
}
