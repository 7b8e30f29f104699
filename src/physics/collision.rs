//! Collision detection and resolution
//!
//! Sphere-versus-AABB queries against phase-gated obstacles, plus the
//! iterative penetration resolver, step traversal scan, and support-height
//! sampling used by the player controller.
//!
//! # Collision Volumes
//!
//! The player carries two spheres derived from the camera-anchored position:
//! a body sphere centered near the feet and a smaller head sphere slightly
//! above the camera. The head sphere exists to stop the step-up and
//! penetration logic from squeezing the player through gaps at head height.
//!
//! # Phase Gating
//!
//! Every query is filtered first by phase distance: an obstacle whose finite
//! window does not reach the query's phase value is skipped entirely, as if
//! it did not exist. See [`crate::world::Obstacle::phase_active`].

use glam::Vec3;

use crate::world::Obstacle;

/// Maximum number of penetration-correction passes per tick.
const PENETRATION_PASSES: usize = 3;

/// Penetrations shallower than this are treated as resting contact by the
/// resolver, not corrected. Covers f32 rounding of snapped ground heights
/// (order 1e-7 at world scale) with a wide margin while staying far below
/// any real penetration depth.
const CONTACT_EPSILON: f32 = 1.0e-4;

/// Sphere/box overlap test for a single obstacle.
///
/// The closest point on the box is found by per-axis clamping, except that
/// the vertical clamp's upper bound is capped at `top - stand_clearance`
/// (floored at the box bottom). This keeps a sphere resting exactly on the
/// top face from reporting as penetrating, which would otherwise make
/// standing on obstacles jitter.
///
/// Obstacles outside the query's phase window never overlap.
pub fn sphere_overlaps(
    center: Vec3,
    radius: f32,
    w: f32,
    obstacle: &Obstacle,
    stand_clearance: f32,
) -> bool {
    if !obstacle.phase_active(w, radius) {
        return false;
    }
    let max_y = obstacle.min.y.max(obstacle.max.y - stand_clearance);
    let closest = Vec3::new(
        center.x.clamp(obstacle.min.x, obstacle.max.x),
        center.y.clamp(obstacle.min.y, max_y),
        center.z.clamp(obstacle.min.z, obstacle.max.z),
    );
    closest.distance_squared(center) < radius * radius
}

/// The player's pair of collision spheres and the tolerances they carry.
///
/// Offsets are relative to the camera-anchored player position. Constructed
/// once from the controller config; all methods are read-only queries or
/// pure position corrections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBody {
    /// Body sphere offset from the player position (below the camera)
    pub body_offset: Vec3,
    /// Body sphere radius
    pub body_radius: f32,
    /// Head sphere offset from the player position (above the camera)
    pub head_offset: Vec3,
    /// Head sphere radius
    pub head_radius: f32,
    /// Tolerance that lets a sphere rest on a top face without penetrating
    pub stand_clearance: f32,
}

impl CollisionBody {
    /// Build the collision body for a camera at `eye_height` above the feet.
    ///
    /// The body sphere sits at the feet (`body_radius - eye_height` below
    /// the camera); the head sphere sits `head_offset_y` above it.
    pub fn new(
        eye_height: f32,
        body_radius: f32,
        head_radius: f32,
        head_offset_y: f32,
        stand_clearance: f32,
    ) -> Self {
        Self {
            body_offset: Vec3::new(0.0, body_radius - eye_height, 0.0),
            body_radius,
            head_offset: Vec3::new(0.0, head_offset_y, 0.0),
            head_radius,
            stand_clearance,
        }
    }

    fn spheres(&self) -> [(Vec3, f32); 2] {
        [
            (self.body_offset, self.body_radius),
            (self.head_offset, self.head_radius),
        ]
    }

    /// Does either collision sphere overlap any obstacle at this position
    /// and phase value?
    pub fn collides(&self, pos: Vec3, w: f32, obstacles: &[Obstacle]) -> bool {
        for obstacle in obstacles {
            for (offset, radius) in self.spheres() {
                if sphere_overlaps(pos + offset, radius, w, obstacle, self.stand_clearance) {
                    return true;
                }
            }
        }
        false
    }

    /// Iteratively push the body out of any penetrating obstacles.
    ///
    /// Runs up to three passes; each overlap is classified as a top-landing
    /// (body sphere's bottom within `stand_clearance` of the box top), which
    /// lifts the position vertically and clamps falling velocity to zero, or
    /// a side-push, which moves the position along the vector from the
    /// closest box point to the sphere center by exactly the penetration
    /// depth. The head sphere is pushed with its vertical component zeroed
    /// to avoid top-surface jitter. A pass with no corrections ends early.
    ///
    /// Returns `true` if any overlap was found (even if fully corrected).
    pub fn resolve_penetration(
        &self,
        pos: &mut Vec3,
        vertical_velocity: &mut f32,
        w: f32,
        obstacles: &[Obstacle],
    ) -> bool {
        let mut overlapped = false;
        for _ in 0..PENETRATION_PASSES {
            let mut adjusted = false;
            for obstacle in obstacles {
                for (sphere, (offset, radius)) in self.spheres().into_iter().enumerate() {
                    let is_body = sphere == 0;
                    if !obstacle.phase_active(w, radius) {
                        continue;
                    }
                    let center = *pos + offset;
                    // Resolution clamps against the full box; the stand
                    // clearance only applies to the overlap query.
                    let closest = Vec3::new(
                        center.x.clamp(obstacle.min.x, obstacle.max.x),
                        center.y.clamp(obstacle.min.y, obstacle.max.y),
                        center.z.clamp(obstacle.min.z, obstacle.max.z),
                    );
                    let mut diff = center - closest;
                    // Only penetrations deeper than the contact epsilon are
                    // corrected. A body resting on a top face sits within
                    // f32 rounding of the exact contact distance; without
                    // the epsilon the top-landing lift re-fires every tick
                    // and the body never settles.
                    let contact = radius - CONTACT_EPSILON;
                    if diff.length_squared() >= contact * contact {
                        continue;
                    }

                    let feet = center.y - radius;
                    let top = obstacle.top();
                    let near_top = feet >= top - self.stand_clearance
                        && feet <= top + self.stand_clearance;
                    if near_top && is_body {
                        // Top-landing: vertical lift only.
                        let desired_center_y = top + radius + self.stand_clearance;
                        let delta_y = desired_center_y - center.y;
                        if delta_y > 0.0 {
                            pos.y += delta_y;
                        }
                        *vertical_velocity = vertical_velocity.max(0.0);
                        overlapped = true;
                        adjusted = true;
                        continue;
                    }

                    overlapped = true;
                    if !is_body {
                        diff.y = 0.0;
                    }
                    let dist = diff.length();
                    let dist = if dist > 0.0 { dist } else { 1.0e-4 };
                    let push = diff * ((radius - dist) / dist);
                    *pos += push;
                    adjusted = true;
                    if push.y > 0.0 {
                        *vertical_velocity = vertical_velocity.max(0.0);
                    }
                }
            }
            if !adjusted {
                break;
            }
        }
        overlapped
    }

    /// Highest phase-filtered obstacle top under the column at (x, z), with
    /// the footprint inflated by the body radius.
    ///
    /// Returns `f32::NEG_INFINITY` when no obstacle is under the column;
    /// callers floor the result at the world baseline.
    pub fn support_height_at(&self, x: f32, z: f32, w: f32, obstacles: &[Obstacle]) -> f32 {
        let mut highest = f32::NEG_INFINITY;
        for obstacle in obstacles {
            if !obstacle.phase_active(w, self.body_radius) {
                continue;
            }
            if obstacle.footprint_contains(x, z, self.body_radius) {
                highest = highest.max(obstacle.top());
            }
        }
        highest
    }

    /// Step traversal scan: among obstacles under the column whose top is at
    /// or above `feet_y` by no more than `step_height`, the highest top.
    ///
    /// `None` when there is nothing to step onto; the caller snaps the feet
    /// onto the returned top, zeroes vertical velocity, and marks grounded.
    pub fn step_up_top(
        &self,
        x: f32,
        z: f32,
        feet_y: f32,
        step_height: f32,
        w: f32,
        obstacles: &[Obstacle],
    ) -> Option<f32> {
        let mut best: Option<f32> = None;
        for obstacle in obstacles {
            if !obstacle.phase_active(w, self.body_radius) {
                continue;
            }
            if !obstacle.footprint_contains(x, z, self.body_radius) {
                continue;
            }
            let diff = obstacle.top() - feet_y;
            if diff >= 0.0 && diff <= step_height {
                best = Some(best.map_or(obstacle.top(), |b: f32| b.max(obstacle.top())));
            }
        }
        best
    }
}
