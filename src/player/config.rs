//! Player movement constants and configuration.
//!
//! This module defines the physics parameters for the four-dimensional
//! character controller: walking, sprinting, dashing, jumping, climbing,
//! phase shifting and the stamina economy that gates them.
//!
//! Several tolerances (`stand_clearance`, `ground_snap`, `ground_tolerance`,
//! the climb attach margin) are empirically calibrated feel values, not
//! derived quantities. Treat them as a set: they are tuned against each
//! other (for example `ground_snap` is deliberately larger than
//! `step_height`, so most low ledges are taken by the ground snap before
//! the step-traversal scan ever fires).

use glam::Vec3;

use crate::physics::CollisionBody;

/// Clamp applied to every tick's delta time to prevent physics explosions
/// after a long frame. Zero is allowed: a zero-dt update is a strict no-op
/// apart from already-elapsed timers.
pub const MAX_TICK_DT: f32 = 0.1;

/// All tuning constants for one controller instance.
///
/// Values are configurable per instance; the defaults are the shipped feel.
///
/// # Example
///
/// ```ignore
/// use wshift_engine::player::KinematicConfig;
///
/// // A floatier variant for a low-gravity level.
/// let config = KinematicConfig {
///     gravity: -14.0,
///     jump_strength: 7.0,
///     ..KinematicConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicConfig {
    /// Camera height above the feet in meters.
    pub eye_height: f32,

    /// Body collision sphere radius.
    pub player_radius: f32,

    /// Head collision sphere radius (smaller, offset above the camera).
    pub head_radius: f32,

    /// Head sphere offset above the camera.
    pub head_offset: f32,

    /// Gravity acceleration in m/s²; negative = downward.
    pub gravity: f32,

    /// Vertical velocity applied by a ground jump.
    pub jump_strength: f32,

    /// Maximum ledge height taken by step traversal without a jump.
    pub step_height: f32,

    /// Exponential friction coefficient while grounded.
    pub ground_friction: f32,

    /// Exponential friction coefficient while airborne.
    pub air_friction: f32,

    /// Tolerance that lets a sphere rest on a top face without penetrating.
    pub stand_clearance: f32,

    /// How far above the feet a support may be and still snap them up.
    pub ground_snap: f32,

    /// How far below the feet a support may be and still count as ground.
    pub ground_tolerance: f32,

    /// Vertical speed while climbing.
    pub climb_speed: f32,

    /// Extra reach beyond the body radius for climb attachment.
    pub climb_attach_margin: f32,

    /// Horizontal acceleration from move input.
    pub move_acceleration: f32,

    /// Horizontal speed cap (before the sprint multiplier).
    pub max_move_speed: f32,

    /// Acceleration along the phase axis.
    pub phase_acceleration: f32,

    /// Speed cap along the phase axis.
    pub max_phase_speed: f32,

    /// Sprint multiplier on `max_move_speed`.
    pub sprint_speed_multiplier: f32,

    /// Sprint multiplier on `move_acceleration`.
    pub sprint_accel_multiplier: f32,

    /// Horizontal speed forced during a dash.
    pub dash_speed: f32,

    /// Duration of the dash velocity override in seconds.
    pub dash_duration: f32,

    /// Cooldown between dash starts (longer than the dash itself).
    pub dash_cooldown: f32,

    /// Stamina debited atomically by each dash.
    pub dash_stamina_cost: f32,

    /// Sprint-control hold duration separating a tap (dash) from a hold
    /// (sprint), in seconds.
    pub dash_tap_threshold: f32,

    /// Upward boost granted when dashing out of a climb.
    pub climb_dash_vertical_boost: f32,

    /// Vertical impulse of a wall jump.
    pub wall_jump_up_strength: f32,

    /// Horizontal push away from the wall on a wall jump.
    pub wall_jump_push_strength: f32,

    /// Cooldown between wall jumps.
    pub wall_jump_cooldown: f32,

    /// Window after releasing a climb during which a wall jump is still
    /// honored.
    pub wall_jump_grace: f32,

    /// Stamina pool capacity.
    pub stamina_max: f32,

    /// Stamina recovered per second once the regen delay has elapsed.
    pub stamina_regen_rate: f32,

    /// Delay after spending before regeneration resumes.
    pub stamina_regen_delay: f32,

    /// Stamina drained per second while sprinting and moving.
    pub sprint_stamina_rate: f32,

    /// Stamina drained per second while climbing.
    pub climb_stamina_rate: f32,

    /// Y coordinate of the world floor; the feet never go below it.
    pub base_ground_y: f32,

    /// Touch-input profile: climbing with no axis held climbs upward, and
    /// releasing a climb tops up the wall-jump grace window.
    pub touch_mode: bool,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            player_radius: 0.3,
            head_radius: 0.26,
            head_offset: 0.1,
            gravity: -28.0,
            jump_strength: 9.0,
            step_height: 0.35,
            ground_friction: 8.0,
            air_friction: 4.5,
            stand_clearance: 0.02,
            ground_snap: 0.5,
            ground_tolerance: 0.4,
            climb_speed: 6.0,
            climb_attach_margin: 0.25,
            move_acceleration: 22.0,
            max_move_speed: 20.0,
            phase_acceleration: 22.0,
            max_phase_speed: 20.0,
            sprint_speed_multiplier: 2.0,
            sprint_accel_multiplier: 1.8,
            dash_speed: 16.0,
            dash_duration: 0.1,
            dash_cooldown: 0.6,
            dash_stamina_cost: 25.0,
            dash_tap_threshold: 0.18,
            climb_dash_vertical_boost: 6.5,
            wall_jump_up_strength: 11.0,
            wall_jump_push_strength: 9.0,
            wall_jump_cooldown: 0.25,
            wall_jump_grace: 0.16,
            stamina_max: 100.0,
            stamina_regen_rate: 26.0,
            stamina_regen_delay: 0.6,
            sprint_stamina_rate: 16.0,
            climb_stamina_rate: 32.0,
            base_ground_y: 0.0,
            touch_mode: false,
        }
    }
}

impl KinematicConfig {
    /// Creates a config with the default (shipped) values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance from the body center within which a climbable face attaches.
    pub fn climb_attach_distance(&self) -> f32 {
        self.player_radius + self.climb_attach_margin
    }

    /// Offset from the camera-anchored position to the body sphere center.
    pub fn body_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.player_radius - self.eye_height, 0.0)
    }

    /// The pair of collision spheres this config describes.
    pub fn collision_body(&self) -> CollisionBody {
        CollisionBody::new(
            self.eye_height,
            self.player_radius,
            self.head_radius,
            self.head_offset,
            self.stand_clearance,
        )
    }
}
