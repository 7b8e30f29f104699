//! Per-tick input intent
//!
//! One flat record of everything the player asked for this tick. The
//! aggregator is responsible for merging keyboard and touch sources
//! additively (a key plus a swipe in the same direction still clamps to
//! full deflection); the controller is responsible for sanitizing the
//! result before it touches any velocity state, since a NaN that reaches
//! the integrator corrupts the position permanently.

use glam::Vec3;

/// Movement intent for a single simulation tick.
///
/// Move axes are in `[-1, 1]`; the phase axis carries the merged
/// keyboard/swipe direction. Forward/right are the look controller's
/// orientation projected to the horizontal plane and normalized - the
/// controller never reads camera state directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputIntent {
    /// Strafe axis: positive = right
    pub move_x: f32,
    /// Forward axis: positive = forward
    pub move_z: f32,
    /// Phase-axis intent: positive shifts w upward
    pub phase_axis: f32,
    /// Climb-hold level
    pub climb_held: bool,
    /// Sprint-control hold level (tap/hold disambiguated by the controller)
    pub sprint_held: bool,
    /// Sprint engaged automatically by full analog deflection; an auto
    /// sprint never fires a dash on release
    pub sprint_auto: bool,
    /// Jump edge trigger (pressed this tick)
    pub jump_pressed: bool,
    /// Horizontal-projected, normalized camera forward
    pub forward: Vec3,
    /// Horizontal-projected, normalized camera right
    pub right: Vec3,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self {
            move_x: 0.0,
            move_z: 0.0,
            phase_axis: 0.0,
            climb_held: false,
            sprint_held: false,
            sprint_auto: false,
            jump_pressed: false,
            // Yaw 0 looks toward -Z.
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl InputIntent {
    /// A neutral intent (no movement, default facing).
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Copy with every numeric field made safe to integrate:
    /// non-finite axes become zero, axes clamp to `[-1, 1]`, and the
    /// direction vectors are flattened to the horizontal plane and
    /// normalized (zero when degenerate).
    pub fn sanitized(&self) -> Self {
        let mut clean = *self;
        clean.move_x = sanitize_axis(self.move_x);
        clean.move_z = sanitize_axis(self.move_z);
        clean.phase_axis = sanitize_axis(self.phase_axis);
        clean.forward = sanitize_direction(self.forward);
        clean.right = sanitize_direction(self.right);
        clean
    }

    /// True when either move axis carries input.
    pub fn has_move_input(&self) -> bool {
        self.move_x != 0.0 || self.move_z != 0.0
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn sanitize_direction(dir: Vec3) -> Vec3 {
    if !dir.is_finite() {
        return Vec3::ZERO;
    }
    Vec3::new(dir.x, 0.0, dir.z).normalize_or_zero()
}
