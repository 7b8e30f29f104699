//! First-person kinematic character controller.
//!
//! The controller integrates one fixed-order tick over four axes: the
//! three spatial ones plus the phase coordinate `w` that decides which
//! obstacles are solid. Each tick:
//!
//! 1. Discrete events (jump, sprint tap/hold edges) are applied.
//! 2. Timers advance and the climb state is re-evaluated.
//! 3. Horizontal and phase velocities accelerate, damp and clamp.
//! 4. The horizontal move runs with axis-separated sliding.
//! 5. Climbing pins the body to the wall; otherwise gravity applies.
//! 6. Ground snapping, penetration resolution, step traversal and a
//!    final snap settle the vertical axis.
//! 7. A whole-tick fallback reverts to the previous pose if the result
//!    still intersects, then the phase gate rejects a `w` change that
//!    would materialize an obstacle inside the player.
//! 8. Stamina drains settle and regeneration runs.
//!
//! The controller never stores references into the obstacle list; every
//! call that needs the world takes it as a parameter.

use glam::Vec3;

use crate::input::InputIntent;
use crate::physics::CollisionBody;
use crate::save::{SaveData, SpawnPoint};
use crate::world::Obstacle;

use super::climb::{clamp_to_surface, find_climbable_surface};
use super::config::{KinematicConfig, MAX_TICK_DT};
use super::dash::{DashController, SprintTracker};
use super::stamina::StaminaPool;

/// Snapshot of the controller's movement state after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFlags {
    pub grounded: bool,
    pub climbing: bool,
    pub dashing: bool,
    pub sprinting: bool,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy)]
pub struct PlayerUpdate {
    /// Camera position after the tick.
    pub position: Vec3,
    /// Phase coordinate after the tick.
    pub w: f32,
    pub flags: MovementFlags,
    /// Stamina as a fraction of capacity in `[0, 1]`.
    pub stamina_ratio: f32,
    /// True if stamina changed since the flag was last consumed. Peek
    /// only; [`PlayerController::consume_stamina_changed`] clears it.
    pub stamina_changed: bool,
}

/// The player's kinematic state and the tick that advances it.
pub struct PlayerController {
    config: KinematicConfig,
    body: CollisionBody,
    position: Vec3,
    rotation_y: f32,
    player_w: f32,
    move_velocity: Vec3,
    vertical_velocity: f32,
    phase_velocity: f32,
    grounded: bool,
    climbing: bool,
    sprinting: bool,
    climb_inhibited: bool,
    climb_release_grace: f32,
    wall_jump_cooldown_remaining: f32,
    dash: DashController,
    sprint: SprintTracker,
    stamina: StaminaPool,
}

impl PlayerController {
    pub fn new(config: KinematicConfig) -> Self {
        let body = config.collision_body();
        let dash = DashController::new(
            config.dash_speed,
            config.dash_duration,
            config.dash_cooldown,
            config.dash_stamina_cost,
        );
        let sprint = SprintTracker::new(config.dash_tap_threshold);
        let stamina = StaminaPool::new(
            config.stamina_max,
            config.stamina_regen_rate,
            config.stamina_regen_delay,
        );
        Self {
            config,
            body,
            position: Vec3::new(0.0, config.eye_height, 0.0),
            rotation_y: 0.0,
            player_w: 0.0,
            move_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            phase_velocity: 0.0,
            grounded: false,
            climbing: false,
            sprinting: false,
            climb_inhibited: false,
            climb_release_grace: 0.0,
            wall_jump_cooldown_remaining: 0.0,
            dash,
            sprint,
            stamina,
        }
    }

    /// Advances the simulation by `dt` seconds against `obstacles`.
    pub fn update(&mut self, dt: f32, obstacles: &[Obstacle], intent: &InputIntent) -> PlayerUpdate {
        let dt = dt.clamp(0.0, MAX_TICK_DT);
        let intent = intent.sanitized();

        if intent.jump_pressed {
            self.attempt_jump(obstacles);
        }

        self.stamina.begin_tick();

        if self.grounded {
            self.climbing = false;
        }

        self.wall_jump_cooldown_remaining = (self.wall_jump_cooldown_remaining - dt).max(0.0);
        self.climb_release_grace = (self.climb_release_grace - dt).max(0.0);
        self.dash.tick(dt);

        let (move_dir, input_x, input_z) = Self::input_direction(&intent);
        let has_input = input_x != 0.0 || input_z != 0.0;

        // Sprint edges. A tap release fires a dash instead of sprinting.
        if intent.sprint_held && !self.sprint.is_held() {
            self.sprint.press(intent.sprint_auto);
        }
        self.sprint.tick(dt);
        if !intent.sprint_held && self.sprint.is_held() && self.sprint.release() {
            self.start_dash(move_dir, self.climbing);
        }

        // A wall jump suppresses climbing until the control is released.
        if !intent.climb_held {
            self.climb_inhibited = false;
        }
        let climb_held = intent.climb_held && !self.climb_inhibited;

        self.sprinting =
            self.sprint.held_past_threshold() && self.grounded && !self.stamina.is_empty();

        let dash_active = self.dash.is_active();
        let mut dash_velocity = self.dash.velocity();
        let accel = if self.sprinting {
            self.config.move_acceleration * self.config.sprint_accel_multiplier
        } else {
            self.config.move_acceleration
        };
        let max_speed = if self.sprinting {
            self.config.max_move_speed * self.config.sprint_speed_multiplier
        } else {
            self.config.max_move_speed
        };

        let prev = self.position;
        let old_w = self.player_w;
        let mut next = prev;
        let mut next_w = old_w;

        let climb_surface = if climb_held {
            find_climbable_surface(next, old_w, obstacles, &self.config)
        } else {
            None
        };
        let wants_climb = climb_surface.is_some() && climb_held && self.stamina.value() > 0.0;

        if !wants_climb && self.climbing {
            self.climbing = false;
            if self.config.touch_mode {
                self.climb_release_grace = self.config.wall_jump_grace;
            }
        } else if wants_climb {
            self.climbing = true;
            self.climb_release_grace = self.config.wall_jump_grace;
        }

        if self.climbing {
            self.dash.cancel();
            dash_velocity = Vec3::ZERO;
            self.sprinting = false;
        }

        if dash_active {
            self.move_velocity = dash_velocity;
        } else if !self.climbing && has_input {
            self.move_velocity += move_dir * (accel * dt);
        }

        let damping = if dash_active {
            0.0
        } else if self.grounded {
            self.config.ground_friction
        } else {
            self.config.air_friction
        };
        self.move_velocity *= (1.0 - damping * dt).max(0.0);

        let w_damping = if self.grounded {
            self.config.ground_friction
        } else {
            self.config.air_friction
        };
        if intent.phase_axis != 0.0 {
            self.phase_velocity += intent.phase_axis * self.config.phase_acceleration * dt;
        }
        self.phase_velocity *= (1.0 - w_damping * dt).max(0.0);
        if self.phase_velocity.abs() > self.config.max_phase_speed {
            self.phase_velocity = self.phase_velocity.signum() * self.config.max_phase_speed;
        }

        if !dash_active && self.move_velocity.length_squared() > max_speed * max_speed {
            self.move_velocity = self.move_velocity.normalize() * max_speed;
        }

        next_w += self.phase_velocity * dt;

        if self.climbing {
            self.move_velocity = Vec3::ZERO;
        }

        // Horizontal move with axis-separated sliding along walls.
        let horizontal = self.move_velocity * dt;
        if horizontal.length_squared() > 0.0 {
            let target = next + horizontal;
            if self.body.collides(target, old_w, obstacles) {
                let x_only = next + Vec3::new(horizontal.x, 0.0, 0.0);
                let z_only = next + Vec3::new(0.0, 0.0, horizontal.z);
                let x_free = !self.body.collides(x_only, old_w, obstacles);
                let z_free = !self.body.collides(z_only, old_w, obstacles);
                if x_free {
                    next = x_only;
                }
                if z_free {
                    next = z_only;
                }
                if !x_free && !z_free {
                    self.move_velocity = Vec3::ZERO;
                }
            } else {
                next = target;
            }
        }

        // The attach found before the move may have drifted out of range.
        let active_surface = if self.climbing {
            climb_surface.or_else(|| find_climbable_surface(next, old_w, obstacles, &self.config))
        } else {
            None
        };
        if self.climbing && active_surface.is_none() {
            self.climbing = false;
        }

        if let Some(surface) = active_surface.filter(|_| self.climbing) {
            let climb_dir = if input_z != 0.0 {
                input_z.signum()
            } else if self.config.touch_mode {
                1.0
            } else {
                0.0
            };
            self.vertical_velocity = climb_dir * self.config.climb_speed;
            clamp_to_surface(&mut next, &surface, &self.config);
            self.grounded = false;
            self.stamina.drain(self.config.climb_stamina_rate, dt);
            if self.stamina.is_empty() {
                self.climbing = false;
            }
        } else {
            self.vertical_velocity += self.config.gravity * dt;
        }

        next.y += self.vertical_velocity * dt;

        // First ground snap at the post-move footprint.
        let support = self
            .body
            .support_height_at(next.x, next.z, old_w, obstacles)
            .max(self.config.base_ground_y);
        let feet = next.y - self.config.eye_height;
        let diff = support - feet;
        self.grounded = false;

        if self.vertical_velocity <= 0.0
            && diff >= -self.config.ground_tolerance
            && diff <= self.config.ground_snap
        {
            let min_y = support + self.config.eye_height;
            if next.y < min_y {
                next.y = min_y;
                self.vertical_velocity = 0.0;
            }
            self.grounded = true;
        }

        let min_base = self.config.base_ground_y + self.config.eye_height;
        if next.y < min_base {
            next.y = min_base;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        }

        let overlapped =
            self.body
                .resolve_penetration(&mut next, &mut self.vertical_velocity, old_w, obstacles);
        let stepped = if overlapped {
            let feet = next.y - self.config.eye_height;
            match self
                .body
                .step_up_top(next.x, next.z, feet, self.config.step_height, old_w, obstacles)
            {
                Some(top) => {
                    next.y = top + self.config.eye_height;
                    self.vertical_velocity = 0.0;
                    self.grounded = true;
                    true
                }
                None => false,
            }
        } else {
            false
        };

        // Second snap after resolution may have moved the footprint.
        let final_support = self
            .body
            .support_height_at(next.x, next.z, old_w, obstacles)
            .max(self.config.base_ground_y);
        let final_diff = final_support - (next.y - self.config.eye_height);
        if self.vertical_velocity <= 0.0
            && final_diff >= -self.config.ground_tolerance
            && final_diff <= self.config.ground_snap
        {
            let clamp_y = final_support + self.config.eye_height;
            if next.y < clamp_y {
                next.y = clamp_y;
                self.vertical_velocity = 0.0;
            }
            self.grounded = true;
        } else if final_diff > self.config.ground_snap {
            self.grounded = false;
        }

        if overlapped || stepped {
            self.grounded = true;
        }

        // Whole-tick fallback: if still intersecting, revert to the
        // previous pose rather than trap or jitter.
        if self.body.collides(next, old_w, obstacles) {
            next = prev;
            next_w = old_w;
            self.move_velocity = Vec3::ZERO;
            self.vertical_velocity = 0.0;
            self.phase_velocity = 0.0;
        }

        if !self.grounded {
            self.sprinting = false;
        }

        if self.sprinting && (has_input || self.move_velocity.length_squared() > 0.01) {
            self.stamina.drain(self.config.sprint_stamina_rate, dt);
            if self.stamina.is_empty() {
                self.sprinting = false;
            }
        }

        // Phase gate: a w change may not materialize an obstacle inside
        // the player. The spatial pose stays; only w is rejected.
        if next_w != old_w
            && self.body.collides(next, next_w, obstacles)
            && !self.body.collides(next, old_w, obstacles)
        {
            next_w = old_w;
            self.phase_velocity = 0.0;
        }

        self.position = next;
        self.player_w = next_w;
        self.stamina.regenerate(dt);

        PlayerUpdate {
            position: self.position,
            w: self.player_w,
            flags: self.movement_flags(),
            stamina_ratio: self.stamina.ratio(),
            stamina_changed: self.stamina.is_dirty(),
        }
    }

    /// Jumps off the ground, or off the attached wall while climbing (or
    /// within the grace window after releasing a climb). Returns false
    /// when no jump was possible.
    pub fn attempt_jump(&mut self, obstacles: &[Obstacle]) -> bool {
        if self.grounded {
            self.vertical_velocity = self.config.jump_strength;
            self.grounded = false;
            return true;
        }
        let can_wall_jump = (self.climbing || self.climb_release_grace > 0.0)
            && self.wall_jump_cooldown_remaining <= 0.0;
        if !can_wall_jump {
            return false;
        }
        let surface = find_climbable_surface(self.position, self.player_w, obstacles, &self.config);
        if let Some(surface) = surface {
            let push = surface.normal * self.config.wall_jump_push_strength;
            self.move_velocity += Vec3::new(push.x, 0.0, push.z);
            self.vertical_velocity = self.config.wall_jump_up_strength;
            self.grounded = false;
            self.climbing = false;
            self.climb_inhibited = true;
            self.wall_jump_cooldown_remaining = self.config.wall_jump_cooldown;
            self.climb_release_grace = 0.0;
            return true;
        }
        false
    }

    /// Starts a dash along `direction` (flattened to the horizontal
    /// plane). Fails on cooldown, on a degenerate direction, or when
    /// stamina cannot cover the cost; a failure changes nothing.
    pub fn start_dash(&mut self, direction: Vec3, from_climb: bool) -> bool {
        if !self.dash.try_start(direction, &mut self.stamina) {
            return false;
        }
        if from_climb {
            self.vertical_velocity = self
                .vertical_velocity
                .max(self.config.climb_dash_vertical_boost);
            self.grounded = false;
        }
        self.climbing = false;
        true
    }

    /// Teleports to `position` facing `rotation_y` and clears all
    /// transient state: velocities, timers, climb and dash state, and
    /// stamina back to full.
    pub fn reset_player(&mut self, position: Vec3, rotation_y: f32) {
        self.position = position;
        self.rotation_y = rotation_y;
        self.player_w = 0.0;
        self.move_velocity = Vec3::ZERO;
        self.vertical_velocity = 0.0;
        self.phase_velocity = 0.0;
        self.grounded = false;
        self.climbing = false;
        self.sprinting = false;
        self.climb_inhibited = false;
        self.climb_release_grace = 0.0;
        self.wall_jump_cooldown_remaining = 0.0;
        self.dash.reset();
        self.sprint.cancel();
        self.stamina.reset();
    }

    /// Restores a saved pose, falling back to `spawn` for fields the
    /// save predates.
    pub fn restore(&mut self, save: &SaveData, spawn: &SpawnPoint) {
        let rotation_y = save.rotation_y.unwrap_or(spawn.rotation_y);
        log::debug!(
            "restoring player at {:?} (w = {}, level {})",
            save.position,
            save.w,
            save.level
        );
        self.reset_player(save.position, rotation_y);
        self.player_w = save.w;
    }

    /// Sets the phase coordinate directly, zeroing phase velocity.
    pub fn set_player_w(&mut self, w: f32) {
        self.player_w = w;
        self.phase_velocity = 0.0;
    }

    fn input_direction(intent: &InputIntent) -> (Vec3, f32, f32) {
        let mut input_x = intent.move_x;
        let mut input_z = intent.move_z;
        let magnitude = (input_x * input_x + input_z * input_z).sqrt();
        if magnitude > 1.0 {
            input_x /= magnitude;
            input_z /= magnitude;
        }
        let mut move_dir = intent.forward * input_z + intent.right * input_x;
        if move_dir == Vec3::ZERO && intent.forward != Vec3::ZERO {
            // Facing direction stands in so a no-input dash still fires.
            move_dir = intent.forward;
        } else if move_dir != Vec3::ZERO {
            move_dir = move_dir.normalize();
        }
        (move_dir, input_x, input_z)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn set_rotation_y(&mut self, rotation_y: f32) {
        self.rotation_y = rotation_y;
    }

    pub fn player_w(&self) -> f32 {
        self.player_w
    }

    pub fn stamina(&self) -> &StaminaPool {
        &self.stamina
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_climbing(&self) -> bool {
        self.climbing
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_active()
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn movement_flags(&self) -> MovementFlags {
        MovementFlags {
            grounded: self.grounded,
            climbing: self.climbing,
            dashing: self.dash.is_active(),
            sprinting: self.sprinting,
        }
    }

    pub fn config(&self) -> &KinematicConfig {
        &self.config
    }

    pub fn collision_body(&self) -> &CollisionBody {
        &self.body
    }

    /// Returns and clears the stamina change flag, for HUD refreshes.
    pub fn consume_stamina_changed(&mut self) -> bool {
        self.stamina.take_dirty()
    }
}
