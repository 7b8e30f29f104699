//! Dash burst and sprint-control tracking.
//!
//! A dash overrides horizontal velocity with a fixed-speed burst for a
//! short duration, costs a lump of stamina, and sits on a cooldown longer
//! than the burst itself. The sprint control is overloaded: holding it
//! sprints, while a quick tap-and-release fires a dash instead. The
//! tap/hold decision accumulates simulated time, so it is unaffected by
//! host pauses.

use glam::Vec3;

use super::stamina::StaminaPool;

/// Active-burst and cooldown state for the dash.
#[derive(Debug, Clone)]
pub struct DashController {
    speed: f32,
    duration: f32,
    cooldown: f32,
    stamina_cost: f32,
    time_remaining: f32,
    cooldown_remaining: f32,
    vector: Vec3,
}

impl DashController {
    pub fn new(speed: f32, duration: f32, cooldown: f32, stamina_cost: f32) -> Self {
        Self {
            speed,
            duration,
            cooldown,
            stamina_cost,
            time_remaining: 0.0,
            cooldown_remaining: 0.0,
            vector: Vec3::ZERO,
        }
    }

    /// Advances the burst and cooldown timers.
    pub fn tick(&mut self, dt: f32) {
        if self.time_remaining > 0.0 {
            self.time_remaining = (self.time_remaining - dt).max(0.0);
        }
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }

    /// True while the burst is overriding horizontal velocity.
    pub fn is_active(&self) -> bool {
        self.time_remaining > 0.0
    }

    /// True while a new dash is disallowed.
    pub fn on_cooldown(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    /// Horizontal velocity imposed by the burst.
    pub fn velocity(&self) -> Vec3 {
        self.vector * self.speed
    }

    /// Attempts to start a dash along `direction`. The direction is
    /// flattened and validated before any stamina is touched, so a
    /// degenerate direction never costs anything.
    pub fn try_start(&mut self, direction: Vec3, stamina: &mut StaminaPool) -> bool {
        if self.on_cooldown() {
            return false;
        }
        let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        if flat == Vec3::ZERO {
            return false;
        }
        if !stamina.spend(self.stamina_cost) {
            return false;
        }
        self.vector = flat;
        self.time_remaining = self.duration;
        self.cooldown_remaining = self.cooldown;
        true
    }

    /// Ends an active burst early. The cooldown keeps running.
    pub fn cancel(&mut self) {
        self.time_remaining = 0.0;
    }

    /// Clears burst and cooldown state.
    pub fn reset(&mut self) {
        self.time_remaining = 0.0;
        self.cooldown_remaining = 0.0;
        self.vector = Vec3::ZERO;
    }
}

/// Accumulates how long the sprint control has been held, to tell a
/// sprint hold apart from a dash tap on release.
#[derive(Debug, Clone)]
pub struct SprintTracker {
    tap_threshold: f32,
    held: bool,
    hold_time: f32,
    auto: bool,
}

impl SprintTracker {
    pub fn new(tap_threshold: f32) -> Self {
        Self {
            tap_threshold,
            held: false,
            hold_time: 0.0,
            auto: false,
        }
    }

    /// Registers the control going down. `auto` marks a programmatic
    /// sprint (for example a touch toggle) whose release never dashes.
    pub fn press(&mut self, auto: bool) {
        if self.held {
            return;
        }
        self.held = true;
        self.hold_time = 0.0;
        self.auto = auto;
    }

    /// Accumulates hold time while the control is down.
    pub fn tick(&mut self, dt: f32) {
        if self.held {
            self.hold_time += dt;
        }
    }

    /// Registers the control going up. Returns true when the release was
    /// a tap that should fire a dash.
    pub fn release(&mut self) -> bool {
        if !self.held {
            return false;
        }
        self.held = false;
        !self.auto && self.hold_time <= self.tap_threshold
    }

    /// Drops the current hold without firing a dash.
    pub fn cancel(&mut self) {
        self.held = false;
        self.hold_time = 0.0;
        self.auto = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// True once the hold has been long enough to count as a sprint.
    pub fn held_past_threshold(&self) -> bool {
        self.held && self.hold_time > self.tap_threshold
    }
}
