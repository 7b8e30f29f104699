//! Stamina pool shared by sprinting, climbing and dashing.
//!
//! One pool per controller. Lump spends (dashes) are atomic: they either
//! debit the full cost or fail without side effects. Continuous drains
//! (sprint, climb) take whatever is left. Regeneration resumes only after
//! a fixed delay since the last spend, and never within the same tick as
//! a spend.

/// Regenerating stamina pool.
#[derive(Debug, Clone)]
pub struct StaminaPool {
    max: f32,
    value: f32,
    regen_rate: f32,
    regen_delay: f32,
    regen_cooldown: f32,
    used_this_tick: bool,
    dirty: bool,
}

impl StaminaPool {
    /// Creates a full pool.
    pub fn new(max: f32, regen_rate: f32, regen_delay: f32) -> Self {
        Self {
            max,
            value: max,
            regen_rate,
            regen_delay,
            regen_cooldown: 0.0,
            used_this_tick: false,
            dirty: true,
        }
    }

    /// Clears the per-tick spend marker. Call once at the start of each
    /// simulation tick, before any spends or drains.
    pub fn begin_tick(&mut self) {
        self.used_this_tick = false;
    }

    /// Atomically debits `cost`. Returns false (and changes nothing) if
    /// the pool cannot cover the full amount.
    pub fn spend(&mut self, cost: f32) -> bool {
        if self.value < cost {
            return false;
        }
        self.value -= cost;
        self.regen_cooldown = self.regen_delay;
        self.used_this_tick = true;
        self.dirty = true;
        true
    }

    /// Continuous drain at `rate` per second, clamped at zero. Only an
    /// actual reduction resets the regen delay.
    pub fn drain(&mut self, rate: f32, dt: f32) {
        let before = self.value;
        self.value = (self.value - rate * dt).max(0.0);
        if self.value < before {
            self.regen_cooldown = self.regen_delay;
            self.used_this_tick = true;
            self.dirty = true;
        }
    }

    /// Regenerates toward `max`. Call once at the end of each tick. A tick
    /// that spent or drained regenerates nothing; the delay countdown
    /// itself consumes whole ticks before recovery begins.
    pub fn regenerate(&mut self, dt: f32) {
        if self.used_this_tick {
            return;
        }
        if self.regen_cooldown > 0.0 {
            self.regen_cooldown = (self.regen_cooldown - dt).max(0.0);
            return;
        }
        if self.value < self.max {
            self.value = (self.value + self.regen_rate * dt).min(self.max);
            self.dirty = true;
        }
    }

    /// Current stamina.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Pool capacity.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current stamina as a fraction of capacity in `[0, 1]`.
    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 { self.value / self.max } else { 0.0 }
    }

    /// True when fully drained.
    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }

    /// True if the value changed since the flag was last taken.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the change flag.
    pub fn take_dirty(&mut self) -> bool {
        let was = self.dirty;
        self.dirty = false;
        was
    }

    /// Refills the pool and clears all timers.
    pub fn reset(&mut self) {
        self.value = self.max;
        self.regen_cooldown = 0.0;
        self.used_this_tick = false;
        self.dirty = true;
    }
}
