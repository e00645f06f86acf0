//! Timed power-ups, score sources and the speed ramp

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Widens the lateral pickup range
    Magnet,
    /// Absorbs one fatal collision
    Shield,
    /// Scales all score gains
    Multiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] =
        [PowerUpKind::Magnet, PowerUpKind::Shield, PowerUpKind::Multiplier];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Magnet => "Magnet",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Multiplier => "Multiplier",
        }
    }
}

/// Countdown for a single power-up.
///
/// `time_remaining > 0` exactly when `active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimer {
    pub active: bool,
    pub time_remaining: f32,
}

impl PowerUpTimer {
    /// Start or extend. Extending adds to what is left.
    fn activate(&mut self, duration: f32) {
        if self.active {
            self.time_remaining += duration;
        } else {
            self.active = true;
            self.time_remaining = duration;
        }
    }

    /// Count down; returns true on the step the timer runs out
    fn update(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.clear();
            return true;
        }
        false
    }

    fn clear(&mut self) {
        self.active = false;
        self.time_remaining = 0.0;
    }
}

/// All active power-up effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUps {
    pub magnet: PowerUpTimer,
    pub shield: PowerUpTimer,
    pub multiplier: PowerUpTimer,
    /// Score factor while the multiplier runs (1 otherwise)
    pub multiplier_value: f32,
}

impl Default for PowerUps {
    fn default() -> Self {
        Self {
            magnet: PowerUpTimer::default(),
            shield: PowerUpTimer::default(),
            multiplier: PowerUpTimer::default(),
            multiplier_value: 1.0,
        }
    }
}

impl PowerUps {
    pub fn get(&self, kind: PowerUpKind) -> &PowerUpTimer {
        match kind {
            PowerUpKind::Magnet => &self.magnet,
            PowerUpKind::Shield => &self.shield,
            PowerUpKind::Multiplier => &self.multiplier,
        }
    }

    fn get_mut(&mut self, kind: PowerUpKind) -> &mut PowerUpTimer {
        match kind {
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::Multiplier => &mut self.multiplier,
        }
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind).active
    }

    /// Start or extend a power-up. A multiplier value, when given, replaces
    /// the current one even if the multiplier is already running.
    ///
    /// Returns the time remaining afterwards. Non-positive durations are ignored.
    pub fn activate(&mut self, kind: PowerUpKind, duration: f32, value: Option<f32>) -> f32 {
        if duration <= 0.0 {
            return self.get(kind).time_remaining;
        }
        self.get_mut(kind).activate(duration);
        if kind == PowerUpKind::Multiplier {
            if let Some(value) = value {
                self.multiplier_value = value;
            }
        }
        self.get(kind).time_remaining
    }

    /// Count all timers down. Returns the kinds that ran out this step.
    pub fn update(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            if self.get_mut(kind).update(dt) {
                expired.push(kind);
            }
        }
        if expired.contains(&PowerUpKind::Multiplier) {
            self.multiplier_value = 1.0;
        }
        expired
    }

    /// Spend the shield on an absorbed hit. Returns false if there was none.
    pub fn consume_shield(&mut self) -> bool {
        if !self.shield.active {
            return false;
        }
        self.shield.clear();
        true
    }

    /// Current score factor (1 when no multiplier runs)
    pub fn score_multiplier(&self) -> f32 {
        if self.multiplier.active { self.multiplier_value } else { 1.0 }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// World speed after `elapsed` seconds: exponential per-minute growth,
/// capped at `max_speed` and never below `initial_speed`.
///
/// Inconsistent tuning (cap below the start, NaN) degrades to the initial
/// speed instead of panicking.
pub fn game_speed(tuning: &Tuning, elapsed: f32) -> f32 {
    let minutes = elapsed.max(0.0) / 60.0;
    let speed = tuning.initial_speed * tuning.speed_growth_per_minute.powf(minutes);
    speed.min(tuning.max_speed).max(tuning.initial_speed)
}

/// Passive score for covering `dt * speed` distance
pub fn distance_score(tuning: &Tuning, dt: f32, speed: f32, multiplier: f32) -> f64 {
    (dt * speed * tuning.distance_score_factor * multiplier) as f64
}

/// Score for a collected item
pub fn pickup_score(points: f32, multiplier: f32) -> f64 {
    (points * multiplier) as f64
}
