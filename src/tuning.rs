//! Game balance values
//!
//! Every number that shapes difficulty lives here so it can be overridden
//! from JSON without touching the simulation. Missing fields fall back to
//! the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors produced while loading tuning data
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Values parsed but make no sense together
    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Balance values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed & score ===
    /// Starting world speed (units/sec)
    pub initial_speed: f32,
    /// Hard speed cap
    pub max_speed: f32,
    /// Speed multiplier per elapsed minute (exponential ramp)
    pub speed_growth_per_minute: f32,
    /// Passive score per unit of distance travelled
    pub distance_score_factor: f32,

    // === Player physics ===
    /// Upward velocity applied when a jump starts
    pub jump_impulse: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Lateral speed while changing lanes
    pub lane_change_rate: f32,
    /// Upward velocity applied when the player dies
    pub death_impulse: f32,
    /// Lowest height a dead player can fall to
    pub death_floor_y: f32,

    // === Spawning ===
    /// Depth where entities appear (negative is ahead of the player)
    pub spawn_z: f32,
    /// Depth past which entities are removed
    pub despawn_z: f32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    /// Pause after a pattern, as a factor of a random spawn interval
    pub post_pattern_pause_factor: f32,
    /// Chance to start a pattern instead of a single spawn
    pub pattern_chance: f32,
    /// Chance a single spawn is a collectible instead of an obstacle
    pub collectible_chance: f32,
    pub magnet_chance: f32,
    pub shield_chance: f32,
    pub multiplier_chance: f32,
    /// Seconds that must pass before another special collectible can roll
    pub min_time_between_specials: f32,
    /// Chance a single collectible spawns at jump height
    pub high_collectible_chance: f32,

    // === Power-ups ===
    /// Extra lateral pickup width while the magnet is active
    pub magnet_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_speed: 15.0,
            max_speed: 40.0,
            speed_growth_per_minute: 1.05,
            distance_score_factor: 0.05,

            jump_impulse: 15.0,
            gravity: 35.0,
            lane_change_rate: 15.0,
            death_impulse: 5.0,
            death_floor_y: -5.0,

            spawn_z: -120.0,
            despawn_z: 20.0,
            min_spawn_interval: 0.6,
            max_spawn_interval: 1.8,
            post_pattern_pause_factor: 1.5,
            pattern_chance: 0.4,
            collectible_chance: 0.3,
            magnet_chance: 0.15,
            shield_chance: 0.15,
            multiplier_chance: 0.15,
            min_time_between_specials: 15.0,
            high_collectible_chance: 0.3,

            magnet_range: 4.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active balance)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that values are usable together
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: String| Err(TuningError::Invalid(msg));

        if !(self.initial_speed > 0.0) {
            return invalid(format!("initial_speed must be positive, got {}", self.initial_speed));
        }
        if self.max_speed < self.initial_speed {
            return invalid(format!(
                "max_speed {} is below initial_speed {}",
                self.max_speed, self.initial_speed
            ));
        }
        if !(self.speed_growth_per_minute >= 1.0) {
            return invalid("speed_growth_per_minute must be at least 1".to_string());
        }
        if !(self.min_spawn_interval > 0.0) || self.min_spawn_interval > self.max_spawn_interval {
            return invalid(format!(
                "spawn interval [{}, {}] is empty or non-positive",
                self.min_spawn_interval, self.max_spawn_interval
            ));
        }
        if !(self.post_pattern_pause_factor > 0.0) {
            return invalid("post_pattern_pause_factor must be positive".to_string());
        }
        if !(self.jump_impulse > 0.0 && self.gravity > 0.0 && self.lane_change_rate > 0.0) {
            return invalid(
                "jump_impulse, gravity and lane_change_rate must be positive".to_string(),
            );
        }
        if self.spawn_z >= self.despawn_z {
            return invalid(format!(
                "spawn_z {} must be ahead of despawn_z {}",
                self.spawn_z, self.despawn_z
            ));
        }
        if self.death_floor_y > crate::consts::GROUND_Y {
            return invalid("death_floor_y must not be above the ground".to_string());
        }
        if self.magnet_range < 0.0 || self.distance_score_factor < 0.0 {
            return invalid(
                "magnet_range and distance_score_factor must not be negative".to_string(),
            );
        }

        let probabilities = [
            ("pattern_chance", self.pattern_chance),
            ("collectible_chance", self.collectible_chance),
            ("magnet_chance", self.magnet_chance),
            ("shield_chance", self.shield_chance),
            ("multiplier_chance", self.multiplier_chance),
            ("high_collectible_chance", self.high_collectible_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        let specials = self.magnet_chance + self.shield_chance + self.multiplier_chance;
        if specials > 1.0 {
            return invalid(format!("special collectible chances sum to {specials} (> 1)"));
        }

        Ok(())
    }
}
