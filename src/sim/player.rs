//! Player state machine
//!
//! Lane position, jump physics and the death fall. The player never decides
//! to die on its own; the tick loop calls [`Player::die`] on a fatal hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{LANE_COUNT, lane_offset, size_vec};

/// Lean applied while sliding toward another lane (radians)
const LANE_LEAN: f32 = 0.3;
/// Easing rate for lean changes (1/sec)
const LEAN_EASE: f32 = 5.0;
/// Backward pitch rate while falling dead (radians/sec)
const DEATH_PITCH_RATE: f32 = 3.0;

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Running,
    Jumping,
    /// Terminal until [`Player::reset`]
    Dead,
}

/// Edge-triggered intents for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub jump: bool,
    pub move_left: bool,
    pub move_right: bool,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the player's box
    pub pos: Vec3,
    pub vertical_vel: f32,
    /// Current lane index (0..LANE_COUNT)
    pub lane: usize,
    /// X the player is sliding toward
    pub lane_target_x: f32,
    pub state: PlayerState,
    /// Roll toward the lane-change direction (cosmetic)
    pub lean: f32,
    /// Backward rotation during the death fall (cosmetic)
    pub death_pitch: f32,
}

impl Default for Player {
    fn default() -> Self {
        let x = lane_offset(START_LANE);
        Self {
            pos: Vec3::new(x, GROUND_Y, 0.0),
            vertical_vel: 0.0,
            lane: START_LANE,
            lane_target_x: x,
            state: PlayerState::Running,
            lean: 0.0,
            death_pitch: 0.0,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.state == PlayerState::Jumping
    }

    /// Bounding box used for collision and pickup tests
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, size_vec(PLAYER_SIZE))
    }

    /// Advance one step. Returns true if the player did anything visible
    /// (started a jump, is airborne, or is changing lanes).
    pub fn update(&mut self, dt: f32, intent: PlayerIntent, tuning: &Tuning) -> bool {
        if self.is_dead() {
            self.update_death_fall(dt, tuning);
            return false;
        }

        let mut moved = false;

        if intent.jump && self.state == PlayerState::Running {
            self.vertical_vel = tuning.jump_impulse;
            self.state = PlayerState::Jumping;
            moved = true;
        }

        if self.state == PlayerState::Jumping {
            self.vertical_vel -= tuning.gravity * dt;
            self.pos.y += self.vertical_vel * dt;

            if self.pos.y <= GROUND_Y {
                self.pos.y = GROUND_Y;
                self.vertical_vel = 0.0;
                self.state = PlayerState::Running;
            }
            moved = true;
        }

        // Left wins if both are pressed in the same step
        if intent.move_left && self.lane > 0 {
            self.lane -= 1;
            self.lane_target_x = lane_offset(self.lane);
            moved = true;
        } else if intent.move_right && self.lane < LANE_COUNT - 1 {
            self.lane += 1;
            self.lane_target_x = lane_offset(self.lane);
            moved = true;
        }

        let ease = (LEAN_EASE * dt).min(1.0);
        if self.pos.x != self.lane_target_x {
            let diff = self.lane_target_x - self.pos.x;
            let step = diff.signum() * diff.abs().min(tuning.lane_change_rate * dt);
            self.pos.x += step;

            let target_lean = diff.signum() * -LANE_LEAN;
            self.lean += (target_lean - self.lean) * ease;
            moved = true;
        } else {
            self.lean -= self.lean * ease;
        }

        moved
    }

    /// Ballistic fall after death, clamped to the floor
    fn update_death_fall(&mut self, dt: f32, tuning: &Tuning) {
        self.vertical_vel -= tuning.gravity * dt;
        self.pos.y += self.vertical_vel * dt;
        self.death_pitch -= DEATH_PITCH_RATE * dt;

        if self.pos.y < tuning.death_floor_y {
            self.pos.y = tuning.death_floor_y;
            self.vertical_vel = 0.0;
        }
    }

    /// Enter the dead state with an upward kick. No-op if already dead.
    pub fn die(&mut self, tuning: &Tuning) {
        if self.is_dead() {
            return;
        }
        self.state = PlayerState::Dead;
        self.vertical_vel = tuning.death_impulse;
    }

    /// Back to the center lane, standing, alive
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
