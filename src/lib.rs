//! Lane Runner - simulation core of an endless three-lane runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, spawner, collisions, power-ups)
//! - `platform`: Clock and input collaborators
//! - `ui`: HUD snapshot and notifications for the UI sink
//! - `runner`: Per-frame driver wiring the simulation to its collaborators
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod runner;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use runner::{Runner, WorldSink};
pub use tuning::{Tuning, TuningError};
pub use ui::{HudSnapshot, Notification, UiSink};

use glam::Vec3;

/// Fixed world geometry
pub mod consts {
    /// Horizontal offsets of the three lanes (left, center, right)
    pub const LANES: [f32; 3] = [-4.0, 0.0, 4.0];
    /// Lane the player starts in
    pub const START_LANE: usize = 1;

    /// Player center height when standing on the track
    pub const GROUND_Y: f32 = 1.0;
    /// Player bounding box (width, height, depth)
    pub const PLAYER_SIZE: [f32; 3] = [1.0, 2.0, 0.8];

    /// Obstacle center height
    pub const OBSTACLE_Y: f32 = 1.0;

    /// Default collectible hover height
    pub const COLLECTIBLE_Y: f32 = 1.5;
    /// Collectible height that can only be reached by jumping
    pub const COLLECTIBLE_JUMP_Y: f32 = 3.0;
    /// Collectible bounding box (width, height, depth)
    pub const COLLECTIBLE_SIZE: [f32; 3] = [1.0, 0.1, 1.0];
    /// Collectible bob amplitude
    pub const COLLECTIBLE_BOB_HEIGHT: f32 = 0.2;
    /// Collectible bob phase speed (radians/sec)
    pub const COLLECTIBLE_BOB_SPEED: f32 = 1.5;
    /// Collectible spin speed (radians/sec)
    pub const COLLECTIBLE_SPIN_SPEED: f32 = 3.0;

    /// Length of one looping track segment
    pub const TRACK_SEGMENT_LENGTH: f32 = 30.0;

    /// Largest frame delta fed to the simulation (prevents jumps after stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Number of lanes on the track
pub const LANE_COUNT: usize = consts::LANES.len();

/// Horizontal offset of a lane, clamped to the outermost lanes
#[inline]
pub fn lane_offset(lane: usize) -> f32 {
    consts::LANES[lane.min(LANE_COUNT - 1)]
}

/// Build a vector from a `[width, height, depth]` triple
#[inline]
pub fn size_vec(size: [f32; 3]) -> Vec3 {
    Vec3::from_array(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_offset_clamps() {
        assert_eq!(lane_offset(0), -4.0);
        assert_eq!(lane_offset(1), 0.0);
        assert_eq!(lane_offset(2), 4.0);
        assert_eq!(lane_offset(7), 4.0);
    }
}
