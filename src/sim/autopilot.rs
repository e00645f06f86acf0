//! Idle/demo driver
//!
//! Reads the current state and produces the intent a cautious player would
//! press: leave a lane with an obstacle coming, drift toward collectibles,
//! and jump when boxed in. Deterministic, no RNG.

use super::player::PlayerIntent;
use super::state::GameState;
use crate::consts::{COLLECTIBLE_Y, GROUND_Y};
use crate::{LANE_COUNT, lane_offset};

/// Seconds of warning the autopilot wants before reaching an obstacle
const REACTION_TIME: f32 = 0.9;
/// Time-to-impact at which a boxed-in player jumps
const JUMP_LEAD_TIME: f32 = 0.25;
/// Lateral distance counted as "in the lane"
const LANE_HALF_WIDTH: f32 = 1.5;

/// Decide this step's intent
pub fn drive(state: &GameState) -> PlayerIntent {
    let player = &state.player;
    if player.is_dead() {
        return PlayerIntent::default();
    }

    let speed = state.speed.max(1.0);
    let lookahead = speed * REACTION_TIME + 2.0;
    let lane = player.lane;

    // Distance ahead to the nearest obstacle in a lane (None if clear)
    let threat = |lane: usize| -> Option<f32> {
        let x = lane_offset(lane);
        state
            .spawner
            .obstacles
            .iter()
            .filter(|o| (o.pos.x - x).abs() < LANE_HALF_WIDTH)
            .map(|o| player.pos.z - o.pos.z)
            .filter(|d| *d > -1.0 && *d < lookahead)
            .min_by(|a, b| a.total_cmp(b))
    };

    // Reachable collectibles ahead in a lane
    let reward = |lane: usize| -> usize {
        let x = lane_offset(lane);
        state
            .spawner
            .collectibles
            .iter()
            .filter(|c| (c.pos.x - x).abs() < LANE_HALF_WIDTH)
            .filter(|c| c.base_y <= COLLECTIBLE_Y + 0.01)
            .filter(|c| {
                let d = player.pos.z - c.pos.z;
                d > 0.0 && d < lookahead * 1.5
            })
            .count()
    };

    let neighbours = [lane.checked_sub(1), (lane + 1 < LANE_COUNT).then_some(lane + 1)];
    let step_to = |target: usize| PlayerIntent {
        move_left: target < lane,
        move_right: target > lane,
        ..Default::default()
    };

    match threat(lane) {
        Some(distance) => {
            let escape = neighbours
                .iter()
                .flatten()
                .copied()
                .filter(|&l| threat(l).is_none())
                .max_by_key(|&l| reward(l));
            if let Some(target) = escape {
                return step_to(target);
            }
            // Boxed in: jump just before impact
            if distance / speed < JUMP_LEAD_TIME && player.pos.y <= GROUND_Y {
                return PlayerIntent { jump: true, ..Default::default() };
            }
            PlayerIntent::default()
        }
        None => {
            // Settle before considering another lane change
            if player.pos.x != player.lane_target_x {
                return PlayerIntent::default();
            }
            let here = reward(lane);
            let better = neighbours
                .iter()
                .flatten()
                .copied()
                .filter(|&l| threat(l).is_none())
                .filter(|&l| reward(l) > here)
                .max_by_key(|&l| reward(l));
            better.map(step_to).unwrap_or_default()
        }
    }
}
