//! Per-frame simulation step
//!
//! Core game loop that advances the session by one frame. The order of
//! sub-steps is fixed; changing it changes outcomes.

use super::autopilot;
use super::collision::{CollisionOutcome, check_obstacles, collect_pickups};
use super::player::PlayerIntent;
use super::powerup::{distance_score, game_speed, pickup_score};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (edge-triggered, cleared by the caller)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the ready screen
    pub start: bool,
    /// Reset the run (accepted in any phase)
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn intent(&self) -> PlayerIntent {
        PlayerIntent {
            jump: self.jump,
            move_left: self.move_left,
            move_right: self.move_right,
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);

    if input.restart {
        state.restart();
        return;
    }

    // Handle pause toggle. The resume step itself does not advance time.
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused at {:.1}s", state.elapsed);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed");
                return;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Ready => {
            if input.start || input.jump || input.idle_mode {
                state.start();
            }
        }
        GamePhase::Paused => {}
        GamePhase::GameOver => {
            // Only the death fall and leftover particles keep animating
            state.player.update(dt, PlayerIntent::default(), &state.tuning);
            state.update_particles(dt);
        }
        GamePhase::Running => {
            let intent = if input.idle_mode {
                autopilot::drive(state)
            } else {
                input.intent()
            };
            step_running(state, intent, dt);
        }
    }
}

/// One gameplay step while running
fn step_running(state: &mut GameState, intent: PlayerIntent, dt: f32) {
    state.time_ticks += 1;
    state.elapsed += dt;

    // Speed ramp
    state.speed = game_speed(&state.tuning, state.elapsed);

    // Power-up timers
    for kind in state.powerups.update(dt) {
        log::info!("{} expired", kind.as_str());
        state.events.push(GameEvent::PowerUpExpired { kind });
    }

    // World scroll (track looping is the environment's job)
    state.scroll_distance += dt * state.speed;

    // Spawn and move entities
    state
        .spawner
        .update(dt, state.speed, &state.tuning, &mut state.rng, &mut state.events);

    // Player physics
    state.player_moved = state.player.update(dt, intent, &state.tuning);

    // Obstacles, swept over this step's scroll
    let player_box = state.player.aabb();
    let travel = dt * state.speed;
    let shield_active = state.powerups.shield.active;
    match check_obstacles(&player_box, &state.spawner.obstacles, shield_active, travel) {
        CollisionOutcome::NoCollision => {}
        CollisionOutcome::Collision { obstacle_id } => {
            state.player.die(&state.tuning);
            state.phase = GamePhase::GameOver;
            let score = state.display_score();
            state.events.push(GameEvent::GameOver { score });
            log::info!(
                "Game over: hit obstacle {} after {:.1}s, score {}",
                obstacle_id,
                state.elapsed,
                score
            );
            state.update_particles(dt);
            return;
        }
        CollisionOutcome::ShieldAbsorbed { obstacle_id } => {
            state.powerups.consume_shield();
            state.events.push(GameEvent::ShieldBroken);
            if let Some(obstacle) = state.spawner.remove_obstacle(obstacle_id) {
                state
                    .events
                    .push(GameEvent::ObstacleSmashed { id: obstacle.id, pos: obstacle.pos });
                state.spawn_burst(obstacle.pos);
            }
            log::info!("Shield absorbed obstacle {}", obstacle_id);
        }
    }

    // Pickups, in spawn order; each sees the multiplier left by the previous one
    let collected = collect_pickups(
        &player_box,
        &mut state.spawner.collectibles,
        state.powerups.magnet.active,
        state.tuning.magnet_range,
    );
    for item in collected {
        let effect = item.kind.effect();
        let points = pickup_score(effect.points, state.powerups.score_multiplier());
        state.score += points;
        state.events.push(GameEvent::Collected {
            id: item.id,
            kind: item.kind,
            pos: item.pos,
            points,
        });
        state.spawn_burst(item.pos);

        if let Some(grant) = effect.power_up {
            let remaining = state.powerups.activate(grant.kind, grant.duration, grant.value);
            log::info!("{} activated ({:.1}s left)", grant.kind.as_str(), remaining);
            state.events.push(GameEvent::PowerUpActivated {
                kind: grant.kind,
                duration: grant.duration,
                remaining,
                value: grant.value,
            });
        }
    }

    // Distance score
    if !state.player.is_dead() {
        let multiplier = state.powerups.score_multiplier();
        state.score += distance_score(&state.tuning, dt, state.speed, multiplier);
    }

    state.update_particles(dt);
}
