//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod pattern;
pub mod player;
pub mod powerup;
pub mod spawner;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{CollisionOutcome, check_obstacles, collect_pickups};
pub use pattern::{PATTERNS, Pattern, PatternElement, PatternSpawn};
pub use player::{Player, PlayerIntent, PlayerState};
pub use powerup::{PowerUpKind, PowerUpTimer, PowerUps, distance_score, game_speed, pickup_score};
pub use spawner::Spawner;
pub use state::{
    Collectible, CollectibleKind, Effect, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    Particle, PowerUpGrant,
};
pub use tick::{TickInput, tick};
