//! Game state and core simulation types
//!
//! Entities are plain data (position, size, kind). Renderers mirror them
//! by id and never own simulation state.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::player::Player;
use super::powerup::{PowerUpKind, PowerUps};
use super::spawner::Spawner;
use crate::consts::*;
use crate::size_vec;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Ready,
    /// Active gameplay
    Running,
    /// Frozen until resumed
    Paused,
    /// Run ended on a fatal collision
    GameOver,
}

/// Obstacle variants, each with its own footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Wide, low fence
    Barrier,
    /// Narrow, tall post
    Bollard,
    /// Squat bin
    TrashBin,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] =
        [ObstacleKind::Barrier, ObstacleKind::Bollard, ObstacleKind::TrashBin];

    /// Bounding box size (width, height, depth)
    pub fn size(&self) -> Vec3 {
        match self {
            ObstacleKind::Barrier => Vec3::new(1.8, 1.2, 0.5),
            ObstacleKind::Bollard => Vec3::new(0.8, 1.8, 0.8),
            ObstacleKind::TrashBin => Vec3::new(1.2, 1.2, 1.2),
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec3,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.kind.size())
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Magnet,
    Shield,
    Multiplier,
}

/// Power-up granted by a collectible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpGrant {
    pub kind: PowerUpKind,
    /// Seconds added to the power-up timer
    pub duration: f32,
    /// Score factor (multiplier only)
    pub value: Option<f32>,
}

/// What collecting an item does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Base points before the score multiplier
    pub points: f32,
    pub power_up: Option<PowerUpGrant>,
}

impl CollectibleKind {
    pub fn effect(&self) -> Effect {
        let grant = |kind, duration, value| Some(PowerUpGrant { kind, duration, value });
        match self {
            CollectibleKind::Coin => Effect { points: 10.0, power_up: None },
            CollectibleKind::Magnet => Effect {
                points: 5.0,
                power_up: grant(PowerUpKind::Magnet, 10.0, None),
            },
            CollectibleKind::Shield => Effect {
                points: 5.0,
                power_up: grant(PowerUpKind::Shield, 8.0, None),
            },
            CollectibleKind::Multiplier => Effect {
                points: 5.0,
                power_up: grant(PowerUpKind::Multiplier, 15.0, Some(2.0)),
            },
        }
    }

    /// True for everything except coins
    pub fn is_special(&self) -> bool {
        *self != CollectibleKind::Coin
    }
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    /// Current center, including the hover bob
    pub pos: Vec3,
    /// Height the bob oscillates around
    pub base_y: f32,
    /// Bob phase (radians)
    pub bob_phase: f32,
    /// Spin angle for rendering (radians)
    pub spin: f32,
}

impl Collectible {
    pub fn new(
        id: u32,
        kind: CollectibleKind,
        x: f32,
        base_y: f32,
        z: f32,
        bob_phase: f32,
    ) -> Self {
        let y = base_y + bob_phase.sin() * COLLECTIBLE_BOB_HEIGHT;
        Self {
            id,
            kind,
            pos: Vec3::new(x, y, z),
            base_y,
            bob_phase,
            spin: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, size_vec(COLLECTIBLE_SIZE))
    }

    /// Advance hover bob and spin
    pub fn animate(&mut self, dt: f32) {
        self.bob_phase += COLLECTIBLE_BOB_SPEED * dt;
        self.spin += COLLECTIBLE_SPIN_SPEED * dt;
        self.pos.y = self.base_y + self.bob_phase.sin() * COLLECTIBLE_BOB_HEIGHT;
    }
}

/// Things that happened during a tick, for collaborators to mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    ObstacleSpawned { id: u32, kind: ObstacleKind, pos: Vec3 },
    CollectibleSpawned { id: u32, kind: CollectibleKind, pos: Vec3 },
    /// Entity scrolled past the player and was removed
    Despawned { id: u32 },
    /// Obstacle destroyed by a shield hit
    ObstacleSmashed { id: u32, pos: Vec3 },
    Collected { id: u32, kind: CollectibleKind, pos: Vec3, points: f64 },
    PowerUpActivated { kind: PowerUpKind, duration: f32, remaining: f32, value: Option<f32> },
    PowerUpExpired { kind: PowerUpKind },
    ShieldBroken,
    GameOver { score: u64 },
}

/// A particle for pickup bursts (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds left to live
    pub life: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;
/// Particles per pickup burst
pub const BURST_PARTICLES: usize = 10;
/// Lifetime of a burst particle (seconds)
pub const PARTICLE_LIFE: f32 = 1.0;

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Balance values
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Real-valued score (displayed floored)
    pub score: f64,
    /// Current world speed
    pub speed: f32,
    /// Seconds of running gameplay this session
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Distance the world has scrolled (drives track looping)
    pub scroll_distance: f32,
    pub player: Player,
    /// Whether the player moved on the last step (animation hint)
    pub player_moved: bool,
    pub spawner: Spawner,
    pub powerups: PowerUps,
    /// Visual particles
    pub particles: Vec<Particle>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with the given balance values
    ///
    /// Values that fail [`Tuning::validate`] are logged but still used; the
    /// simulation stays panic-free with them.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        if let Err(e) = tuning.validate() {
            log::warn!("Running with inconsistent tuning: {}", e);
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::new(&tuning, &mut rng);
        Self {
            seed,
            rng,
            speed: tuning.initial_speed,
            tuning,
            phase: GamePhase::Ready,
            score: 0.0,
            elapsed: 0.0,
            time_ticks: 0,
            scroll_distance: 0.0,
            player: Player::new(),
            player_moved: false,
            spawner,
            powerups: PowerUps::default(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Leave the ready screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::Started);
            log::info!("Session started with seed {}", self.seed);
        }
    }

    /// Reset the run and start playing again. Safe from any phase.
    pub fn restart(&mut self) {
        self.score = 0.0;
        self.speed = self.tuning.initial_speed;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.scroll_distance = 0.0;
        self.player.reset();
        self.player_moved = false;
        self.spawner.reset(&self.tuning, &mut self.rng);
        self.powerups.reset();
        self.particles.clear();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!("Session restarted");
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Scroll position within the current track segment
    pub fn track_offset(&self) -> f32 {
        self.scroll_distance.rem_euclid(TRACK_SEGMENT_LENGTH)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Emit a pickup burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec3) {
        // Hash-based spread keeps visuals off the gameplay RNG stream
        let seed = (self.time_ticks as u32).wrapping_add(self.particles.len() as u32 * 31);
        for i in 0..BURST_PARTICLES {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let hash = seed
                .wrapping_mul(2654435761)
                .wrapping_add(i as u32 * 7919)
                .wrapping_mul(2246822519);
            let unit = |shift: u32| ((hash >> shift) & 0x3ff) as f32 / 1023.0;
            let vel = Vec3::new((unit(0) - 0.5) * 5.0, unit(10) * 5.0, (unit(20) - 0.5) * 5.0);
            self.particles.push(Particle { pos, vel, life: PARTICLE_LIFE });
        }
    }

    /// Move and age particles, dropping dead ones
    pub fn update_particles(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
