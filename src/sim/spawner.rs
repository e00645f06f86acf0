//! Procedural obstacle and collectible spawner
//!
//! One countdown drives everything. When it runs out the spawner either
//! emits the next element of the pattern in progress, starts a new pattern,
//! or does a single random spawn. All spawned entities scroll toward the
//! player at world speed and are dropped once they pass `despawn_z`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::{PATTERNS, Pattern, PatternElement, PatternSpawn};
use super::state::{Collectible, CollectibleKind, GameEvent, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{LANE_COUNT, lane_offset};

/// Position inside a pattern being emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCursor {
    /// Index into [`PATTERNS`]
    pattern: usize,
    /// Next element to emit
    next: usize,
}

impl PatternCursor {
    /// Cursor at the first element of `PATTERNS[pattern]`
    pub fn new(pattern: usize) -> Self {
        Self { pattern, next: 0 }
    }

    /// Pattern being emitted, `None` if the index is out of range
    pub fn pattern(&self) -> Option<&'static Pattern> {
        PATTERNS.get(self.pattern)
    }

    /// Element due next, `None` once past the end or for a bad index
    pub fn element(&self) -> Option<PatternElement> {
        self.pattern()?.elements.get(self.next).copied()
    }

    pub fn next_index(&self) -> usize {
        self.next
    }
}

/// Spawns and scrolls the active entity set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    /// Seconds until the next spawn
    pub timer: f32,
    /// Pattern in progress, if any
    pub current: Option<PatternCursor>,
    /// Seconds since a special collectible was last rolled
    pub since_special: f32,
    /// Next entity id (never reused, survives resets)
    next_id: u32,
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            timer: random_interval(tuning, rng),
            current: None,
            since_special: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear all entities, cancel the pattern and reseed the timer
    pub fn reset<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.obstacles.clear();
        self.collectibles.clear();
        self.current = None;
        self.since_special = 0.0;
        self.timer = random_interval(tuning, rng);
    }

    /// Advance one step: scroll entities, then spawn if the timer ran out
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        speed: f32,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.advance_entities(dt, speed, tuning, events);

        self.since_special += dt;
        self.timer -= dt;
        if self.timer > 0.0 {
            return;
        }

        if self.current.is_some() {
            self.emit_pattern_element(tuning, rng, events);
        } else if rng.random::<f32>() < tuning.pattern_chance {
            let index = rng.random_range(0..PATTERNS.len());
            log::debug!("Starting pattern '{}'", PATTERNS[index].name);
            self.current = Some(PatternCursor::new(index));
            self.emit_pattern_element(tuning, rng, events);
        } else {
            let lane = rng.random_range(0..LANE_COUNT);
            if rng.random::<f32>() < tuning.collectible_chance {
                let kind = self.roll_collectible_kind(tuning, rng);
                let height = if rng.random::<f32>() < tuning.high_collectible_chance {
                    COLLECTIBLE_JUMP_Y
                } else {
                    COLLECTIBLE_Y
                };
                self.spawn_collectible(kind, lane, height, tuning, rng, events);
            } else {
                self.spawn_obstacle(lane, tuning, rng, events);
            }
            self.timer = random_interval(tuning, rng);
        }
    }

    /// Scroll everything toward the player and drop what passed `despawn_z`
    fn advance_entities(
        &mut self,
        dt: f32,
        speed: f32,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        let distance = dt * speed;

        for obstacle in &mut self.obstacles {
            obstacle.pos.z += distance;
        }
        for collectible in &mut self.collectibles {
            collectible.animate(dt);
            collectible.pos.z += distance;
        }

        let despawn_z = tuning.despawn_z;
        self.obstacles.retain(|o| {
            let keep = o.pos.z <= despawn_z;
            if !keep {
                events.push(GameEvent::Despawned { id: o.id });
            }
            keep
        });
        self.collectibles.retain(|c| {
            let keep = c.pos.z <= despawn_z;
            if !keep {
                events.push(GameEvent::Despawned { id: c.id });
            }
            keep
        });
    }

    /// Emit the element under the cursor and schedule the next one
    fn emit_pattern_element<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(mut cursor) = self.current else {
            return;
        };
        let (Some(pattern), Some(element)) = (cursor.pattern(), cursor.element()) else {
            log::warn!("Dropping invalid pattern cursor {:?}", cursor);
            self.current = None;
            self.timer = random_interval(tuning, rng);
            return;
        };

        match element.spawn {
            PatternSpawn::Obstacle => self.spawn_obstacle(element.lane, tuning, rng, events),
            PatternSpawn::Collectible(kind) => {
                let height = element.height.unwrap_or(COLLECTIBLE_Y);
                self.spawn_collectible(kind, element.lane, height, tuning, rng, events);
            }
            PatternSpawn::RandomPowerUp => {
                let kind = random_power_up_kind(rng);
                let height = element.height.unwrap_or(COLLECTIBLE_Y);
                self.spawn_collectible(kind, element.lane, height, tuning, rng, events);
            }
        }

        cursor.next += 1;
        if cursor.next >= pattern.len() {
            self.current = None;
            self.timer = random_interval(tuning, rng) * tuning.post_pattern_pause_factor;
        } else {
            self.current = Some(cursor);
            self.timer = pattern.spacing;
        }
    }

    /// Coins unless enough time has passed since the last special; then roll
    /// the special bands. Rolling a special restarts the wait.
    fn roll_collectible_kind<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
    ) -> CollectibleKind {
        if self.since_special < tuning.min_time_between_specials {
            return CollectibleKind::Coin;
        }

        let roll = rng.random::<f32>();
        let kind = if roll < tuning.magnet_chance {
            CollectibleKind::Magnet
        } else if roll < tuning.magnet_chance + tuning.shield_chance {
            CollectibleKind::Shield
        } else if roll < tuning.magnet_chance + tuning.shield_chance + tuning.multiplier_chance {
            CollectibleKind::Multiplier
        } else {
            CollectibleKind::Coin
        };

        if kind.is_special() {
            log::debug!("Special collectible rolled: {:?}", kind);
            self.since_special = 0.0;
        }
        kind
    }

    fn spawn_obstacle<R: Rng + ?Sized>(
        &mut self,
        lane: usize,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let id = self.next_entity_id();
        let pos = glam::Vec3::new(lane_offset(lane), OBSTACLE_Y, tuning.spawn_z);
        self.obstacles.push(Obstacle { id, kind, pos });
        events.push(GameEvent::ObstacleSpawned { id, kind, pos });
    }

    fn spawn_collectible<R: Rng + ?Sized>(
        &mut self,
        kind: CollectibleKind,
        lane: usize,
        height: f32,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let phase = rng.random::<f32>() * std::f32::consts::TAU;
        let id = self.next_entity_id();
        let collectible =
            Collectible::new(id, kind, lane_offset(lane), height, tuning.spawn_z, phase);
        events.push(GameEvent::CollectibleSpawned { id, kind, pos: collectible.pos });
        self.collectibles.push(collectible);
    }

    /// Remove an obstacle by id, returning it
    pub fn remove_obstacle(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(index))
    }
}

/// Uniform spawn interval in `[min_spawn_interval, max_spawn_interval]`
fn random_interval<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> f32 {
    let span = tuning.max_spawn_interval - tuning.min_spawn_interval;
    tuning.min_spawn_interval + rng.random::<f32>() * span
}

fn random_power_up_kind<R: Rng + ?Sized>(rng: &mut R) -> CollectibleKind {
    const POWER_UPS: [CollectibleKind; 3] =
        [CollectibleKind::Magnet, CollectibleKind::Shield, CollectibleKind::Multiplier];
    POWER_UPS[rng.random_range(0..POWER_UPS.len())]
}
