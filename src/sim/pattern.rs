//! Pre-authored spawn patterns
//!
//! A pattern is a fixed sequence of spawns emitted one element per
//! `spacing` seconds. Templates are static data and never mutated; the
//! spawner only keeps a cursor into one.

use super::state::CollectibleKind::{self, Multiplier, Shield};

/// What a pattern element spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSpawn {
    Obstacle,
    Collectible(CollectibleKind),
    /// Magnet, shield or multiplier, picked uniformly when emitted
    RandomPowerUp,
}

/// One spawn in a pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternElement {
    pub spawn: PatternSpawn,
    /// Lane index (0..LANE_COUNT)
    pub lane: usize,
    /// Collectible height override (ignored for obstacles)
    pub height: Option<f32>,
}

impl PatternElement {
    const fn obstacle(lane: usize) -> Self {
        Self { spawn: PatternSpawn::Obstacle, lane, height: None }
    }

    const fn collectible(kind: CollectibleKind, lane: usize) -> Self {
        Self { spawn: PatternSpawn::Collectible(kind), lane, height: None }
    }

    const fn coin(lane: usize) -> Self {
        Self::collectible(CollectibleKind::Coin, lane)
    }

    const fn high_coin(lane: usize) -> Self {
        Self {
            spawn: PatternSpawn::Collectible(CollectibleKind::Coin),
            lane,
            height: Some(crate::consts::COLLECTIBLE_JUMP_Y),
        }
    }

    const fn random_power_up(lane: usize) -> Self {
        Self { spawn: PatternSpawn::RandomPowerUp, lane, height: None }
    }
}

/// A named, timed spawn sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub name: &'static str,
    pub elements: &'static [PatternElement],
    /// Seconds between consecutive elements
    pub spacing: f32,
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The pattern library. Every entry must be non-empty with valid lanes.
pub static PATTERNS: [Pattern; 7] = [
    Pattern {
        name: "zigzag",
        elements: &[
            PatternElement::obstacle(0),
            PatternElement::obstacle(1),
            PatternElement::coin(1),
            PatternElement::obstacle(2),
            PatternElement::obstacle(1),
        ],
        spacing: 1.2,
    },
    Pattern {
        name: "wall-with-gap",
        elements: &[
            PatternElement::obstacle(0),
            PatternElement::obstacle(2),
            PatternElement::coin(1),
        ],
        spacing: 0.8,
    },
    Pattern {
        name: "collectible-line",
        elements: &[
            PatternElement::coin(0),
            PatternElement::coin(0),
            PatternElement::coin(1),
            PatternElement::coin(2),
            PatternElement::coin(2),
        ],
        spacing: 0.5,
    },
    Pattern {
        name: "jump-challenge",
        elements: &[
            PatternElement::obstacle(0),
            PatternElement::obstacle(1),
            PatternElement::obstacle(2),
            PatternElement::high_coin(1),
        ],
        spacing: 1.0,
    },
    Pattern {
        name: "power-up-challenge",
        elements: &[
            PatternElement::obstacle(0),
            PatternElement::obstacle(1),
            PatternElement::random_power_up(2),
            PatternElement::obstacle(0),
            PatternElement::obstacle(2),
        ],
        spacing: 1.2,
    },
    Pattern {
        name: "shield-needed",
        elements: &[
            PatternElement::collectible(Shield, 1),
            PatternElement::obstacle(0),
            PatternElement::obstacle(1),
            PatternElement::obstacle(2),
        ],
        spacing: 1.0,
    },
    Pattern {
        name: "multiplier-opportunity",
        elements: &[
            PatternElement::collectible(Multiplier, 1),
            PatternElement::coin(0),
            PatternElement::coin(1),
            PatternElement::coin(2),
            PatternElement::coin(1),
            PatternElement::coin(0),
        ],
        spacing: 0.6,
    },
];
