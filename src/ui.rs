//! HUD data and notifications
//!
//! The simulation never talks to a display directly. Each frame the runner
//! builds a `HudSnapshot` and forwards notable events to a `UiSink`.

use serde::Serialize;

use crate::sim::{GameEvent, GamePhase, GameState, PowerUpKind};

/// Display state of one power-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpDisplay {
    pub kind: PowerUpKind,
    pub active: bool,
    /// Whole seconds left, rounded up
    pub seconds_remaining: u32,
    /// Score factor, multiplier only
    pub multiplier: Option<f32>,
}

impl PowerUpDisplay {
    /// Indicator text, e.g. "Magnet: 7s" or "Multiplier: 12s (2x)"
    pub fn label(&self) -> String {
        match self.multiplier {
            Some(value) => {
                format!("{}: {}s ({}x)", self.kind.as_str(), self.seconds_remaining, value)
            }
            None => format!("{}: {}s", self.kind.as_str(), self.seconds_remaining),
        }
    }
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub speed: u32,
    pub phase: GamePhase,
    /// Every power-up in `PowerUpKind::ALL` order, active or not
    pub power_ups: Vec<PowerUpDisplay>,
}

impl HudSnapshot {
    /// Indicators to show, skipping inactive power-ups
    pub fn active_power_ups(&self) -> impl Iterator<Item = &PowerUpDisplay> {
        self.power_ups.iter().filter(|p| p.active)
    }

    pub fn from_state(state: &GameState) -> Self {
        let power_ups = PowerUpKind::ALL
            .iter()
            .map(|&kind| {
                let timer = state.powerups.get(kind);
                let multiplier = (kind == PowerUpKind::Multiplier && timer.active)
                    .then_some(state.powerups.multiplier_value);
                PowerUpDisplay {
                    kind,
                    active: timer.active,
                    seconds_remaining: timer.time_remaining.max(0.0).ceil() as u32,
                    multiplier,
                }
            })
            .collect();

        Self {
            score: state.display_score(),
            speed: state.speed.max(0.0).floor() as u32,
            phase: state.phase,
            power_ups,
        }
    }
}

/// Transient messages shown over the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notification {
    PowerUpActivated { kind: PowerUpKind, duration: f32, value: Option<f32> },
    ShieldBroken,
}

impl Notification {
    /// Notification raised by an event, if any
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::PowerUpActivated { kind, duration, value, .. } => {
                Some(Notification::PowerUpActivated { kind, duration, value })
            }
            GameEvent::ShieldBroken => Some(Notification::ShieldBroken),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::PowerUpActivated { kind: PowerUpKind::Multiplier, duration, value } => {
                format!("{}x Score for {}s!", value.unwrap_or(2.0), duration)
            }
            Notification::PowerUpActivated { kind, duration, .. } => {
                format!("{} activated for {}s!", kind.as_str(), duration)
            }
            Notification::ShieldBroken => "Shield broken!".to_string(),
        }
    }
}

/// Display collaborator
pub trait UiSink {
    /// Called once per frame with the current HUD
    fn update_hud(&mut self, hud: &HudSnapshot);

    fn notify(&mut self, _notification: &Notification) {}

    fn game_over(&mut self, _final_score: u64) {}

    fn restarted(&mut self) {}

    fn paused(&mut self, _paused: bool) {}
}
