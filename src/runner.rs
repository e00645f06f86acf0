//! Frame driver
//!
//! Owns the session and its collaborators. One `frame` call reads the clock,
//! consumes latched input, ticks the simulation once and fans the results out
//! to the world mirror and the UI.

use crate::consts::MAX_FRAME_DT;
use crate::platform::{Clock, InputLatch};
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::ui::{HudSnapshot, Notification, UiSink};

/// Scene collaborator that mirrors entities by id
pub trait WorldSink {
    fn apply_event(&mut self, event: &GameEvent);

    /// Called after all events of a frame (sync transforms, scroll the track)
    fn present(&mut self, _state: &GameState) {}
}

pub struct Runner<C: Clock, W: WorldSink, U: UiSink> {
    state: GameState,
    clock: C,
    input: InputLatch,
    world: W,
    ui: U,
    idle_mode: bool,
}

impl<C: Clock, W: WorldSink, U: UiSink> Runner<C, W, U> {
    pub fn new(state: GameState, clock: C, world: W, ui: U) -> Self {
        Self {
            state,
            clock,
            input: InputLatch::new(),
            world,
            ui,
            idle_mode: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Input events arriving between frames go here
    pub fn input_mut(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    pub fn set_idle_mode(&mut self, idle_mode: bool) {
        if self.idle_mode != idle_mode {
            log::info!("Idle mode: {}", idle_mode);
        }
        self.idle_mode = idle_mode;
    }

    /// Run one frame. Returns the phase after the step.
    pub fn frame(&mut self) -> GamePhase {
        let dt = self.clock.elapsed().clamp(0.0, MAX_FRAME_DT);
        let input = self.input.take(self.idle_mode);
        let before = self.state.phase;

        tick(&mut self.state, &input, dt);

        // Time spent paused must not reach the next step
        if before == GamePhase::Paused && self.state.phase == GamePhase::Running {
            self.clock.reset();
        }

        for event in self.state.drain_events() {
            self.world.apply_event(&event);
            match &event {
                GameEvent::Paused => self.ui.paused(true),
                GameEvent::Resumed => self.ui.paused(false),
                GameEvent::Restarted => self.ui.restarted(),
                GameEvent::GameOver { score } => self.ui.game_over(*score),
                other => {
                    if let Some(notification) = Notification::from_event(other) {
                        self.ui.notify(&notification);
                    }
                }
            }
        }

        self.world.present(&self.state);
        self.ui.update_hud(&HudSnapshot::from_state(&self.state));
        self.state.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedClock;

    #[derive(Default)]
    struct RecordingWorld {
        events: Vec<GameEvent>,
        presents: usize,
    }

    impl WorldSink for RecordingWorld {
        fn apply_event(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }

        fn present(&mut self, _state: &GameState) {
            self.presents += 1;
        }
    }

    #[derive(Default)]
    struct RecordingUi {
        huds: Vec<HudSnapshot>,
        paused: Vec<bool>,
        restarts: usize,
        final_score: Option<u64>,
    }

    impl UiSink for RecordingUi {
        fn update_hud(&mut self, hud: &HudSnapshot) {
            self.huds.push(hud.clone());
        }

        fn game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }

        fn restarted(&mut self) {
            self.restarts += 1;
        }

        fn paused(&mut self, paused: bool) {
            self.paused.push(paused);
        }
    }

    fn runner(seed: u64) -> Runner<FixedClock, RecordingWorld, RecordingUi> {
        Runner::new(
            GameState::new(seed),
            FixedClock::new(1.0 / 60.0),
            RecordingWorld::default(),
            RecordingUi::default(),
        )
    }

    #[test]
    fn test_frame_pushes_hud_and_presents() {
        let mut runner = runner(1);
        runner.input_mut().press_start();
        assert_eq!(runner.frame(), GamePhase::Running);
        runner.frame();

        assert_eq!(runner.ui().huds.len(), 2);
        assert_eq!(runner.world().presents, 2);
        assert_eq!(runner.world().events[0], GameEvent::Started);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut runner = runner(1);
        runner.input_mut().press_start();
        runner.frame();
        let before = runner.state().elapsed;

        runner.clock.stall(3.0);
        runner.frame();
        assert!(runner.state().elapsed - before <= MAX_FRAME_DT + 1e-6);
    }

    #[test]
    fn test_pause_and_resume_reach_ui() {
        let mut runner = runner(1);
        runner.input_mut().press_start();
        runner.frame();

        runner.input_mut().press_pause();
        assert_eq!(runner.frame(), GamePhase::Paused);
        let elapsed = runner.state().elapsed;

        runner.clock.stall(10.0);
        runner.input_mut().press_pause();
        assert_eq!(runner.frame(), GamePhase::Running);
        runner.frame();

        assert_eq!(runner.ui().paused, vec![true, false]);
        // Only one regular step after resuming
        assert!((runner.state().elapsed - elapsed - 1.0 / 60.0).abs() < 1e-5);
    }

    #[test]
    fn test_idle_mode_runs_and_restart_is_signalled() {
        let mut runner = runner(3);
        runner.set_idle_mode(true);
        assert!(runner.idle_mode());
        for _ in 0..120 {
            runner.frame();
        }
        assert_ne!(runner.state().phase, GamePhase::Ready);

        runner.input_mut().press_restart();
        assert_eq!(runner.frame(), GamePhase::Running);
        assert_eq!(runner.ui().restarts, 1);
        assert_eq!(runner.state().score, 0.0);
    }
}
