//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (frame deltas)
//! - Input events (edge-triggered, latched until the next frame)

use crate::sim::TickInput;

/// Source of frame deltas
pub trait Clock {
    /// Seconds since the previous call (or since the last reset)
    fn elapsed(&mut self) -> f32;

    /// Forget accumulated time so the next delta starts from now
    fn reset(&mut self);
}

/// Wall clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SystemClock {
    last: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self { last: std::time::Instant::now() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn elapsed(&mut self) -> f32 {
        let now = std::time::Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    fn reset(&mut self) {
        self.last = std::time::Instant::now();
    }
}

/// Clock that advances by a constant step every frame (headless runs, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub step: f32,
    /// Pending delta reported by the next `elapsed` call
    pending: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step, pending: step }
    }

    /// Pretend the host stalled for `seconds` before the next frame
    pub fn stall(&mut self, seconds: f32) {
        self.pending += seconds;
    }
}

impl Clock for FixedClock {
    fn elapsed(&mut self) -> f32 {
        let dt = self.pending;
        self.pending = self.step;
        dt
    }

    fn reset(&mut self) {
        self.pending = self.step;
    }
}

/// Collects input events between frames.
///
/// Key presses set one-shot flags; `take` hands them to the simulation and
/// clears them so each press acts exactly once.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: TickInput,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_jump(&mut self) {
        self.pending.jump = true;
    }

    pub fn press_left(&mut self) {
        self.pending.move_left = true;
    }

    pub fn press_right(&mut self) {
        self.pending.move_right = true;
    }

    pub fn press_pause(&mut self) {
        self.pending.pause = true;
    }

    pub fn press_start(&mut self) {
        self.pending.start = true;
    }

    pub fn press_restart(&mut self) {
        self.pending.restart = true;
    }

    /// Map a key name to an action. Returns false for unbound keys.
    pub fn press_key(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => self.press_left(),
            "ArrowRight" | "d" | "D" => self.press_right(),
            "ArrowUp" | " " | "w" | "W" => self.press_jump(),
            "Escape" | "p" | "P" => self.press_pause(),
            "Enter" => self.press_start(),
            "r" | "R" => self.press_restart(),
            _ => return false,
        }
        true
    }

    /// Hand out this frame's input and clear the one-shot flags
    pub fn take(&mut self, idle_mode: bool) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.idle_mode = idle_mode;
        input
    }
}
