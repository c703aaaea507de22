//! Tick pacing: pause and time scale.
//!
//! The clock only decides how many update passes a rendered frame gets; the
//! world runs them. Player input is applied once per frame regardless.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    paused: bool,
    time_scale: u32,
    tick: u64,
    /// Seconds of unpaused frame time.
    elapsed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SimulationClock {
    pub fn new(time_scale: u32) -> Self {
        Self {
            paused: false,
            time_scale: time_scale.max(1),
            tick: 0,
            elapsed: 0.0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Update passes per frame. Clamped to at least one.
    pub fn set_time_scale(&mut self, scale: u32) {
        self.time_scale = scale.max(1);
    }

    /// Number of update passes to run for a frame lasting `delta` seconds.
    pub fn frame(&mut self, delta: f64) -> u32 {
        if self.paused {
            return 0;
        }
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
        }
        self.time_scale
    }

    pub fn record_tick(&mut self) {
        self.tick += 1;
    }

    /// Restarts tick and time counting, keeping pause state and scale.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.elapsed = 0.0;
    }
}
