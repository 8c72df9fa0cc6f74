//! Simulation clock
//!
//! Two independent periodic timers (spawn, steering) driven by frame deltas.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Fixed-period timer with an accumulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub period: f32,
    elapsed: f32,
}

impl Timer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Accumulate `dt` and return how many times the timer fired
    ///
    /// At most `MAX_SUBSTEPS` firings per call; any backlog beyond that is
    /// dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !(self.period > 0.0) {
            return 0;
        }
        self.elapsed += dt.max(0.0);

        let mut fired = 0;
        while self.elapsed >= self.period && fired < MAX_SUBSTEPS {
            self.elapsed -= self.period;
            fired += 1;
        }
        if self.elapsed >= self.period {
            self.elapsed %= self.period;
        }
        fired
    }
}

/// Timer firings due for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTicks {
    pub spawn: u32,
    pub steer: u32,
}

/// Drives the spawn and steering timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    pub spawn: Timer,
    pub steer: Timer,
    running: bool,
    /// Total spawn firings since start
    pub spawn_ticks: u64,
    /// Total steering firings since start
    pub steer_ticks: u64,
}

impl SimClock {
    pub fn new(spawn_period: f32, steer_period: f32) -> Self {
        Self {
            spawn: Timer::new(spawn_period),
            steer: Timer::new(steer_period),
            running: true,
            spawn_ticks: 0,
            steer_ticks: 0,
        }
    }

    /// Advance both timers by a frame delta (clamped to `MAX_FRAME_DT`)
    pub fn advance(&mut self, dt: f32) -> ClockTicks {
        if !self.running {
            return ClockTicks::default();
        }
        let dt = dt.min(MAX_FRAME_DT);
        let ticks = ClockTicks {
            spawn: self.spawn.advance(dt),
            steer: self.steer.advance(dt),
        };
        self.spawn_ticks += u64::from(ticks.spawn);
        self.steer_ticks += u64::from(ticks.steer);
        ticks
    }

    /// Stop both timers; later `advance` calls fire nothing
    pub fn cancel(&mut self) {
        if self.running {
            log::debug!("Simulation clock canceled");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
