//! Per-frame simulation step
//!
//! Taps delivered for a frame are resolved first, then the clock advances and
//! fires its spawn and steering timers. Nothing interleaves with a partially
//! processed tap.
//!
//! The scene integrates physics between frames, not between timer firings.
//! When one frame fires several steering ticks they all read the same
//! kinematics, and their forces pile up into the next physics step.

use glam::Vec2;

use super::input::{InputReport, on_input};
use super::spawn::{SpawnOutcome, try_spawn};
use super::state::GameCore;
use super::steering;
use crate::scene::Scene;

/// Input events for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click points, in delivery order
    pub taps: Vec<Vec2>,
}

impl TickInput {
    pub fn tap(point: Vec2) -> Self {
        Self { taps: vec![point] }
    }
}

/// Everything that happened during one frame
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub inputs: Vec<InputReport>,
    pub spawns: Vec<SpawnOutcome>,
    /// Steering ticks that ran
    pub steer_ticks: u32,
}

impl TickReport {
    pub fn points(&self) -> u64 {
        self.inputs.iter().map(|r| r.points).sum()
    }

    pub fn spawned(&self) -> usize {
        self.spawns
            .iter()
            .filter(|s| matches!(s, SpawnOutcome::Spawned(_)))
            .count()
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick<S: Scene + ?Sized>(
    core: &mut GameCore,
    scene: &mut S,
    input: &TickInput,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();

    for &point in &input.taps {
        report.inputs.push(on_input(core, scene, point));
    }

    let ticks = core.clock.advance(dt);
    for _ in 0..ticks.spawn {
        report.spawns.push(try_spawn(core, scene));
    }
    for _ in 0..ticks.steer {
        steering::update(core, scene);
    }
    report.steer_ticks = ticks.steer;

    report
}
