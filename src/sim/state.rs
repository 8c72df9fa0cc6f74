//! Game state and the core that owns the whole simulation
//!
//! `GameState` is the phase machine and score; `GameCore` bundles it with the
//! fly registry, clock, tunables and RNG so every system works on one value.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::registry::{FlyId, FlyRegistry};
use crate::scene::{OverlayId, Scene};
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Attract screen; flies buzz around, first tap starts a run
    #[default]
    TitleScreen,
    /// Active run
    Playing,
    /// Too many flies; next tap returns to the title screen
    GameOver,
}

impl GamePhase {
    /// Phase after a tap/click
    pub fn after_input(self) -> GamePhase {
        match self {
            GamePhase::TitleScreen => GamePhase::Playing,
            GamePhase::Playing => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::TitleScreen,
        }
    }

    /// Opacity targets for the title and game-over overlays
    pub fn overlay_targets(self) -> [(OverlayId, f32); 2] {
        match self {
            GamePhase::TitleScreen => [(OverlayId::Title, 1.0), (OverlayId::GameOver, 0.0)],
            GamePhase::Playing => [(OverlayId::Title, 0.0), (OverlayId::GameOver, 0.0)],
            GamePhase::GameOver => [(OverlayId::Title, 0.0), (OverlayId::GameOver, 1.0)],
        }
    }
}

/// A phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: GamePhase,
    pub to: GamePhase,
}

impl Transition {
    /// Leaving game over wipes the run
    pub fn is_reset(&self) -> bool {
        self.from == GamePhase::GameOver && self.to == GamePhase::TitleScreen
    }
}

/// Phase and score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the input-driven edge of the phase machine
    pub fn advance_on_input(&mut self) -> Option<Transition> {
        let from = self.phase;
        let to = from.after_input();
        if from == to {
            return None;
        }
        self.phase = to;
        if to == GamePhase::TitleScreen {
            self.score = 0;
        }
        Some(Transition { from, to })
    }

    /// Population overrun while playing; returns the transition if it ended the run
    pub fn overrun(&mut self) -> Option<Transition> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::GameOver;
        Some(Transition {
            from: GamePhase::Playing,
            to: GamePhase::GameOver,
        })
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

/// Points for a catch that leaves `remaining` flies behind
pub fn catch_score(numerator: u64, remaining: usize) -> u64 {
    numerator / (remaining as u64 + 1)
}

/// Serializable view of a running game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub spawn_ticks: u64,
    pub steer_ticks: u64,
    pub flies: Vec<FlySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlySnapshot {
    pub id: FlyId,
    pub pos: Option<Vec2>,
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct GameCore {
    pub state: GameState,
    pub flies: FlyRegistry,
    pub clock: SimClock,
    pub tuning: Tuning,
    /// Steering attractor; steering is skipped while unbound
    pub target: Option<Vec2>,
    pub rng: Pcg32,
    pub seed: u64,
}

impl GameCore {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::new(),
            flies: FlyRegistry::new(),
            clock: SimClock::new(tuning.spawn_period, tuning.steer_period),
            target: tuning.target,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Push the initial presentation state (overlays, score label)
    pub fn attach<S: Scene + ?Sized>(&self, scene: &mut S) {
        self.present_phase(scene);
        scene.set_score_display(&self.state.score.to_string());
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn bind_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    /// React to a phase change: overlays, and a full wipe on reset
    pub fn on_transition<S: Scene + ?Sized>(&mut self, scene: &mut S, transition: Transition) {
        log::info!(
            "Phase {:?} -> {:?} (score {}, flies {})",
            transition.from,
            transition.to,
            self.state.score,
            self.flies.count()
        );
        if transition.is_reset() {
            self.reset(scene);
        }
        self.present_phase(scene);
    }

    /// Clear every fly and zero the score
    pub fn reset<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.release_flies(scene);
        self.state.score = 0;
        scene.set_score_display("0");
    }

    /// Cancel timers, then release every fly
    pub fn teardown<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.clock.cancel();
        self.release_flies(scene);
        log::info!("Game core torn down (final score {})", self.state.score);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            score: self.state.score,
            spawn_ticks: self.clock.spawn_ticks,
            steer_ticks: self.clock.steer_ticks,
            flies: self
                .flies
                .iter()
                .map(|f| FlySnapshot {
                    id: f.id,
                    pos: f.kinematics.map(|k| k.pos),
                })
                .collect(),
        }
    }

    fn release_flies<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        let flies = self.flies.drain();
        if !flies.is_empty() {
            log::debug!("Releasing {} flies", flies.len());
        }
        for fly in flies {
            scene.destroy_visual(fly.visual);
        }
    }

    fn present_phase<S: Scene + ?Sized>(&self, scene: &mut S) {
        for (overlay, opacity) in self.state.phase.overlay_targets() {
            scene.set_overlay_opacity(overlay, opacity, self.tuning.overlay_fade);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessScene;

    #[test]
    fn test_phase_cycle() {
        let mut state = GameState::new();
        assert_eq!(state.phase, GamePhase::TitleScreen);

        let t = state.advance_on_input().unwrap();
        assert_eq!((t.from, t.to), (GamePhase::TitleScreen, GamePhase::Playing));

        // Taps while playing don't change phase
        assert!(state.advance_on_input().is_none());

        state.award(500);
        let t = state.overrun().unwrap();
        assert_eq!(t.to, GamePhase::GameOver);
        assert!(state.overrun().is_none());

        let t = state.advance_on_input().unwrap();
        assert!(t.is_reset());
        assert_eq!(state.phase, GamePhase::TitleScreen);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_overrun_only_while_playing() {
        let mut state = GameState::new();
        assert!(state.overrun().is_none());
        assert_eq!(state.phase, GamePhase::TitleScreen);
    }

    #[test]
    fn test_catch_score() {
        assert_eq!(catch_score(1000, 3), 250);
        assert_eq!(catch_score(1000, 0), 1000);
        assert_eq!(catch_score(1000, 2), 333);
    }

    #[test]
    fn test_reset_clears_flies_and_score() {
        let mut scene = HeadlessScene::new();
        let mut core = GameCore::new(Tuning::default(), 1);
        for _ in 0..3 {
            let handle = scene.spawn_visual(&core.tuning.fly_prototype(Vec2::ZERO));
            core.flies.add(handle, None);
        }
        core.state.phase = GamePhase::GameOver;
        core.state.score = 4321;

        let t = core.state.advance_on_input().unwrap();
        core.on_transition(&mut scene, t);

        assert_eq!(core.flies.count(), 0);
        assert_eq!(core.score(), 0);
        assert_eq!(scene.live_count(), 0);
        assert_eq!(scene.score_text, "0");
        assert_eq!(scene.overlays[&OverlayId::Title], 1.0);
        assert_eq!(scene.overlays[&OverlayId::GameOver], 0.0);
    }

    #[test]
    fn test_teardown_cancels_clock() {
        let mut scene = HeadlessScene::new();
        let mut core = GameCore::new(Tuning::default(), 1);
        let handle = scene.spawn_visual(&core.tuning.fly_prototype(Vec2::ZERO));
        core.flies.add(handle, None);

        core.teardown(&mut scene);
        assert!(!core.clock.is_running());
        assert!(core.flies.is_empty());
        assert_eq!(scene.live_count(), 0);
    }

    #[test]
    fn test_attach_shows_title() {
        let mut scene = HeadlessScene::new();
        let core = GameCore::new(Tuning::default(), 7);
        core.attach(&mut scene);
        assert_eq!(scene.overlays[&OverlayId::Title], 1.0);
        assert_eq!(scene.overlays[&OverlayId::GameOver], 0.0);
        assert_eq!(scene.score_text, "0");
    }
}
