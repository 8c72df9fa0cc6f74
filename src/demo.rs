//! Idle/demo autoplay
//!
//! Taps on a fixed cadence: dismisses the title and game-over screens, and
//! while playing swats the fly closest to the target point.

use glam::Vec2;

use crate::scene::Scene;
use crate::sim::{GameCore, GamePhase, TickInput};

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Seconds between taps
    pub interval: f32,
    /// Seconds to wait on the game-over screen before restarting
    pub game_over_pause: f32,
    cooldown: f32,
}

impl AutoPlayer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            game_over_pause: 2.0,
            cooldown: interval.max(0.0),
        }
    }

    /// Where the autoplayer would tap right now, if anywhere
    pub fn aim<S: Scene + ?Sized>(&self, core: &GameCore, scene: &S) -> Option<Vec2> {
        match core.phase() {
            GamePhase::TitleScreen | GamePhase::GameOver => Some(Vec2::ZERO),
            GamePhase::Playing => {
                let target = core.target.unwrap_or(Vec2::ZERO);
                core.flies
                    .iter()
                    .filter_map(|f| scene.body(f.visual))
                    .map(|k| k.pos)
                    .min_by(|a, b| {
                        a.distance_squared(target)
                            .partial_cmp(&b.distance_squared(target))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
            }
        }
    }

    /// Input for the next frame
    pub fn poll<S: Scene + ?Sized>(&mut self, core: &GameCore, scene: &S, dt: f32) -> TickInput {
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return TickInput::default();
        }

        match self.aim(core, scene) {
            Some(point) => {
                self.cooldown = if core.phase() == GamePhase::GameOver {
                    self.game_over_pause.max(self.interval)
                } else {
                    self.interval
                };
                TickInput::tap(point)
            }
            None => TickInput::default(),
        }
    }
}
