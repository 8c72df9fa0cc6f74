//! Periodic fly spawning with phase-dependent population caps

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::registry::FlyId;
use super::state::{GameCore, GamePhase};
use crate::scene::Scene;

/// Why a spawn attempt did not create a fly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnRejection {
    /// Title screen already has more than `title_cap` flies
    TitleCap,
    /// Too many flies while playing; the run just ended
    Overrun,
    /// No spawning after the run ended
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnOutcome {
    Spawned(FlyId),
    Rejected(SpawnRejection),
}

/// Population check for the current phase, before the new fly is added
pub fn admission(
    phase: GamePhase,
    count: usize,
    title_cap: usize,
    playing_cap: usize,
) -> Result<(), SpawnRejection> {
    match phase {
        GamePhase::TitleScreen if count > title_cap => Err(SpawnRejection::TitleCap),
        GamePhase::Playing if count > playing_cap => Err(SpawnRejection::Overrun),
        GamePhase::GameOver => Err(SpawnRejection::GameOver),
        _ => Ok(()),
    }
}

/// One spawn attempt
///
/// An overrun while playing flips the phase to game over.
pub fn try_spawn<S: Scene + ?Sized>(core: &mut GameCore, scene: &mut S) -> SpawnOutcome {
    let count = core.flies.count();
    let tuning = &core.tuning;
    let admitted = admission(core.state.phase, count, tuning.title_cap, tuning.playing_cap);
    if let Err(rejection) = admitted {
        log::debug!("Spawn rejected ({:?}) with {} flies", rejection, count);
        if rejection == SpawnRejection::Overrun {
            if let Some(transition) = core.state.overrun() {
                core.on_transition(scene, transition);
            }
        }
        return SpawnOutcome::Rejected(rejection);
    }

    let x = core.rng.random_range(core.tuning.spawn_x_min..=core.tuning.spawn_x_max);
    let position = Vec2::new(x, core.tuning.spawn_y);
    let prototype = core.tuning.fly_prototype(position);

    let visual = scene.spawn_visual(&prototype);
    let id = core.flies.add(visual, scene.body(visual));
    log::debug!("Spawned fly {:?} at ({:.1}, {:.1}), {} live", id, x, position.y, count + 1);
    SpawnOutcome::Spawned(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::OverlayId;
    use crate::{HeadlessScene, Tuning};
    use proptest::prelude::*;

    fn core_with(phase: GamePhase, count: usize, scene: &mut HeadlessScene) -> GameCore {
        let mut core = GameCore::new(Tuning::default(), 42);
        core.state.phase = phase;
        for _ in 0..count {
            let visual = scene.spawn_visual(&core.tuning.fly_prototype(Vec2::ZERO));
            core.flies.add(visual, None);
        }
        core
    }

    #[test]
    fn test_title_cap_boundary() {
        let mut scene = HeadlessScene::new();
        let mut core = core_with(GamePhase::TitleScreen, 4, &mut scene);
        assert!(matches!(try_spawn(&mut core, &mut scene), SpawnOutcome::Spawned(_)));
        assert_eq!(core.flies.count(), 5);

        assert_eq!(
            try_spawn(&mut core, &mut scene),
            SpawnOutcome::Rejected(SpawnRejection::TitleCap)
        );
        assert_eq!(core.flies.count(), 5);
        assert_eq!(core.phase(), GamePhase::TitleScreen);
    }

    #[test]
    fn test_playing_cap_boundary() {
        let mut scene = HeadlessScene::new();
        let mut core = core_with(GamePhase::Playing, 20, &mut scene);
        assert!(matches!(try_spawn(&mut core, &mut scene), SpawnOutcome::Spawned(_)));
        assert_eq!(core.flies.count(), 21);
        assert_eq!(core.phase(), GamePhase::Playing);

        assert_eq!(
            try_spawn(&mut core, &mut scene),
            SpawnOutcome::Rejected(SpawnRejection::Overrun)
        );
        assert_eq!(core.flies.count(), 21);
        assert_eq!(core.phase(), GamePhase::GameOver);
        assert_eq!(scene.overlays[&OverlayId::GameOver], 1.0);
    }

    #[test]
    fn test_game_over_rejects_everything() {
        let mut scene = HeadlessScene::new();
        let mut core = core_with(GamePhase::GameOver, 0, &mut scene);
        assert_eq!(
            try_spawn(&mut core, &mut scene),
            SpawnOutcome::Rejected(SpawnRejection::GameOver)
        );
        assert!(core.flies.is_empty());
    }

    #[test]
    fn test_spawn_lands_in_band_above_screen() {
        let mut scene = HeadlessScene::new();
        let mut core = core_with(GamePhase::Playing, 0, &mut scene);
        for _ in 0..15 {
            try_spawn(&mut core, &mut scene);
        }
        assert_eq!(scene.live_count(), core.flies.count());
        for fly in core.flies.iter() {
            let pos = fly.kinematics.unwrap().pos;
            assert!(pos.x >= core.tuning.spawn_x_min && pos.x <= core.tuning.spawn_x_max);
            assert_eq!(pos.y, core.tuning.spawn_y);
            let node = scene.node(fly.visual).unwrap();
            assert!(node.spawn.trail && node.spawn.buzz);
            assert_eq!(node.spawn.opacity, 1.0);
        }
    }

    proptest! {
        #[test]
        fn prop_title_admits_up_to_cap(count in 0usize..=4) {
            prop_assert!(admission(GamePhase::TitleScreen, count, 4, 20).is_ok());
        }

        #[test]
        fn prop_title_rejects_past_cap(count in 5usize..100) {
            prop_assert_eq!(
                admission(GamePhase::TitleScreen, count, 4, 20),
                Err(SpawnRejection::TitleCap)
            );
        }

        #[test]
        fn prop_playing_admits_up_to_cap(count in 0usize..=20) {
            prop_assert!(admission(GamePhase::Playing, count, 4, 20).is_ok());
        }

        #[test]
        fn prop_playing_overruns_past_cap(count in 21usize..100) {
            prop_assert_eq!(
                admission(GamePhase::Playing, count, 4, 20),
                Err(SpawnRejection::Overrun)
            );
        }

        #[test]
        fn prop_game_over_admits_nothing(count in 0usize..100) {
            prop_assert_eq!(
                admission(GamePhase::GameOver, count, 4, 20),
                Err(SpawnRejection::GameOver)
            );
        }
    }
}
