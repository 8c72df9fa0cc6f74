//! Erratic fly steering
//!
//! A weak pull toward the target point buried under heavy jitter. Only the
//! attraction term is clamped (from above); the jitter is added afterwards, so
//! the net force can exceed the clamp.

use glam::Vec2;
use rand::Rng;

use super::state::GameCore;
use crate::scene::Scene;
use crate::tuning::Tuning;

/// Steering force for a fly at `pos`
pub fn steering_force<R: Rng>(pos: Vec2, target: Vec2, tuning: &Tuning, rng: &mut R) -> Vec2 {
    let delta = target - pos;

    let pull_x = (delta.x * tuning.attraction_x * rng.random::<f32>()).min(tuning.attraction_max);
    let jitter_x = rng.random_range(-tuning.jitter_x..=tuning.jitter_x);

    let pull_y = (delta.y * tuning.attraction_y * rng.random::<f32>()).min(tuning.attraction_max);
    let jitter_y = rng.random_range(-tuning.jitter_y..=tuning.jitter_y);

    Vec2::new(pull_x + jitter_x, pull_y + jitter_y)
}

/// Visual tilt for a fly moving with `vel`
#[inline]
pub fn rotation_for(vel: Vec2, tuning: &Tuning) -> f32 {
    vel.x * tuning.rotation_factor
}

/// One steering tick over every registered fly
///
/// Skipped entirely while no target is bound; flies without a physics body
/// are skipped individually. Returns the number of flies steered.
pub fn update<S: Scene + ?Sized>(core: &mut GameCore, scene: &mut S) -> usize {
    let Some(target) = core.target else {
        log::trace!("Steering skipped: no target bound");
        return 0;
    };

    core.flies.sync(scene);

    let mut steered = 0;
    for fly in core.flies.iter() {
        let Some(kinematics) = fly.kinematics else {
            continue;
        };
        let force = steering_force(kinematics.pos, target, &core.tuning, &mut core.rng);
        scene.apply_force(fly.visual, force);
        scene.set_rotation(
            fly.visual,
            rotation_for(kinematics.vel, &core.tuning),
            core.tuning.rotation_duration,
        );
        steered += 1;
    }
    log::trace!("Steered {} flies", steered);
    steered
}
