//! Tap/click resolution
//!
//! A tap first drives the phase machine, then swats every fly near the tap
//! point. Hit-testing ignores the phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::{FlyId, FlyRegistry};
use super::state::{GameCore, Transition, catch_score};
use crate::scene::Scene;
use crate::within_radius;

/// What a single tap did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputReport {
    pub transition: Option<Transition>,
    /// Flies removed, in the order they were scored
    pub caught: Vec<FlyId>,
    pub points: u64,
}

/// Flies within `radius` of `point`, in registry order
///
/// Uses the kinematics from the registry's last `sync`; bodiless flies are
/// never hit.
pub fn hit_test(flies: &FlyRegistry, point: Vec2, radius: f32, inclusive: bool) -> Vec<FlyId> {
    flies
        .iter()
        .filter(|fly| {
            fly.kinematics
                .is_some_and(|k| within_radius(k.pos, point, radius, inclusive))
        })
        .map(|fly| fly.id)
        .collect()
}

/// Resolve one tap at `point`
pub fn on_input<S: Scene + ?Sized>(core: &mut GameCore, scene: &mut S, point: Vec2) -> InputReport {
    let mut report = InputReport {
        transition: core.state.advance_on_input(),
        ..Default::default()
    };
    if let Some(transition) = report.transition {
        core.on_transition(scene, transition);
    }

    core.flies.sync(scene);
    let hits = hit_test(
        &core.flies,
        point,
        core.tuning.hit_radius,
        core.tuning.hit_boundary.is_inclusive(),
    );

    for id in hits {
        let Some(fly) = core.flies.remove(id) else {
            continue;
        };
        scene.destroy_visual(fly.visual);

        let points = catch_score(core.tuning.score_numerator, core.flies.count());
        core.state.award(points);
        report.points += points;
        report.caught.push(id);
        log::debug!("Caught fly {:?} for {} points, {} left", id, points, core.flies.count());
    }

    scene.repulse(point);
    scene.set_score_display(&core.state.score.to_string());
    report
}
