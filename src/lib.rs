//! Fliege - a fly-swatting arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (steering, spawning, game state, input resolution)
//! - `scene`: Rendering/platform collaborator seam
//! - `headless`: In-memory scene with a tiny physics integrator
//! - `tuning`: Data-driven game balance
//! - `demo`: Autoplay for idle/demo runs

pub mod demo;
pub mod headless;
pub mod logging;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use headless::HeadlessScene;
pub use scene::{NullScene, Scene};
pub use tuning::{HitBoundary, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep for the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum timer firings per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Returns `true` when `point` lies within `radius` of `center`.
///
/// `inclusive` decides whether a point exactly on the rim counts.
#[inline]
pub fn within_radius(point: Vec2, center: Vec2, radius: f32, inclusive: bool) -> bool {
    let dist_sq = point.distance_squared(center);
    let radius_sq = radius * radius;
    if inclusive {
        dist_sq <= radius_sq
    } else {
        dist_sq < radius_sq
    }
}
