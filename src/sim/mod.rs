//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies beyond the `Scene` seam

pub mod clock;
pub mod input;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use clock::{ClockTicks, SimClock, Timer};
pub use input::{InputReport, hit_test, on_input};
pub use registry::{Fly, FlyId, FlyRegistry};
pub use spawn::{SpawnOutcome, SpawnRejection, admission, try_spawn};
pub use state::{FlySnapshot, GameCore, GamePhase, GameState, Snapshot, Transition, catch_score};
pub use steering::{rotation_for, steering_force};
pub use tick::{TickInput, TickReport, tick};
