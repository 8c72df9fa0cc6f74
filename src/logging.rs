//! Logger setup for the headless runner
//!
//! The simulation only emits `log` records; this picks the backend.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install `env_logger` as the global logger
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Calling this twice is
/// harmless; the second call leaves the first logger in place.
pub fn init(verbose: bool) {
    let level = match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };
    let _ = Builder::from_env(Env::default().default_filter_or(level.as_str())).try_init();
}
