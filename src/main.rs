//! Fliege headless runner
//!
//! Plays the game against the in-memory scene with the autoplayer and reports
//! how the run went.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use fliege::consts::SIM_DT;
use fliege::demo::AutoPlayer;
use fliege::sim::{GamePhase, tick};
use fliege::{HeadlessScene, Tuning, logging};

/// Run the fly simulation without a renderer
#[derive(Debug, Parser)]
#[command(name = "fliege", version, about)]
struct Args {
    /// RNG seed for the run
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Seconds between autoplayer taps
    #[arg(long, default_value_t = 1.2)]
    tap_interval: f32,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!("Fliege (headless) starting, seed {}", args.seed);

    let mut scene = HeadlessScene::new();
    let mut core = fliege::sim::GameCore::new(tuning, args.seed);
    core.attach(&mut scene);
    let mut player = AutoPlayer::new(args.tap_interval);

    let frames = (args.seconds.max(0.0) / SIM_DT).round() as u64;
    let mut runs = 0u32;
    let mut best = 0u64;
    let mut caught = 0usize;

    for _ in 0..frames {
        let input = player.poll(&core, &scene, SIM_DT);
        let before = core.phase();
        let report = tick(&mut core, &mut scene, &input, SIM_DT);
        scene.step(SIM_DT);

        caught += report.inputs.iter().map(|r| r.caught.len()).sum::<usize>();
        if before == GamePhase::Playing && core.phase() == GamePhase::GameOver {
            runs += 1;
            best = best.max(core.score());
            log::info!("Run {} over with score {}", runs, core.score());
        }
    }
    if core.phase() == GamePhase::Playing {
        best = best.max(core.score());
    }

    core.flies.sync(&scene);
    let snapshot = core.snapshot();
    core.teardown(&mut scene);

    log::info!(
        "Finished {} frames: {} runs ended, {} flies caught, best score {}",
        frames,
        runs,
        caught,
        best
    );

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        println!("{json}");
    } else {
        println!(
            "phase {:?}, score {}, best {}, flies {}, caught {}",
            snapshot.phase,
            snapshot.score,
            best,
            snapshot.flies.len(),
            caught
        );
    }

    Ok(())
}
