use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use engine::{Runtime, Scenario};
use rand::Rng;

mod run;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, JSON. Runs the built-in river crossing when absent.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulation seed, used for scatter placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of simulated time per tick.
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// How many ticks to run.
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// Print a map frame every this many ticks, 0 prints only the last.
    #[arg(long, default_value_t = 20)]
    frame_every: u32,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let scenario: Scenario = match &args.scenario {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => serde_json::from_str(include_str!("../scenarios/crossing.json"))?,
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed: {seed}");

    let game = Runtime::from_scenario(&scenario, seed)?;
    run::run(game, &scenario, &args);
    Ok(())
}
