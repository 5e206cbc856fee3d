//! Ball Drop headless runner
//!
//! Drives the simulation without a renderer, steering with the autoplay
//! policy, and reports the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ball_drop::sim::{Direction, GameEvent, Snapshot};
use ball_drop::{Game, SimConfig, autoplay};

/// Run a ball-drop merge game headless.
#[derive(Debug, Parser)]
#[command(name = "ball-drop", version, about)]
struct Args {
    /// Maximum ticks to simulate (20 ms each)
    #[arg(short, long, default_value = "20000", value_name = "N")]
    ticks: u64,

    /// Seed for spawn weighting; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding simulation tuning
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Never steer; every ball drops straight down the middle
    #[arg(long)]
    idle: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };

    let mut game = match args.seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    };
    game.new_game();
    log::info!("Ball Drop (headless) starting, up to {} ticks", args.ticks);

    let mut merges = 0u32;
    let mut dropped = 1u32;
    let mut snapshot = game.snapshot().context("game not started")?;

    for _ in 0..args.ticks {
        let direction = if args.idle {
            Direction::None
        } else {
            autoplay::suggest(&snapshot, game.config())
        };
        game.apply_horizontal_input(direction)?;
        snapshot = game.tick()?;

        for event in &snapshot.events {
            match event {
                GameEvent::Spawned { .. } => dropped += 1,
                GameEvent::Merged { tier, points, .. } => {
                    merges += 1;
                    log::info!("Merge into tier {} (+{})", tier.index(), points);
                }
                GameEvent::Landed { .. } | GameEvent::GameOver { .. } => {}
            }
        }
        if snapshot.game_over {
            break;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot, dropped, merges);
    }
    Ok(())
}

fn print_summary(snapshot: &Snapshot, dropped: u32, merges: u32) {
    let status = if snapshot.game_over {
        "Game Over!"
    } else {
        "Stopped"
    };
    println!("{status} Final Score: {}", snapshot.score);
    println!(
        "ticks: {}  balls spawned: {}  merges: {}  on board: {}",
        snapshot.time_ticks,
        dropped,
        merges,
        snapshot.resting.len()
    );
    if let Some(top) = snapshot.resting.iter().map(|b| b.tier).max() {
        println!("highest tier on board: {} ({})", top.index(), top.color());
    }
}
