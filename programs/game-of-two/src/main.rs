//! Game of Two - round-robin Iterated Prisoner's Dilemma tournament

mod args;
mod log_init;
mod tables;

use anyhow::Context;
use clap::Parser;
use simplelog::LevelFilter;
use dilemma::{run_tournament, Registry};

use args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log_init::init(if args.debug { LevelFilter::Debug } else { LevelFilter::Info })
        .context("initialize logger")?;

    let registry = args
        .exclude
        .iter()
        .fold(Registry::builtin(), |registry, pattern| registry.exclude(pattern.as_str()));

    if args.list {
        for entry in registry.entries() {
            println!("{:<14} {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let config = args.tournament_config();
    log::debug!("{:?}", config);
    let result = run_tournament(&registry, &config).context("tournament failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("ROUNDS={}", result.rounds);
    println!("{}", tables::matrix(&result));
    println!("{}", tables::ranking("PLAYER SCORE", &result.player_ranking));
    println!("{}", tables::ranking("GAME SCORE", &result.game_ranking));
    Ok(())
}
