//! Command-line arguments

use clap::Parser;
use dilemma::{Schedule, TournamentConfig, DEFAULT_ROUNDS, MAX_ROUNDS};

#[derive(Parser, Debug)]
#[command(name = "game-of-two", about = "Game of Two: round-robin Iterated Prisoner's Dilemma")]
pub struct Args {
    /// Number of rounds per match
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS, value_parser = clap::value_parser!(u32).range(1..=MAX_ROUNDS as i64))]
    pub rounds: u32,

    /// Log every match result
    #[arg(short)]
    pub v: bool,

    /// Every instance of a strategy uses the same PRNG seed
    #[arg(short)]
    pub s: bool,

    /// Master seed, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulate both (A, B) and (B, A) instead of mirroring
    #[arg(long)]
    pub full: bool,

    /// Exclude strategies by name, or by prefix with a trailing '*'
    #[arg(long, value_name = "PATTERN", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Only play these strategies
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub players: Vec<String>,

    /// List registered strategies and exit
    #[arg(long)]
    pub list: bool,

    /// Print the result as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn tournament_config(&self) -> TournamentConfig {
        TournamentConfig {
            rounds: self.rounds,
            verbose: self.v,
            shared_seed: self.s,
            seed: self.seed,
            schedule: if self.full { Schedule::Full } else { Schedule::Mirrored },
            players: if self.players.is_empty() { None } else { Some(self.players.clone()) },
        }
    }
}
