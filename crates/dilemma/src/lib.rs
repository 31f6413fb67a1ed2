//! Game of Two
//!
//! Core logic for the iterated Prisoner's Dilemma round-robin: the strategy
//! contract and reference strategies, the match engine, the static strategy
//! registry and the tournament runner.
//! This crate is compiled to:
//! - Native (for the CLI)
//! - WASM (for browser match replay)

mod error;
mod game;
mod history;
mod players;
mod random;
mod registry;
mod strategy;
mod tournament;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{MatchError, RegistryError, TournamentError};
pub use game::{run_match, Game, MatchResult, MatchSummary, RoundResult, MAX_ROUNDS};
pub use history::{History, Totals};
pub use players::{
    AntiEyeByEye, Basis, Cooperative, EyeByEye, Friedman, LastTwo, Pathfinder, Pedantic,
    Periodic110, Poker, Puppet, RandomChoice, Selfish, TieBreak, PEDANTIC_WARM_UP,
};
pub use random::SeededRng;
pub use registry::{Entry, Registry};
pub use strategy::{after_first_move, infer_opponent_choice, warm_up_probe, Choice, Strategy};
pub use tournament::{
    run_tournament, Schedule, Standing, TournamentConfig, TournamentResult, DEFAULT_ROUNDS,
};

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Choice, b: Choice) -> (u8, u8) {
    match (a, b) {
        (Choice::Cooperate, Choice::Cooperate) => (3, 3),
        (Choice::Cooperate, Choice::Defect) => (0, 5),
        (Choice::Defect, Choice::Cooperate) => (5, 0),
        (Choice::Defect, Choice::Defect) => (1, 1),
    }
}
