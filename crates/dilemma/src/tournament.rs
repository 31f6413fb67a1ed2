//! Round-robin tournament across registered strategies
//!
//! Every ordered pair of strategies, self-play included, meets once for a
//! fixed number of rounds. Matches are independent and run on the rayon pool;
//! each one builds its own strategy instances and random sources, so the
//! outcome does not depend on scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::error::TournamentError;
use crate::game::{run_match, MatchSummary, MAX_ROUNDS};
use crate::random::SeededRng;
use crate::registry::{Entry, Registry};

/// Default rounds per match
pub const DEFAULT_ROUNDS: u32 = 1000;

/// Which ordered pairs are actually simulated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Schedule {
    /// Play each unordered pair once and mirror the result for `(j, i)`
    #[default]
    Mirrored,
    /// Play every ordered pair independently
    Full,
}

/// Tournament parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Rounds per match, at least 1
    pub rounds: u32,
    /// Log every match summary at info level
    pub verbose: bool,
    /// Every instance of a strategy replays the same random sequence
    pub shared_seed: bool,
    /// Master seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    pub schedule: Schedule,
    /// Restrict the tournament to these names instead of the whole registry
    pub players: Option<Vec<String>>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            verbose: false,
            shared_seed: false,
            seed: None,
            schedule: Schedule::default(),
            players: None,
        }
    }
}

/// One ranking row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub total: u64,
    pub per_game: f64,
    pub per_round: f64,
}

/// Outcome of a full tournament
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentResult {
    /// Participants in matrix order (sorted)
    pub names: Vec<String>,
    pub rounds: u32,
    /// Master seed actually used, for reproducing the run
    pub seed: u64,
    /// `matrix[row][column]` = (row player's total, column player's total)
    pub matrix: Vec<Vec<(u32, u32)>>,
    /// Every simulated match, in schedule order
    pub matches: Vec<MatchSummary>,
    /// Ranked by own score as row player
    pub player_ranking: Vec<Standing>,
    /// Ranked by combined score of both sides across the row
    pub game_ranking: Vec<Standing>,
}

impl TournamentResult {
    /// Cell for `row` playing against `column`, looked up by name
    pub fn score(&self, row: &str, column: &str) -> Option<(u32, u32)> {
        let i = self.names.iter().position(|n| n == row)?;
        let j = self.names.iter().position(|n| n == column)?;
        Some(self.matrix[i][j])
    }
}

/// Resolve the participants: the whole registry, or the requested subset with
/// unknown and excluded names skipped.
fn select_entries(registry: &Registry, players: Option<&[String]>) -> Vec<Entry> {
    let Some(players) = players else {
        return registry.entries().copied().collect();
    };
    let mut entries: Vec<Entry> = players
        .iter()
        .filter_map(|name| match registry.entry(name) {
            Ok(entry) => Some(*entry),
            Err(e) => {
                log::warn!("skipping {}: {}", name, e);
                None
            }
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(b.name));
    entries.dedup_by(|a, b| a.name == b.name);
    entries
}

/// Ordered pairs to simulate
fn schedule_pairs(n: usize, schedule: Schedule) -> Vec<(usize, usize)> {
    match schedule {
        Schedule::Mirrored => (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect(),
        Schedule::Full => (0..n).flat_map(|i| (0..n).map(move |j| (i, j))).collect(),
    }
}

/// Random source for one side of one match
fn side_rng(master: &SeededRng, shared_seed: bool, n: usize, pair: (usize, usize), side: usize) -> SeededRng {
    let (row, column) = pair;
    if shared_seed {
        let player = if side == 0 { row } else { column };
        master.derive(player as u64)
    } else {
        master.derive(((row * n + column) * 2 + side) as u64)
    }
}

fn rank(names: &[String], totals: &[u64], rounds: u32) -> Vec<Standing> {
    let n = names.len() as f64;
    let mut standings: Vec<Standing> = names
        .iter()
        .zip(totals)
        .map(|(name, &total)| Standing {
            name: name.clone(),
            total,
            per_game: total as f64 / n,
            per_round: total as f64 / n / rounds as f64,
        })
        .collect();
    // stable: equal totals keep name order
    standings.sort_by(|a, b| b.total.cmp(&a.total));
    standings
}

/// Run a round-robin tournament
///
/// # Arguments
/// * `registry` - Source of strategy constructors
/// * `config` - Round count, seeding, schedule and optional player subset
///
/// # Returns
/// Head-to-head matrix, per-match summaries and both rankings
pub fn run_tournament(
    registry: &Registry,
    config: &TournamentConfig,
) -> Result<TournamentResult, TournamentError> {
    if config.rounds == 0 {
        return Err(TournamentError::ZeroRounds);
    }
    if config.rounds > MAX_ROUNDS {
        return Err(TournamentError::TooManyRounds(config.rounds));
    }
    let entries = select_entries(registry, config.players.as_deref());
    if entries.is_empty() {
        return Err(TournamentError::NoPlayers);
    }

    let n = entries.len();
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let master = SeededRng::new(seed);
    let pairs = schedule_pairs(n, config.schedule);
    log::info!(
        "{} strategies, {} matches of {} rounds (seed {})",
        n,
        pairs.len(),
        config.rounds,
        seed
    );

    let played = pairs
        .par_iter()
        .map(|&(i, j)| {
            let mut player_a = (entries[i].construct)();
            let mut player_b = (entries[j].construct)();
            player_a.seed_rng(side_rng(&master, config.shared_seed, n, (i, j), 0));
            player_b.seed_rng(side_rng(&master, config.shared_seed, n, (i, j), 1));

            let label = format!("{} vs {}", player_a.name(), player_b.name());
            run_match(player_a, player_b, config.rounds)
                .map(|result| (i, j, result))
                .map_err(|source| TournamentError::Match { label, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut matrix = vec![vec![(0u32, 0u32); n]; n];
    let mut matches = Vec::with_capacity(played.len());
    for (i, j, result) in played {
        let (a, b) = (result.total_a(), result.total_b());
        matrix[i][j] = (a, b);
        if config.schedule == Schedule::Mirrored && i != j {
            matrix[j][i] = (b, a);
        }
        let summary = result.summary();
        if config.verbose {
            log::info!("{}", summary);
        }
        matches.push(summary);
    }

    let names: Vec<String> = entries.iter().map(|e| e.name.to_string()).collect();
    let own: Vec<u64> = matrix
        .iter()
        .map(|row| row.iter().map(|&(a, _)| a as u64).sum())
        .collect();
    let combined: Vec<u64> = matrix
        .iter()
        .map(|row| row.iter().map(|&(a, b)| a as u64 + b as u64).sum())
        .collect();

    Ok(TournamentResult {
        player_ranking: rank(&names, &own, config.rounds),
        game_ranking: rank(&names, &combined, config.rounds),
        names,
        rounds: config.rounds,
        seed,
        matrix,
        matches,
    })
}
