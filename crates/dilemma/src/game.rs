//! Match execution engine

use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::history::History;
use crate::payoff;
use crate::strategy::{Choice, Strategy};

/// Longest match whose totals still fit in `u32` at 5 points a round
pub const MAX_ROUNDS: u32 = u32::MAX / 5;

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub choice_a: Choice,
    pub choice_b: Choice,
    pub score_a: u8,
    pub score_b: u8,
    pub cumulative_a: u32,
    pub cumulative_b: u32,
}

/// Label and final totals of a match, `[defect, cooperate, total]` per side
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub label: String,
    pub totals_a: [u32; 3],
    pub totals_b: [u32; 3],
}

impl core::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [da, ca, ta] = self.totals_a;
        let [db, cb, tb] = self.totals_b;
        write!(
            f,
            "{}: {} (0={}, 1={}) \\ {} (0={}, 1={})",
            self.label, ta, da, ca, tb, db, cb
        )
    }
}

/// Result of a complete match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub label: String,
    pub round_count: u32,
    pub history_a: History,
    pub history_b: History,
}

impl MatchResult {
    pub fn total_a(&self) -> u32 {
        self.history_a.totals().total
    }

    pub fn total_b(&self) -> u32 {
        self.history_b.totals().total
    }

    /// Round-by-round replay rebuilt from both histories
    pub fn rounds(&self) -> Vec<RoundResult> {
        let mut cumulative_a = 0u32;
        let mut cumulative_b = 0u32;
        self.history_a
            .choices()
            .iter()
            .zip(self.history_a.scores())
            .zip(self.history_b.choices().iter().zip(self.history_b.scores()))
            .enumerate()
            .map(|(round, ((&choice_a, &score_a), (&choice_b, &score_b)))| {
                cumulative_a += score_a as u32;
                cumulative_b += score_b as u32;
                RoundResult {
                    round: round as u32,
                    choice_a,
                    choice_b,
                    score_a,
                    score_b,
                    cumulative_a,
                    cumulative_b,
                }
            })
            .collect()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            label: self.label.clone(),
            totals_a: self.history_a.totals().as_array(),
            totals_b: self.history_b.totals().as_array(),
        }
    }
}

/// One ongoing match between two strategy instances
pub struct Game {
    player_a: Box<dyn Strategy>,
    player_b: Box<dyn Strategy>,
    history_a: History,
    history_b: History,
}

impl Game {
    pub fn new(player_a: Box<dyn Strategy>, player_b: Box<dyn Strategy>) -> Self {
        Self {
            player_a,
            player_b,
            history_a: History::new(),
            history_b: History::new(),
        }
    }

    /// Continue a match from previously recorded histories
    pub fn resume(
        player_a: Box<dyn Strategy>,
        player_b: Box<dyn Strategy>,
        history_a: History,
        history_b: History,
    ) -> Result<Self, MatchError> {
        history_a.validate()?;
        history_b.validate()?;
        if history_a.len() != history_b.len() {
            return Err(MatchError::RoundMismatch {
                a: history_a.len(),
                b: history_b.len(),
            });
        }
        Ok(Self {
            player_a,
            player_b,
            history_a,
            history_b,
        })
    }

    /// "A vs B"
    pub fn label(&self) -> String {
        format!("{} vs {}", self.player_a.name(), self.player_b.name())
    }

    pub fn history_a(&self) -> &History {
        &self.history_a
    }

    pub fn history_b(&self) -> &History {
        &self.history_b
    }

    /// Play one round. Neither side sees the other's choice for this round.
    pub fn play_round(&mut self) -> Result<RoundResult, MatchError> {
        self.check_room(1)?;

        // Both decide against the same pre-round histories
        let choice_a = self.player_a.decide(&self.history_a, &self.history_b)?;
        let choice_b = self.player_b.decide(&self.history_b, &self.history_a)?;

        let (score_a, score_b) = payoff(choice_a, choice_b);
        let round = self.history_a.len() as u32;
        self.history_a.record(choice_a, score_a);
        self.history_b.record(choice_b, score_b);

        Ok(RoundResult {
            round,
            choice_a,
            choice_b,
            score_a,
            score_b,
            cumulative_a: self.history_a.totals().total,
            cumulative_b: self.history_b.totals().total,
        })
    }

    fn check_room(&self, rounds: u32) -> Result<(), MatchError> {
        let requested = self.history_a.len() as u64 + rounds as u64;
        if requested > MAX_ROUNDS as u64 {
            return Err(MatchError::RoundLimit {
                requested,
                limit: MAX_ROUNDS,
            });
        }
        Ok(())
    }

    /// Play `rounds` more rounds
    pub fn play(&mut self, rounds: u32) -> Result<(), MatchError> {
        self.check_room(rounds)?;
        for _ in 0..rounds {
            self.play_round()?;
        }
        Ok(())
    }

    pub fn finish(self) -> MatchResult {
        MatchResult {
            label: self.label(),
            round_count: self.history_a.len() as u32,
            history_a: self.history_a,
            history_b: self.history_b,
        }
    }
}

/// Run a complete match between two fresh strategy instances
///
/// # Arguments
/// * `player_a` - First player's strategy
/// * `player_b` - Second player's strategy
/// * `rounds` - Number of rounds, fixed for the whole match
pub fn run_match(
    player_a: Box<dyn Strategy>,
    player_b: Box<dyn Strategy>,
    rounds: u32,
) -> Result<MatchResult, MatchError> {
    let mut game = Game::new(player_a, player_b);
    game.play(rounds)?;
    let result = game.finish();
    log::debug!(
        "{}: {} \\ {} after {} rounds",
        result.label,
        result.total_a(),
        result.total_b(),
        result.round_count
    );
    Ok(result)
}
