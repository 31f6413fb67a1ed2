//! Strategy contract and shared decision helpers

use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::history::History;
use crate::random::SeededRng;

/// A choice in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Choice {
    Defect = 0,
    Cooperate = 1,
}

impl Choice {
    pub fn opposite(self) -> Self {
        match self {
            Choice::Defect => Choice::Cooperate,
            Choice::Cooperate => Choice::Defect,
        }
    }

    /// 0 for Defect, 1 for Cooperate
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A pluggable decision rule with private per-match state.
///
/// Instances are built fresh for every match (`Default`) and are never shared
/// between matches. The engine calls `decide` once per round with both
/// histories as they stood before the round. Implementations supply `choose`,
/// which only ever sees well-formed histories.
pub trait Strategy: Send {
    /// Registry name, also used in match labels
    fn name(&self) -> &'static str;

    /// The decision rule proper
    fn choose(&mut self, own: &History, opponent: &History) -> Result<Choice, MatchError>;

    /// Pick this round's choice from the history so far.
    ///
    /// Fails with a contract violation if either history is malformed.
    fn decide(&mut self, own: &History, opponent: &History) -> Result<Choice, MatchError> {
        own.validate()?;
        opponent.validate()?;
        self.choose(own, opponent)
    }

    /// Return to the initial state
    fn reset(&mut self) {}

    /// Replace the random source. Deterministic strategies ignore it.
    fn seed_rng(&mut self, _rng: SeededRng) {}
}

/// What the opponent must have played for us to score `own_score`.
///
/// 0 and 1 only follow an opponent Defect, 3 and 5 only follow Cooperate.
pub fn infer_opponent_choice(own_score: u8) -> Option<Choice> {
    match own_score {
        0 | 1 => Some(Choice::Defect),
        3 | 5 => Some(Choice::Cooperate),
        _ => None,
    }
}

/// Opponent's previous choice as seen through our own last score
pub(crate) fn opponent_last_choice(
    strategy: &'static str,
    own: &History,
) -> Result<Option<Choice>, MatchError> {
    match own.last_score() {
        None => Ok(None),
        Some(score) => infer_opponent_choice(score)
            .map(Some)
            .ok_or_else(|| MatchError::Invariant {
                strategy,
                reason: format!("score {} is not a Prisoner's Dilemma payoff", score),
            }),
    }
}

/// Two-round probe: Defect first, then Cooperate. `None` once both are played.
pub fn warm_up_probe(own: &History) -> Option<Choice> {
    match own.len() {
        0 => Some(Choice::Defect),
        1 => Some(Choice::Cooperate),
        _ => None,
    }
}

/// Play `first` on the opening round, then defer to `rule`
pub fn after_first_move<F>(own: &History, first: Choice, rule: F) -> Result<Choice, MatchError>
where
    F: FnOnce() -> Result<Choice, MatchError>,
{
    if own.is_empty() {
        Ok(first)
    } else {
        rule()
    }
}
