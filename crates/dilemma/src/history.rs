//! Per-player record of a match

use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::strategy::Choice;

/// Running sums of one player's scores, bucketed by the player's own choice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub defect: u32,
    pub cooperate: u32,
    pub total: u32,
}

impl Totals {
    /// Score accumulated in rounds where the player chose `choice`
    pub fn get(&self, choice: Choice) -> u32 {
        match choice {
            Choice::Defect => self.defect,
            Choice::Cooperate => self.cooperate,
        }
    }

    /// `[defect, cooperate, total]`
    pub fn as_array(&self) -> [u32; 3] {
        [self.defect, self.cooperate, self.total]
    }

    // The engine caps a match at `MAX_ROUNDS`, so these sums cannot overflow
    fn add(&mut self, choice: Choice, score: u8) {
        match choice {
            Choice::Defect => self.defect += score as u32,
            Choice::Cooperate => self.cooperate += score as u32,
        }
        self.total += score as u32;
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.defect.checked_add(self.cooperate) != Some(self.total) {
            return Err(MatchError::TotalsMismatch {
                defect: self.defect,
                cooperate: self.cooperate,
                total: self.total,
            });
        }
        Ok(())
    }
}

/// One player's view of a match: own choices, own scores and own totals.
///
/// Append-only. The engine is the only writer; strategies get `&History`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    choices: Vec<Choice>,
    scores: Vec<u8>,
    totals: Totals,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            choices: Vec::with_capacity(rounds),
            scores: Vec::with_capacity(rounds),
            totals: Totals::default(),
        }
    }

    /// Assemble a history from raw parts without checking it.
    ///
    /// Use [`History::validate`] before handing the result to a strategy.
    pub fn from_parts(choices: Vec<Choice>, scores: Vec<u8>, totals: Totals) -> Self {
        Self { choices, scores, totals }
    }

    /// Rebuild a consistent history from index-aligned choices and scores
    pub fn from_rounds(rounds: &[(Choice, u8)]) -> Self {
        let mut history = Self::with_capacity(rounds.len());
        for &(choice, score) in rounds {
            history.record(choice, score);
        }
        history
    }

    pub(crate) fn record(&mut self, choice: Choice, score: u8) {
        self.choices.push(choice);
        self.scores.push(score);
        self.totals.add(choice, score);
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn scores(&self) -> &[u8] {
        &self.scores
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Rounds played so far
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn last_choice(&self) -> Option<Choice> {
        self.choices.last().copied()
    }

    pub fn last_score(&self) -> Option<u8> {
        self.scores.last().copied()
    }

    /// Check the length and totals invariants
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.choices.len() != self.scores.len() {
            return Err(MatchError::HistoryMismatch {
                choices: self.choices.len(),
                scores: self.scores.len(),
            });
        }
        self.totals.validate()
    }
}
