//! Reference strategies

use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::history::History;
use crate::random::SeededRng;
use crate::strategy::{after_first_move, opponent_last_choice, warm_up_probe, Choice, Strategy};

/// Always defect, never cooperate.
#[derive(Clone, Debug, Default)]
pub struct Selfish;

impl Strategy for Selfish {
    fn name(&self) -> &'static str {
        "Selfish"
    }

    fn choose(&mut self, _own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        Ok(Choice::Defect)
    }
}

/// Always cooperate, never defect.
#[derive(Clone, Debug, Default)]
pub struct Cooperative;

impl Strategy for Cooperative {
    fn name(&self) -> &'static str {
        "Cooperative"
    }

    fn choose(&mut self, _own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        Ok(Choice::Cooperate)
    }
}

/// Uniform random choice each round.
#[derive(Clone, Debug, Default)]
pub struct RandomChoice {
    rng: SeededRng,
}

impl Strategy for RandomChoice {
    fn name(&self) -> &'static str {
        "RandomChoice"
    }

    fn choose(&mut self, _own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        Ok(self.rng.next_choice())
    }

    fn seed_rng(&mut self, rng: SeededRng) {
        self.rng = rng;
    }
}

/// Tries to earn more than last round: after a 3 or 5 defect, after a 0 or 1
/// cooperate.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    first: Choice,
}

impl Pathfinder {
    /// Opens with Cooperate ("Pathfinder1")
    pub fn cooperative() -> Self {
        Self { first: Choice::Cooperate }
    }

    /// Opens with Defect ("Pathfinder0"); almost always beats the cooperative opener
    pub fn deceptive() -> Self {
        Self { first: Choice::Defect }
    }

    fn follow_up(&self, own: &History) -> Result<Choice, MatchError> {
        // Scoring 3 or 5 means the opponent cooperated: exploit it
        let choice = opponent_last_choice(self.name(), own)?
            .map(Choice::opposite)
            .unwrap_or(self.first);
        Ok(choice)
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::cooperative()
    }
}

impl Strategy for Pathfinder {
    fn name(&self) -> &'static str {
        match self.first {
            Choice::Cooperate => "Pathfinder1",
            Choice::Defect => "Pathfinder0",
        }
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        after_first_move(own, self.first, || self.follow_up(own))
    }
}

/// Default number of random warm-up rounds for [`Pedantic`]
pub const PEDANTIC_WARM_UP: usize = 10;

/// Random during warm-up, then sticks with whichever choice has paid more.
#[derive(Clone, Debug)]
pub struct Pedantic {
    warm_up: usize,
    rng: SeededRng,
}

impl Pedantic {
    pub fn with_warm_up(warm_up: usize) -> Self {
        Self {
            warm_up,
            rng: SeededRng::from_entropy(),
        }
    }
}

impl Default for Pedantic {
    fn default() -> Self {
        Self::with_warm_up(PEDANTIC_WARM_UP)
    }
}

impl Strategy for Pedantic {
    fn name(&self) -> &'static str {
        "Pedantic"
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        if own.len() < self.warm_up {
            return Ok(self.rng.next_choice());
        }
        let totals = own.totals();
        if totals.defect > totals.cooperate {
            Ok(Choice::Defect)
        } else {
            Ok(Choice::Cooperate)
        }
    }

    fn seed_rng(&mut self, rng: SeededRng) {
        self.rng = rng;
    }
}

/// Cooperates until the first betrayal, then always defects.
#[derive(Clone, Debug, Default)]
pub struct Friedman {
    betrayed: bool,
}

impl Strategy for Friedman {
    fn name(&self) -> &'static str {
        "Friedman"
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        if opponent_last_choice(self.name(), own)? == Some(Choice::Defect) {
            self.betrayed = true;
        }
        if self.betrayed {
            Ok(Choice::Defect)
        } else {
            Ok(Choice::Cooperate)
        }
    }

    fn reset(&mut self) {
        self.betrayed = false;
    }
}

/// Tit-for-tat: cooperate first, then copy the opponent's last choice.
#[derive(Clone, Debug, Default)]
pub struct EyeByEye;

impl Strategy for EyeByEye {
    fn name(&self) -> &'static str {
        "EyeByEye"
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        Ok(opponent_last_choice(self.name(), own)?.unwrap_or(Choice::Cooperate))
    }
}

/// Cooperate first, then play the opposite of the opponent's last choice.
#[derive(Clone, Debug, Default)]
pub struct AntiEyeByEye;

impl Strategy for AntiEyeByEye {
    fn name(&self) -> &'static str {
        "AntiEyeByEye"
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        let choice = opponent_last_choice(self.name(), own)?
            .map(Choice::opposite)
            .unwrap_or(Choice::Cooperate);
        Ok(choice)
    }
}

/// Probes both choices, then always plays the one with the higher running total.
#[derive(Clone, Debug, Default)]
pub struct Poker;

impl Strategy for Poker {
    fn name(&self) -> &'static str {
        "Poker"
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        if let Some(choice) = warm_up_probe(own) {
            return Ok(choice);
        }
        let totals = own.totals();
        match totals.defect.cmp(&totals.cooperate) {
            std::cmp::Ordering::Greater => Ok(Choice::Defect),
            std::cmp::Ordering::Less => Ok(Choice::Cooperate),
            // After the probe one bucket holds {1, 5} and the other {0, 3};
            // only the leader grows, so they never meet.
            std::cmp::Ordering::Equal => Err(MatchError::Invariant {
                strategy: self.name(),
                reason: format!("defect and cooperate totals tied at {}", totals.defect),
            }),
        }
    }
}

/// Which scores a last-two comparison looks at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    /// Own score only
    Own,
    /// Own plus opponent score of the same round
    Combined,
}

/// How a last-two comparison resolves equal scores
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Defect when both rounds scored 0, otherwise repeat the last own choice
    DefectOnZeroElseRepeat,
    /// Copy the opponent's last choice
    MirrorOpponent,
    /// Always the given choice
    Fixed(Choice),
    /// Uniform random pick
    Random,
}

/// Replays the better of its own last two choices.
///
/// Registered twice: "LastTwoRounds" (own scores, zero-aware tie-break) and
/// "BestOfLastTwo" (combined scores, mirrors the opponent on ties).
#[derive(Clone, Debug)]
pub struct LastTwo {
    name: &'static str,
    basis: Basis,
    tie_break: TieBreak,
    rng: SeededRng,
}

impl LastTwo {
    pub fn new(name: &'static str, basis: Basis, tie_break: TieBreak) -> Self {
        Self {
            name,
            basis,
            tie_break,
            rng: SeededRng::from_entropy(),
        }
    }

    pub fn last_two_rounds() -> Self {
        Self::new("LastTwoRounds", Basis::Own, TieBreak::DefectOnZeroElseRepeat)
    }

    pub fn best_of_last_two() -> Self {
        Self::new("BestOfLastTwo", Basis::Combined, TieBreak::MirrorOpponent)
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    fn score_at(&self, own: &History, opponent: &History, round: usize) -> Result<u32, MatchError> {
        let mine = own
            .scores()
            .get(round)
            .map(|score| *score as u32)
            .ok_or_else(|| MatchError::Invariant {
                strategy: self.name,
                reason: format!("own history has no score for round {}", round + 1),
            })?;
        match self.basis {
            Basis::Own => Ok(mine),
            Basis::Combined => opponent
                .scores()
                .get(round)
                .map(|theirs| mine + *theirs as u32)
                .ok_or_else(|| MatchError::Invariant {
                    strategy: self.name,
                    reason: format!("opponent history has no round {}", round + 1),
                }),
        }
    }

    fn resolve_tie(&mut self, own: &History, opponent: &History, score: u32) -> Result<Choice, MatchError> {
        let last = own.choices()[own.len() - 1];
        match self.tie_break {
            TieBreak::DefectOnZeroElseRepeat if score == 0 => Ok(Choice::Defect),
            TieBreak::DefectOnZeroElseRepeat => Ok(last),
            TieBreak::MirrorOpponent => match opponent.last_choice() {
                Some(choice) => Ok(choice),
                None => Ok(opponent_last_choice(self.name, own)?.unwrap_or(last)),
            },
            TieBreak::Fixed(choice) => Ok(choice),
            TieBreak::Random => Ok(self.rng.next_choice()),
        }
    }
}

impl Default for LastTwo {
    fn default() -> Self {
        Self::last_two_rounds()
    }
}

impl Strategy for LastTwo {
    fn name(&self) -> &'static str {
        self.name
    }

    fn choose(&mut self, own: &History, opponent: &History) -> Result<Choice, MatchError> {
        if let Some(choice) = warm_up_probe(own) {
            return Ok(choice);
        }
        let n = own.len();
        let latest = self.score_at(own, opponent, n - 1)?;
        let previous = self.score_at(own, opponent, n - 2)?;

        if latest > previous {
            Ok(own.choices()[n - 1])
        } else if previous > latest {
            Ok(own.choices()[n - 2])
        } else {
            self.resolve_tie(own, opponent, latest)
        }
    }

    fn seed_rng(&mut self, rng: SeededRng) {
        self.rng = rng;
    }
}

/// Probes Defect then Cooperate, then cycles Defect, Cooperate, Cooperate.
#[derive(Clone, Debug, Default)]
pub struct Periodic110;

const PERIOD: [Choice; 3] = [Choice::Defect, Choice::Cooperate, Choice::Cooperate];

impl Strategy for Periodic110 {
    fn name(&self) -> &'static str {
        "Periodic110"
    }

    fn choose(&mut self, own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        if let Some(choice) = warm_up_probe(own) {
            return Ok(choice);
        }
        Ok(PERIOD[(own.len() - 2) % PERIOD.len()])
    }
}

/// Plays a fixed script, then keeps repeating its final choice.
///
/// Not registered; used to drive other strategies in tests and replays.
#[derive(Clone, Debug)]
pub struct Puppet {
    script: Vec<Choice>,
    played: usize,
}

impl Puppet {
    pub fn new(script: Vec<Choice>) -> Self {
        Self { script, played: 0 }
    }

    /// Build from 0/1 digits, 0 meaning Defect
    pub fn from_bits(bits: &[u8]) -> Self {
        let script = bits
            .iter()
            .map(|b| if *b == 0 { Choice::Defect } else { Choice::Cooperate })
            .collect();
        Self::new(script)
    }
}

impl Strategy for Puppet {
    fn name(&self) -> &'static str {
        "Puppet"
    }

    fn choose(&mut self, _own: &History, _opponent: &History) -> Result<Choice, MatchError> {
        let choice = self
            .script
            .get(self.played)
            .or_else(|| self.script.last())
            .copied()
            .ok_or_else(|| MatchError::Invariant {
                strategy: "Puppet",
                reason: "script is empty".to_string(),
            })?;
        self.played += 1;
        Ok(choice)
    }

    fn reset(&mut self) {
        self.played = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Choice::{Cooperate as C, Defect as D};

    /// Own history from (own choice, opponent choice) pairs
    fn own_history(rounds: &[(Choice, Choice)]) -> History {
        let scored: Vec<_> = rounds
            .iter()
            .map(|&(mine, theirs)| (mine, crate::payoff(mine, theirs).0))
            .collect();
        History::from_rounds(&scored)
    }

    fn opponent_history(rounds: &[(Choice, Choice)]) -> History {
        let flipped: Vec<_> = rounds.iter().map(|&(a, b)| (b, a)).collect();
        own_history(&flipped)
    }

    fn decide(strategy: &mut dyn Strategy, rounds: &[(Choice, Choice)]) -> Result<Choice, MatchError> {
        strategy.decide(&own_history(rounds), &opponent_history(rounds))
    }

    #[test]
    fn test_selfish_and_cooperative() {
        let cases: [&[(Choice, Choice)]; 3] = [&[], &[(D, C)], &[(C, D), (D, D)]];
        for rounds in cases {
            assert_eq!(decide(&mut Selfish, rounds), Ok(D));
            assert_eq!(decide(&mut Cooperative, rounds), Ok(C));
        }
    }

    #[test]
    fn test_random_choice_is_reproducible_when_seeded() {
        let mut a = RandomChoice::default();
        let mut b = RandomChoice::default();
        a.seed_rng(SeededRng::new(9));
        b.seed_rng(SeededRng::new(9));

        for _ in 0..20 {
            assert_eq!(decide(&mut a, &[]), decide(&mut b, &[]));
        }
    }

    #[test]
    fn test_pathfinder_openers() {
        assert_eq!(decide(&mut Pathfinder::cooperative(), &[]), Ok(C));
        assert_eq!(decide(&mut Pathfinder::deceptive(), &[]), Ok(D));
        assert_eq!(Pathfinder::cooperative().name(), "Pathfinder1");
        assert_eq!(Pathfinder::deceptive().name(), "Pathfinder0");
    }

    #[test]
    fn test_pathfinder_follow_up() {
        for mut p in [Pathfinder::cooperative(), Pathfinder::deceptive()] {
            // scored 3 or 5: defect
            assert_eq!(decide(&mut p, &[(C, C)]), Ok(D));
            assert_eq!(decide(&mut p, &[(D, C)]), Ok(D));
            // scored 0 or 1: cooperate
            assert_eq!(decide(&mut p, &[(C, D)]), Ok(C));
            assert_eq!(decide(&mut p, &[(D, D)]), Ok(C));
        }
    }

    #[test]
    fn test_pedantic_after_warm_up() {
        let mut p = Pedantic::with_warm_up(2);

        // defect bucket 5, cooperate bucket 3
        assert_eq!(decide(&mut p, &[(D, C), (C, C)]), Ok(D));
        // defect bucket 1, cooperate bucket 3
        assert_eq!(decide(&mut p, &[(D, D), (C, C)]), Ok(C));
        // tie goes to cooperate
        assert_eq!(decide(&mut p, &[(D, D), (D, D), (D, D), (C, C)]), Ok(C));
        assert_eq!(decide(&mut p, &[(C, D), (D, D), (D, D)]), Ok(D));
    }

    #[test]
    fn test_pedantic_default_warm_up_is_random() {
        let mut a = Pedantic::default();
        let mut b = Pedantic::default();
        a.seed_rng(SeededRng::new(1));
        b.seed_rng(SeededRng::new(1));

        let rounds = [(C, C); PEDANTIC_WARM_UP];
        for n in 0..PEDANTIC_WARM_UP {
            assert_eq!(decide(&mut a, &rounds[..n]), decide(&mut b, &rounds[..n]));
        }
    }

    #[test]
    fn test_friedman_never_forgives() {
        let mut f = Friedman::default();
        assert_eq!(decide(&mut f, &[]), Ok(C));
        assert_eq!(decide(&mut f, &[(C, C)]), Ok(C));
        assert_eq!(decide(&mut f, &[(C, C), (C, D)]), Ok(D));
        assert_eq!(decide(&mut f, &[(C, C), (C, D), (D, C)]), Ok(D));

        f.reset();
        assert_eq!(decide(&mut f, &[(C, C)]), Ok(C));
    }

    #[test]
    fn test_eye_by_eye() {
        assert_eq!(decide(&mut EyeByEye, &[]), Ok(C));
        assert_eq!(decide(&mut EyeByEye, &[(C, D)]), Ok(D));
        assert_eq!(decide(&mut EyeByEye, &[(C, D), (D, C)]), Ok(C));
    }

    #[test]
    fn test_anti_eye_by_eye() {
        assert_eq!(decide(&mut AntiEyeByEye, &[]), Ok(C));
        assert_eq!(decide(&mut AntiEyeByEye, &[(C, D)]), Ok(C));
        assert_eq!(decide(&mut AntiEyeByEye, &[(C, C)]), Ok(D));
    }

    #[test]
    fn test_poker_probe_then_best_bucket() {
        assert_eq!(decide(&mut Poker, &[]), Ok(D));
        assert_eq!(decide(&mut Poker, &[(D, D)]), Ok(C));
        // defect 5 vs cooperate 3
        assert_eq!(decide(&mut Poker, &[(D, C), (C, C)]), Ok(D));
        // defect 1 vs cooperate 3
        assert_eq!(decide(&mut Poker, &[(D, D), (C, C)]), Ok(C));
    }

    #[test]
    fn test_poker_tie_is_invariant_failure() {
        let own = History::from_rounds(&[(D, 1), (C, 0), (D, 1), (C, 3), (D, 1)]);
        let result = Poker.decide(&own, &History::new());
        assert!(matches!(result, Err(MatchError::Invariant { strategy: "Poker", .. })));
    }

    #[test]
    fn test_last_two_rounds_replays_better_choice() {
        let mut p = LastTwo::last_two_rounds();
        assert_eq!(decide(&mut p, &[]), Ok(D));
        assert_eq!(decide(&mut p, &[(D, C)]), Ok(C));
        // latest scored 3 > 1
        assert_eq!(decide(&mut p, &[(D, D), (C, C)]), Ok(C));
        // previous scored 5 > 0
        assert_eq!(decide(&mut p, &[(D, C), (C, D)]), Ok(D));
    }

    #[test]
    fn test_last_two_rounds_ties() {
        let mut p = LastTwo::last_two_rounds();
        // both scored 0
        assert_eq!(decide(&mut p, &[(C, D), (C, D)]), Ok(D));
        // both scored 3: repeat last
        assert_eq!(decide(&mut p, &[(C, C), (C, C)]), Ok(C));
        // both scored 1: repeat last
        assert_eq!(decide(&mut p, &[(D, D), (D, D)]), Ok(D));
    }

    #[test]
    fn test_best_of_last_two_uses_combined_scores() {
        let mut p = LastTwo::best_of_last_two();
        // own-only would favour the 5 (D), combined 6 (C,C) beats 5 (D,C)
        assert_eq!(decide(&mut p, &[(D, C), (C, C)]), Ok(C));
        assert_eq!(decide(&mut p, &[(C, C), (D, D)]), Ok(C));
    }

    #[test]
    fn test_best_of_last_two_tie_mirrors_opponent() {
        let mut p = LastTwo::best_of_last_two();
        assert_eq!(decide(&mut p, &[(D, C), (C, D)]), Ok(D));
        assert_eq!(decide(&mut p, &[(C, D), (D, C)]), Ok(C));
    }

    #[test]
    fn test_combined_basis_requires_opponent_rounds() {
        let mut p = LastTwo::best_of_last_two();
        let own = own_history(&[(D, D), (C, C)]);
        assert!(p.decide(&own, &History::new()).is_err());
    }

    #[test]
    fn test_fixed_tie_break() {
        let mut p = LastTwo::new("Fixed", Basis::Own, TieBreak::Fixed(C));
        assert_eq!(decide(&mut p, &[(D, D), (D, D)]), Ok(C));
        assert_eq!(p.tie_break(), TieBreak::Fixed(C));
    }

    #[test]
    fn test_random_tie_break() {
        let tied = [(D, D), (D, D)];
        let mut a = LastTwo::new("Coin", Basis::Own, TieBreak::Random);
        let mut b = LastTwo::new("Coin", Basis::Own, TieBreak::Random);
        a.seed_rng(SeededRng::new(5));
        b.seed_rng(SeededRng::new(5));

        let picks: Vec<_> = (0..64).map(|_| decide(&mut a, &tied).unwrap()).collect();
        let replay: Vec<_> = (0..64).map(|_| decide(&mut b, &tied).unwrap()).collect();

        assert_eq!(picks, replay);
        assert!(picks.contains(&D));
        assert!(picks.contains(&C));
    }

    #[test]
    fn test_last_two_choose_reports_missing_scores() {
        let mut p = LastTwo::last_two_rounds();
        let own = History::from_parts(vec![D, C, D], vec![1, 3], Default::default());
        let result = p.choose(&own, &History::new());
        assert!(matches!(result, Err(MatchError::Invariant { strategy: "LastTwoRounds", .. })));
    }

    #[test]
    fn test_periodic_110() {
        let mut p = Periodic110;
        let mut rounds = Vec::new();
        let mut played = Vec::new();
        for _ in 0..8 {
            let choice = decide(&mut p, &rounds).unwrap();
            played.push(choice);
            rounds.push((choice, C));
        }
        assert_eq!(played, vec![D, C, D, C, C, D, C, C]);
    }

    #[test]
    fn test_puppet_script() {
        let mut p = Puppet::from_bits(&[1, 0]);
        assert_eq!(decide(&mut p, &[]), Ok(C));
        assert_eq!(decide(&mut p, &[]), Ok(D));
        assert_eq!(decide(&mut p, &[]), Ok(D));
        p.reset();
        assert_eq!(decide(&mut p, &[]), Ok(C));

        assert!(decide(&mut Puppet::new(Vec::new()), &[]).is_err());
    }
}
