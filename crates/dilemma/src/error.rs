//! Error types for matches, the registry and tournaments

/// Contract violations raised while playing a match.
///
/// These indicate a defect in a strategy or in the caller, never a transient
/// condition, and abort the match they occur in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// A history holds a different number of choices and scores.
    HistoryMismatch { choices: usize, scores: usize },
    /// Per-choice buckets do not add up to the grand total.
    TotalsMismatch { defect: u32, cooperate: u32, total: u32 },
    /// The two sides of a match have played a different number of rounds.
    RoundMismatch { a: usize, b: usize },
    /// A match would run past `MAX_ROUNDS`, where score totals stop fitting.
    RoundLimit { requested: u64, limit: u32 },
    /// A strategy reached a state its rule forbids.
    Invariant { strategy: &'static str, reason: String },
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::HistoryMismatch { choices, scores } =>
                write!(f, "history has {} choices but {} scores", choices, scores),
            MatchError::TotalsMismatch { defect, cooperate, total } =>
                write!(f, "totals {} + {} do not add up to {}", defect, cooperate, total),
            MatchError::RoundMismatch { a, b } =>
                write!(f, "sides have played {} and {} rounds", a, b),
            MatchError::RoundLimit { requested, limit } =>
                write!(f, "{} rounds requested, at most {} fit in a match", requested, limit),
            MatchError::Invariant { strategy, reason } =>
                write!(f, "{} violated its invariant: {}", strategy, reason),
        }
    }
}

impl std::error::Error for MatchError {}

/// Strategy lookup failures. Recoverable: the caller may skip the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No strategy is registered under this name.
    NotFound(String),
    /// The strategy exists but matches an exclusion pattern.
    Excluded(String),
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistryError::NotFound(name) => write!(f, "strategy not found: {}", name),
            RegistryError::Excluded(name) => write!(f, "strategy is excluded: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Failures that stop a whole tournament.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TournamentError {
    /// Round count must be positive.
    ZeroRounds,
    /// Round count is above `MAX_ROUNDS`.
    TooManyRounds(u32),
    /// Nothing left to play after lookups and exclusions.
    NoPlayers,
    /// A match aborted with a contract violation.
    Match { label: String, source: MatchError },
}

impl core::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TournamentError::ZeroRounds => write!(f, "round count must be at least 1"),
            TournamentError::TooManyRounds(rounds) =>
                write!(f, "round count {} exceeds the limit of {}", rounds, crate::game::MAX_ROUNDS),
            TournamentError::NoPlayers => write!(f, "no strategies to play"),
            TournamentError::Match { label, .. } => write!(f, "match {} aborted", label),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Match { source, .. } => Some(source),
            _ => None,
        }
    }
}
