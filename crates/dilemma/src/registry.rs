//! Static strategy registry

use crate::error::RegistryError;
use crate::players::{
    AntiEyeByEye, Cooperative, EyeByEye, Friedman, LastTwo, Pathfinder, Pedantic, Periodic110,
    Poker, RandomChoice, Selfish,
};
use crate::strategy::Strategy;

/// A registered strategy: its name, a one-line description and a constructor
#[derive(Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    pub description: &'static str,
    pub construct: fn() -> Box<dyn Strategy>,
}

const BUILTIN: &[Entry] = &[
    Entry {
        name: "AntiEyeByEye",
        description: "Cooperates first, then plays the opposite of the opponent's last move.",
        construct: || Box::new(AntiEyeByEye),
    },
    Entry {
        name: "BestOfLastTwo",
        description: "Replays whichever of its last two moves earned more for both sides.",
        construct: || Box::new(LastTwo::best_of_last_two()),
    },
    Entry {
        name: "Cooperative",
        description: "Never defects. Always cooperates.",
        construct: || Box::new(Cooperative),
    },
    Entry {
        name: "EyeByEye",
        description: "Copies opponent's last move. Starts by cooperating.",
        construct: || Box::new(EyeByEye),
    },
    Entry {
        name: "Friedman",
        description: "Cooperates until betrayed, then always defects.",
        construct: || Box::new(Friedman::default()),
    },
    Entry {
        name: "LastTwoRounds",
        description: "Replays whichever of its last two moves earned it more.",
        construct: || Box::new(LastTwo::last_two_rounds()),
    },
    Entry {
        name: "Pathfinder0",
        description: "Defects first, then defects after a good round and cooperates after a bad one.",
        construct: || Box::new(Pathfinder::deceptive()),
    },
    Entry {
        name: "Pathfinder1",
        description: "Cooperates first, then defects after a good round and cooperates after a bad one.",
        construct: || Box::new(Pathfinder::cooperative()),
    },
    Entry {
        name: "Pedantic",
        description: "Random warm-up, then sticks with the move that has paid more.",
        construct: || Box::new(Pedantic::default()),
    },
    Entry {
        name: "Periodic110",
        description: "Probes both moves, then cycles defect, cooperate, cooperate.",
        construct: || Box::new(Periodic110),
    },
    Entry {
        name: "Poker",
        description: "Probes both moves, then always plays the more profitable one.",
        construct: || Box::new(Poker),
    },
    Entry {
        name: "RandomChoice",
        description: "Randomly cooperates or defects each round.",
        construct: || Box::new(RandomChoice::default()),
    },
    Entry {
        name: "Selfish",
        description: "Never cooperates. Always defects.",
        construct: || Box::new(Selfish),
    },
];

/// Name-to-constructor table with optional exclusions.
///
/// Exclusion patterns match a name exactly, or by prefix when they end in `*`.
#[derive(Clone)]
pub struct Registry {
    entries: Vec<Entry>,
    excluded: Vec<String>,
}

impl Registry {
    /// Every built-in strategy, nothing excluded
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.to_vec())
    }

    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(b.name));
        entries.dedup_by(|a, b| a.name == b.name);
        Self {
            entries,
            excluded: Vec::new(),
        }
    }

    /// Add an entry, replacing any previous one with the same name
    pub fn register(&mut self, entry: Entry) {
        match self.entries.binary_search_by(|e| e.name.cmp(entry.name)) {
            Ok(i) => self.entries[i] = entry,
            Err(i) => self.entries.insert(i, entry),
        }
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excluded.push(pattern.into());
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => name.starts_with(prefix),
            None => name == pattern,
        })
    }

    /// Sorted names of every strategy that is not excluded
    pub fn names(&self) -> Vec<&'static str> {
        self.entries()
            .map(|e| e.name)
            .collect()
    }

    /// Entries that are not excluded, sorted by name
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(move |e| !self.is_excluded(e.name))
    }

    pub fn entry(&self, name: &str) -> Result<&Entry, RegistryError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        if self.is_excluded(name) {
            return Err(RegistryError::Excluded(name.to_string()));
        }
        Ok(entry)
    }

    /// Fresh instance of the named strategy
    pub fn construct(&self, name: &str) -> Result<Box<dyn Strategy>, RegistryError> {
        self.entry(name).map(|e| (e.construct)())
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;

    #[test]
    fn test_names_are_sorted() {
        let names = Registry::builtin().names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_constructed_name_matches_entry() {
        let registry = Registry::builtin();
        for name in registry.names() {
            let strategy = registry.construct(name).unwrap();
            assert_eq!(strategy.name(), name);
        }
    }

    #[test]
    fn test_every_strategy_decides_on_empty_history() {
        let registry = Registry::builtin();
        for name in registry.names() {
            let mut strategy = registry.construct(name).unwrap();
            let empty = History::new();
            assert!(strategy.decide(&empty, &empty).is_ok(), "{} failed on empty history", name);
        }
    }

    #[test]
    fn test_every_strategy_rejects_malformed_history() {
        use crate::error::MatchError;
        use crate::history::Totals;
        use crate::strategy::Choice::{Cooperate as C, Defect as D};

        let registry = Registry::builtin();
        let totals = Totals { defect: 2, cooperate: 3, total: 5 };
        let short_scores = History::from_parts(vec![D, C, D], vec![1, 3], totals);
        let bad_totals = History::from_parts(vec![D], vec![1], Totals { defect: 1, cooperate: 0, total: 4 });
        let fine = History::from_rounds(&[(D, 1), (C, 3), (D, 1)]);

        for name in registry.names() {
            let mut strategy = registry.construct(name).unwrap();
            assert_eq!(
                strategy.decide(&short_scores, &fine),
                Err(MatchError::HistoryMismatch { choices: 3, scores: 2 }),
                "{} accepted mismatched own history",
                name
            );
            assert_eq!(
                strategy.decide(&fine, &short_scores),
                Err(MatchError::HistoryMismatch { choices: 3, scores: 2 }),
                "{} accepted mismatched opponent history",
                name
            );
            assert_eq!(
                strategy.decide(&bad_totals, &History::new()),
                Err(MatchError::TotalsMismatch { defect: 1, cooperate: 0, total: 4 }),
                "{} accepted inconsistent totals",
                name
            );
        }
    }

    #[test]
    fn test_unknown_name() {
        let result = Registry::builtin().construct("Nobody");
        assert_eq!(result.err(), Some(RegistryError::NotFound("Nobody".to_string())));
    }

    #[test]
    fn test_exclusion_patterns() {
        let registry = Registry::builtin().exclude("Pathfinder*").exclude("Poker");

        assert!(!registry.names().contains(&"Pathfinder0"));
        assert!(!registry.names().contains(&"Pathfinder1"));
        assert!(!registry.names().contains(&"Poker"));
        assert_eq!(registry.len(), 10);
        assert_eq!(
            registry.construct("Pathfinder1").err(),
            Some(RegistryError::Excluded("Pathfinder1".to_string()))
        );
        assert!(registry.construct("Pedantic").is_ok());
    }

    #[test]
    fn test_register_replaces_and_keeps_order() {
        let mut registry = Registry::from_entries(Vec::new());
        registry.register(Entry {
            name: "Zed",
            description: "",
            construct: || Box::new(Selfish),
        });
        registry.register(Entry {
            name: "Alpha",
            description: "",
            construct: || Box::new(Selfish),
        });
        registry.register(Entry {
            name: "Zed",
            description: "",
            construct: || Box::new(Cooperative),
        });

        assert_eq!(registry.names(), vec!["Alpha", "Zed"]);
        assert_eq!(registry.construct("Zed").unwrap().name(), "Cooperative");
    }
}
