//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG owned by a single strategy instance.
//! Uses a simple but effective xorshift algorithm.

use crate::Choice;

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state
        let mut rng = Self {
            state: (seed ^ 0x6a09e667f3bcc909).max(1),
        };
        // Warm up the generator
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Create an RNG seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Derive an independent stream, e.g. one per match or per side
    pub fn derive(&self, stream: u64) -> Self {
        let mut new_state = self.state;
        new_state ^= stream.wrapping_add(1).wrapping_mul(0x9e3779b97f4a7c15);

        let mut rng = Self {
            state: new_state.max(1),
        };
        rng.next_u64(); // Mix
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform pick between Defect and Cooperate
    pub fn next_choice(&mut self) -> Choice {
        if self.next_u32() & 1 == 1 {
            Choice::Cooperate
        } else {
            Choice::Defect
        }
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut r1 = SeededRng::new(42);
        let mut r2 = SeededRng::new(42);

        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::new(1);
        let mut rng2 = SeededRng::new(2);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SeededRng::new(0x6a09e667f3bcc909);
        let vals: Vec<_> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(vals.iter().any(|v| *v != 0));
    }

    #[test]
    fn test_derived_streams_differ() {
        let base = SeededRng::new(42);

        let mut a = base.derive(0);
        let mut b = base.derive(1);

        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_derive_is_deterministic() {
        let mut a = SeededRng::new(7).derive(3);
        let mut b = SeededRng::new(7).derive(3);

        for _ in 0..50 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_next_choice_hits_both() {
        let mut rng = SeededRng::new(42);
        let picks: Vec<_> = (0..200).map(|_| rng.next_choice()).collect();

        assert!(picks.contains(&Choice::Defect));
        assert!(picks.contains(&Choice::Cooperate));
    }
}
