//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for the probabilistic strategies.
//! Uses a simple but effective xorshift algorithm; only the unseeded
//! constructor reaches for OS entropy, through `rand`.

use rand::Rng;

/// Replaces an all-zero state, which xorshift can never leave.
const NONZERO_STATE: u64 = 0x9e3779b97f4a7c15;

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create an RNG from a 64-bit seed
    pub fn from_u64(seed: u64) -> Self {
        let mut rng = Self::from_state(seed ^ 0x517cc1b727220a95);
        // Warm up the generator
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Create an RNG seeded from the thread-local OS-seeded generator
    pub fn from_entropy() -> Self {
        Self::from_u64(rand::rng().random::<u64>())
    }

    /// Derive an independent stream (one per match in a tournament)
    pub fn for_stream(&self, stream: u32) -> Self {
        let mut new_state = self.state;
        new_state ^= (stream as u64).wrapping_mul(NONZERO_STATE);

        let mut rng = Self::from_state(new_state);
        rng.next_u64(); // Mix
        rng
    }

    fn from_state(state: u64) -> Self {
        Self { state: if state == 0 { NONZERO_STATE } else { state } }
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Uniform draw in [0, 1) with 53 bits of precision
    pub fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut r1 = SeededRng::from_u64(42);
        let mut r2 = SeededRng::from_u64(42);

        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::from_u64(1);
        let mut rng2 = SeededRng::from_u64(2);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_degenerate_seed_still_produces_values() {
        // this seed cancels the mixing constant and lands on a zero state
        let mut rng = SeededRng::from_u64(0x517cc1b727220a95);
        let vals: Vec<_> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(vals.iter().any(|v| *v != 0));
    }

    #[test]
    fn test_entropy_seeds_differ() {
        let a: Vec<_> = {
            let mut rng = SeededRng::from_entropy();
            (0..4).map(|_| rng.next_u64()).collect()
        };
        let b: Vec<_> = {
            let mut rng = SeededRng::from_entropy();
            (0..4).map(|_| rng.next_u64()).collect()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn test_streams_differ() {
        let base = SeededRng::from_u64(7);
        let mut a = base.for_stream(0);
        let mut b = base.for_stream(1);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_unit_range() {
        let mut rng = SeededRng::from_u64(42);
        for _ in 0..10_000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x), "draw {} outside [0, 1)", x);
        }
    }

    #[test]
    fn test_unit_mean() {
        let mut rng = SeededRng::from_u64(99);
        let samples = 10_000;
        let sum: f64 = (0..samples).map(|_| rng.next_unit()).sum();
        let mean = sum / samples as f64;
        assert!(mean > 0.45 && mean < 0.55, "mean {} not ~0.5", mean);
    }
}
