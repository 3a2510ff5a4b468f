//! Random Source Adapters

use crate::ports::RandomSource;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed random source for deterministic testing.
///
/// Always returns `value % len`, i.e. the same position in every draw.
///
/// # Example
///
/// ```rust
/// use gx_01_assignment_engine::adapters::FixedRandomSource;
/// use gx_01_assignment_engine::RandomSource;
///
/// let rng = FixedRandomSource::new(7);
/// assert_eq!(rng.random_index(5), 2);
/// assert_eq!(rng.random_index(5), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FixedRandomSource {
    value: usize,
}

impl FixedRandomSource {
    pub fn new(value: usize) -> Self {
        Self { value }
    }

    /// Always picks the first candidate.
    pub fn first() -> Self {
        Self::new(0)
    }
}

impl RandomSource for FixedRandomSource {
    fn random_index(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.value % len
        }
    }
}

/// Production random source backed by `StdRng`.
///
/// Seed it for reproducible draws, or from OS entropy for real exchanges.
#[derive(Debug)]
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
}

impl StdRandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandomSource {
    fn random_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.lock().gen_range(0..len)
    }
}
