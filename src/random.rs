use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness for rollouts.
///
/// The engine owns one generator and threads it through every rollout, so a seeded
/// generator makes a whole search reproducible.
pub trait RandomGenerator: Default {
    /// Returns a number in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks a uniformly random element, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }
}

/// Draws from the thread-local generator. Not reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        rand::rng().random_range(from..to)
    }
}

/// A generator with a fixed seed. Two generators built from the same seed yield the
/// same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::random::{RandomGenerator, SeededRandomGenerator, StandardRandomGenerator};

    #[test]
    fn same_seed_gives_same_numbers() {
        let mut first = SeededRandomGenerator::new(42);
        let mut second = SeededRandomGenerator::new(42);
        let a: Vec<usize> = (0..32).map(|_| first.next_range(0, 10)).collect();
        let b: Vec<usize> = (0..32).map(|_| second.next_range(0, 10)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn numbers_stay_in_range() {
        let mut seeded = SeededRandomGenerator::default();
        let mut standard = StandardRandomGenerator;
        for _ in 0..1000 {
            let n = seeded.next_range(3, 7);
            assert!((3..7).contains(&n));
            let n = standard.next_range(0, 2);
            assert!(n < 2);
        }
    }

    #[test]
    fn choose_handles_empty_and_single_slices() {
        let mut crg = SeededRandomGenerator::default();
        let empty: [u8; 0] = [];
        assert_eq!(crg.choose(&empty), None);
        assert_eq!(crg.choose(&[7]), Some(&7));
    }

    #[test]
    fn choose_eventually_visits_every_element() {
        let items = [432, 6542, 534, 6, 13];
        let mut crg = SeededRandomGenerator::default();
        let mut seen = [false; 5];
        for _ in 0..500 {
            let picked = crg.choose(&items).unwrap();
            let index = items.iter().position(|x| x == picked).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|x| *x));
    }
}
