//! Seeded random source for trace generation.
//!
//! Uses Xoshiro256** so a seed always yields the same traces.

use gds_core::Point;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Maximum number of draws before warning.
const DRAWS_COUNT_WARNING_THRESHOLD: u64 = 1_000_000_000;

/// Deterministic random source.
///
/// # Example
///
/// ```rust
/// use gds_dst::TraceRng;
///
/// let mut a = TraceRng::new(12345);
/// let mut b = TraceRng::new(12345);
/// assert_eq!(a.gen_point(100), b.gen_point(100));
/// ```
pub struct TraceRng {
    seed: u64,
    rng: Xoshiro256StarStar,
    draws_count: u64,
}

impl TraceRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            draws_count: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws_count(&self) -> u64 {
        self.draws_count
    }

    fn count_draw(&mut self) {
        self.draws_count += 1;
        debug_assert!(
            self.draws_count < DRAWS_COUNT_WARNING_THRESHOLD,
            "Very high number of RNG draws - possible infinite loop"
        );
    }

    /// Uniform coordinate in `1..=coordinate_max`.
    pub fn gen_coordinate(&mut self, coordinate_max: i32) -> i32 {
        debug_assert!(coordinate_max >= 1, "Coordinate range must not be empty");
        self.count_draw();
        self.rng.gen_range(1..=coordinate_max)
    }

    /// Point with both coordinates in `1..=coordinate_max`.
    pub fn gen_point(&mut self, coordinate_max: i32) -> Point {
        let x = self.gen_coordinate(coordinate_max);
        let y = self.gen_coordinate(coordinate_max);
        Point::new(x, y)
    }

    /// `true` with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0.0, 1.0]"
        );
        self.count_draw();
        self.rng.gen_bool(probability)
    }

    /// Uniform index in `0..len`.
    pub fn gen_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "Cannot pick from an empty range");
        self.count_draw();
        self.rng.gen_range(0..len)
    }

    /// Raw 64-bit value.
    pub fn gen_u64(&mut self) -> u64 {
        self.count_draw();
        self.rng.gen()
    }

    /// Derive a child RNG, e.g. one per generated trace.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let child_seed = self.gen_u64();
        Self::new(child_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut a = TraceRng::new(42);
        let mut b = TraceRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.gen_point(100), b.gen_point(100));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut a = TraceRng::new(42);
        let mut b = TraceRng::new(43);
        let seq_a: Vec<u64> = (0..10).map(|_| a.gen_u64()).collect();
        let seq_b: Vec<u64> = (0..10).map(|_| b.gen_u64()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_points_within_range() {
        let mut rng = TraceRng::new(7);
        for _ in 0..1000 {
            let p = rng.gen_point(3);
            assert!((1..=3).contains(&p.x));
            assert!((1..=3).contains(&p.y));
        }
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut a = TraceRng::new(12345);
        let mut b = TraceRng::new(12345);
        let fa = a.fork();
        let fb = b.fork();
        assert_eq!(fa.seed(), fb.seed());
        assert_ne!(fa.seed(), 12345);
    }

    #[test]
    fn test_draws_count() {
        let mut rng = TraceRng::new(12345);
        assert_eq!(rng.draws_count(), 0);
        let _ = rng.gen_point(10);
        assert_eq!(rng.draws_count(), 2);
        let _ = rng.gen_bool(0.5);
        assert_eq!(rng.draws_count(), 3);
    }
}
