//! Deterministic corruption of remove payloads.
//!
//! A corrupted remove claims a point other than the one its discipline
//! would actually hand out, so the trace must no longer fit that
//! discipline.

use gds_core::Point;

use crate::random::TraceRng;

/// Configuration for payload corruption.
#[derive(Debug, Clone)]
pub struct MutationConfig {
    /// Probability that a given remove is corrupted (0.0 to 1.0)
    pub corruption_probability: f64,
    /// Whether corruption is enabled
    pub enabled: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            corruption_probability: 0.05,
            enabled: true,
        }
    }
}

impl MutationConfig {
    /// Faithful traces only.
    #[must_use]
    pub fn none() -> Self {
        Self {
            corruption_probability: 0.0,
            enabled: false,
        }
    }

    /// Corrupt often, for stress runs.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            corruption_probability: 0.3,
            enabled: true,
        }
    }

    /// Corrupt with the given probability.
    #[must_use]
    pub fn with_probability(corruption_probability: f64) -> Self {
        Self {
            corruption_probability,
            enabled: corruption_probability > 0.0,
        }
    }
}

/// Seeded payload corrupter.
pub struct TraceMutator {
    rng: TraceRng,
    config: MutationConfig,
    corruptions_count: u64,
}

impl TraceMutator {
    pub fn new(rng: TraceRng, config: MutationConfig) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&config.corruption_probability),
            "Corruption probability must be in [0.0, 1.0]"
        );

        Self {
            rng,
            config,
            corruptions_count: 0,
        }
    }

    /// Decide whether the next remove is corrupted.
    pub fn should_corrupt(&mut self) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.rng.gen_bool(self.config.corruption_probability)
    }

    /// Replace `actual` with a different point within `1..=coordinate_max`.
    ///
    /// With a single-valued range there is no other in-range point, so the
    /// result steps outside it instead.
    pub fn corrupt(&mut self, actual: Point, coordinate_max: i32) -> Point {
        self.corruptions_count += 1;

        if coordinate_max <= 1 {
            return Point::new(actual.x + 1, actual.y);
        }

        let candidate = self.rng.gen_point(coordinate_max);
        if candidate != actual {
            return candidate;
        }
        // Same point drawn: shift x, wrapping inside the range
        Point::new(actual.x % coordinate_max + 1, actual.y)
    }

    #[must_use]
    pub fn corruptions_count(&self) -> u64 {
        self.corruptions_count
    }

    #[must_use]
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_corrupts_when_disabled() {
        let mut m = TraceMutator::new(TraceRng::new(1), MutationConfig::none());
        for _ in 0..1000 {
            assert!(!m.should_corrupt());
        }
    }

    #[test]
    fn test_always_corrupts_at_probability_one() {
        let mut m = TraceMutator::new(TraceRng::new(1), MutationConfig::with_probability(1.0));
        for _ in 0..100 {
            assert!(m.should_corrupt());
        }
    }

    #[test]
    fn test_corrupted_point_differs() {
        let mut m = TraceMutator::new(TraceRng::new(99), MutationConfig::aggressive());
        for max in [1, 2, 3, 100] {
            for _ in 0..500 {
                let actual = Point::new(max, 1);
                assert_ne!(m.corrupt(actual, max), actual);
            }
        }
        assert_eq!(m.corruptions_count(), 2000);
    }

    #[test]
    fn test_corrupted_point_stays_in_range() {
        let mut m = TraceMutator::new(TraceRng::new(5), MutationConfig::default());
        for _ in 0..500 {
            let p = m.corrupt(Point::new(2, 2), 2);
            assert!((1..=2).contains(&p.x) && (1..=2).contains(&p.y));
        }
    }

    #[test]
    fn test_deterministic_decisions() {
        let mut a = TraceMutator::new(TraceRng::new(42), MutationConfig::default());
        let mut b = TraceMutator::new(TraceRng::new(42), MutationConfig::default());
        for _ in 0..200 {
            assert_eq!(a.should_corrupt(), b.should_corrupt());
        }
    }
}
