//! Trace generation for a chosen discipline.
//!
//! The generator drives its own shadow container of the target
//! discipline. Every remove claims that shadow's head, unless the
//! mutator corrupts it, so an uncorrupted trace always fits the target.

use gds_core::{shadow_for, Discipline, PriorityOrder, Trace, COORDINATE_MAX};

use crate::error::DstError;
use crate::mutation::{MutationConfig, TraceMutator};
use crate::random::TraceRng;

/// Longest trace a generator may be asked for.
pub const OPERATIONS_MAX: usize = 1_000_000;

/// Upper bound on pre-allocation per generated trace.
const PREALLOCATE_OPERATIONS_MAX: usize = 4096;

/// Configuration for generated traces.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Operations per trace
    pub operations_count: usize,
    /// Probability of inserting when a remove is also possible
    pub insert_probability: f64,
    /// Coordinates are drawn from `1..=coordinate_max`
    pub coordinate_max: i32,
    /// Discipline the removals follow
    pub discipline: Discipline,
    /// Key order when `discipline` is the priority queue
    pub priority_order: PriorityOrder,
    /// Corruption of remove payloads
    pub mutation: MutationConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            operations_count: 16,
            insert_probability: 0.55,
            coordinate_max: COORDINATE_MAX,
            discipline: Discipline::Stack,
            priority_order: PriorityOrder::MinKey,
            mutation: MutationConfig::none(),
        }
    }
}

impl GeneratorConfig {
    /// Short traces over a tiny coordinate range, so priority ties and
    /// coincidental agreement between disciplines are common.
    #[must_use]
    pub fn small() -> Self {
        Self {
            operations_count: 6,
            coordinate_max: 3,
            ..Default::default()
        }
    }

    /// Long traces with frequent corruption.
    #[must_use]
    pub fn stress() -> Self {
        Self {
            operations_count: 200,
            insert_probability: 0.5,
            mutation: MutationConfig::aggressive(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    #[must_use]
    pub fn with_mutation(mut self, mutation: MutationConfig) -> Self {
        self.mutation = mutation;
        self
    }

    /// Check that every setting is in range.
    pub fn validate(&self) -> Result<(), DstError> {
        if !(0.0..=1.0).contains(&self.insert_probability) {
            return Err(DstError::InvalidConfig(format!(
                "insert probability {} is outside [0, 1]",
                self.insert_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation.corruption_probability) {
            return Err(DstError::InvalidConfig(format!(
                "corruption probability {} is outside [0, 1]",
                self.mutation.corruption_probability
            )));
        }
        if self.operations_count > OPERATIONS_MAX {
            return Err(DstError::InvalidConfig(format!(
                "operations count {} exceeds {}",
                self.operations_count, OPERATIONS_MAX
            )));
        }
        if self.coordinate_max < 1 {
            return Err(DstError::InvalidConfig(format!(
                "coordinate max {} must be at least 1",
                self.coordinate_max
            )));
        }
        Ok(())
    }
}

/// A generated trace and how it was made.
#[derive(Debug, Clone)]
pub struct GeneratedTrace {
    pub trace: Trace,
    /// Discipline the removals were drawn from
    pub discipline: Discipline,
    pub priority_order: PriorityOrder,
    /// 1-based steps whose remove payload was corrupted
    pub corrupted_steps: Vec<u64>,
}

impl GeneratedTrace {
    /// `true` if no remove was corrupted.
    #[must_use]
    pub fn is_faithful(&self) -> bool {
        self.corrupted_steps.is_empty()
    }
}

/// Seeded trace generator.
pub struct TraceGenerator {
    rng: TraceRng,
    mutator: TraceMutator,
    config: GeneratorConfig,
}

impl TraceGenerator {
    /// Create a generator. The mutator gets its own RNG forked from `seed`.
    pub fn new(seed: u64, config: GeneratorConfig) -> Result<Self, DstError> {
        config.validate()?;

        let mut rng = TraceRng::new(seed);
        let mutator = TraceMutator::new(rng.fork(), config.mutation.clone());

        Ok(Self {
            rng,
            mutator,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the next trace.
    pub fn generate(&mut self) -> GeneratedTrace {
        let config = &self.config;
        let mut shadow = shadow_for(config.discipline, config.priority_order);
        let mut trace =
            Trace::with_capacity(config.operations_count.min(PREALLOCATE_OPERATIONS_MAX));
        let mut corrupted_steps = Vec::new();

        for step in 1..=config.operations_count as u64 {
            let head = if self.rng.gen_bool(config.insert_probability) {
                None
            } else {
                shadow.pop()
            };

            match head {
                Some(head) => {
                    let expected = if self.mutator.should_corrupt() {
                        corrupted_steps.push(step);
                        self.mutator.corrupt(head, config.coordinate_max)
                    } else {
                        head
                    };
                    trace.record_remove(expected);
                }
                // Chose to insert, or nothing left to remove
                None => {
                    let point = self.rng.gen_point(config.coordinate_max);
                    shadow.push(point);
                    trace.record_insert(point);
                }
            }
        }

        GeneratedTrace {
            trace,
            discipline: config.discipline,
            priority_order: config.priority_order,
            corrupted_steps,
        }
    }
}
