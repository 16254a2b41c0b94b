//! Deterministic self-check of the classifier.
//!
//! Each iteration generates a trace for a known discipline, classifies
//! it, and checks that the discipline survived exactly when no remove
//! was corrupted. A failing run prints its seed; rerunning with
//! `GDS_SEED=<seed>` reproduces it.

use std::collections::HashMap;
use std::fmt;

use gds_core::{classify_with_order, ClassificationReport, Discipline, Label, Trace};
use tracing::{debug, info, warn};

use crate::error::DstError;
use crate::generator::{GeneratorConfig, TraceGenerator};
use crate::random::TraceRng;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of traces to generate and classify
    pub iterations: u64,
    /// Settings for every generated trace
    pub generator: GeneratorConfig,
    /// Cycle the target through all disciplines instead of using
    /// `generator.discipline` only
    pub rotate_disciplines: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            generator: GeneratorConfig::default(),
            rotate_disciplines: true,
        }
    }
}

impl SimulationConfig {
    /// Few iterations for quick checks.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            iterations: 100,
            ..Default::default()
        }
    }

    /// Long corrupted traces, many iterations.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            iterations: 10_000,
            generator: GeneratorConfig::stress(),
            ..Default::default()
        }
    }
}

/// One iteration where the classifier disagreed with the generator.
#[derive(Debug, Clone)]
pub struct Violation {
    pub iteration: u64,
    /// Seed that regenerates this exact trace
    pub trace_seed: u64,
    pub discipline: Discipline,
    /// Whether the generator left the trace faithful
    pub faithful: bool,
    pub trace: Trace,
    pub report: ClassificationReport,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iteration {} (trace seed {}): {} trace {} but classified as {}",
            self.iteration,
            self.trace_seed,
            self.discipline,
            if self.faithful { "faithful" } else { "corrupted" },
            self.report.label
        )
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    /// Master seed of the run
    pub seed: u64,
    pub iterations: u64,
    pub faithful_count: u64,
    pub corrupted_count: u64,
    /// How often each label was produced
    pub label_counts: HashMap<Label, u64>,
    pub violations: Vec<Violation>,
}

impl SimulationSummary {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn label_count(&self, label: Label) -> u64 {
        self.label_counts.get(&label).copied().unwrap_or(0)
    }

    /// Format the seed for reproduction.
    #[must_use]
    pub fn format_seed(&self) -> String {
        format!("GDS_SEED={}", self.seed)
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations={} faithful={} corrupted={} violations={}",
            self.format_seed(),
            self.iterations,
            self.faithful_count,
            self.corrupted_count,
            self.violations.len()
        )?;
        for label in [
            Label::Stack,
            Label::Queue,
            Label::PriorityQueue,
            Label::NotSure,
            Label::Impossible,
        ] {
            write!(f, " [{}]={}", label, self.label_count(label))?;
        }
        Ok(())
    }
}

/// Run `config.iterations` generate-and-classify rounds from `seed`.
pub fn run_simulation(seed: u64, config: &SimulationConfig) -> Result<SimulationSummary, DstError> {
    config.generator.validate()?;
    info!(seed, iterations = config.iterations, "starting simulation");

    let mut master = TraceRng::new(seed);
    let mut summary = SimulationSummary {
        seed,
        iterations: config.iterations,
        faithful_count: 0,
        corrupted_count: 0,
        label_counts: HashMap::new(),
        violations: Vec::new(),
    };

    for iteration in 0..config.iterations {
        let discipline = if config.rotate_disciplines {
            Discipline::ALL[(iteration % 3) as usize]
        } else {
            config.generator.discipline
        };

        let trace_seed = master.gen_u64();
        let generator_config = config.generator.clone().with_discipline(discipline);
        let mut generator = TraceGenerator::new(trace_seed, generator_config)?;
        let generated = generator.generate();

        let report = classify_with_order(&generated.trace, generated.priority_order);
        *summary.label_counts.entry(report.label).or_insert(0) += 1;

        let faithful = generated.is_faithful();
        if faithful {
            summary.faithful_count += 1;
        } else {
            summary.corrupted_count += 1;
        }

        if report.is_consistent(discipline) != faithful {
            let violation = Violation {
                iteration,
                trace_seed,
                discipline,
                faithful,
                trace: generated.trace,
                report,
            };
            warn!(%violation, "classifier disagrees with generator");
            summary.violations.push(violation);
        } else {
            debug!(iteration, label = %report.label, "iteration ok");
        }
    }

    info!(%summary, "simulation finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationConfig;

    #[test]
    fn test_faithful_run_passes() {
        let summary = run_simulation(12345, &SimulationConfig::fast()).unwrap();
        assert!(summary.passed(), "{}", summary);
        assert_eq!(summary.iterations, 100);
        assert_eq!(summary.faithful_count, 100);
        assert_eq!(summary.label_count(Label::Impossible), 0);
    }

    #[test]
    fn test_corrupted_run_passes() {
        let config = SimulationConfig {
            iterations: 300,
            generator: GeneratorConfig::default().with_mutation(MutationConfig::aggressive()),
            rotate_disciplines: true,
        };
        let summary = run_simulation(777, &config).unwrap();
        assert!(summary.passed(), "{}", summary);
        assert!(summary.corrupted_count > 0);
        assert_eq!(summary.faithful_count + summary.corrupted_count, 300);
    }

    #[test]
    fn test_small_traces_reach_several_labels() {
        let config = SimulationConfig {
            iterations: 500,
            generator: GeneratorConfig::small().with_mutation(MutationConfig::default()),
            rotate_disciplines: true,
        };
        let summary = run_simulation(2024, &config).unwrap();
        assert!(summary.passed(), "{}", summary);
        assert!(summary.label_count(Label::NotSure) > 0);
        let total: u64 = summary.label_counts.values().sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn test_same_seed_same_summary() {
        let config = SimulationConfig {
            iterations: 50,
            generator: GeneratorConfig::default().with_mutation(MutationConfig::aggressive()),
            rotate_disciplines: true,
        };
        let a = run_simulation(99, &config).unwrap();
        let b = run_simulation(99, &config).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_fixed_discipline() {
        let config = SimulationConfig {
            iterations: 40,
            generator: GeneratorConfig::default().with_discipline(Discipline::Queue),
            rotate_disciplines: false,
        };
        let summary = run_simulation(5, &config).unwrap();
        assert!(summary.passed());
        assert_eq!(summary.label_count(Label::Stack), 0);
        assert_eq!(summary.label_count(Label::PriorityQueue), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimulationConfig::fast();
        config.generator.insert_probability = -0.1;
        assert!(run_simulation(1, &config).is_err());
    }
}
