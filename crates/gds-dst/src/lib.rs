//! # gds-dst
//!
//! Deterministic trace generation and simulation for the discipline
//! classifier. All behavior is reproducible via a seed.
//!
//! ## Usage
//!
//! ```rust
//! use gds_core::{classify, Discipline};
//! use gds_dst::{GeneratorConfig, TraceGenerator};
//!
//! let config = GeneratorConfig::default().with_discipline(Discipline::Queue);
//! let mut generator = TraceGenerator::new(12345, config).unwrap();
//! let generated = generator.generate();
//! assert!(classify(&generated.trace).is_consistent(Discipline::Queue));
//! ```
//!
//! ## Reproducibility
//!
//! To reproduce a failing run:
//! ```bash
//! GDS_SEED=12345 cargo test -p gds-dst
//! ```

pub mod error;
pub mod generator;
pub mod mutation;
pub mod random;
pub mod simulation;

pub use error::DstError;
pub use generator::{GeneratedTrace, GeneratorConfig, TraceGenerator, OPERATIONS_MAX};
pub use mutation::{MutationConfig, TraceMutator};
pub use random::TraceRng;
pub use simulation::{run_simulation, SimulationConfig, SimulationSummary, Violation};

/// Environment variable holding the seed to reproduce.
pub const SEED_ENV: &str = "GDS_SEED";

/// Environment variable overriding the number of simulation iterations.
pub const ITERATIONS_ENV: &str = "GDS_ITERATIONS";

/// Get the seed from `GDS_SEED` or generate a random one.
///
/// The seed is logged either way so a failing run can be reproduced.
pub fn get_or_generate_seed() -> Result<u64, DstError> {
    match std::env::var(SEED_ENV) {
        Ok(s) => {
            let seed = parse_env_u64(SEED_ENV, &s)?;
            tracing::info!("{}={} (from environment)", SEED_ENV, seed);
            Ok(seed)
        }
        Err(_) => {
            let seed = rand::random::<u64>();
            tracing::info!("{}={} (randomly generated)", SEED_ENV, seed);
            Ok(seed)
        }
    }
}

/// Iteration count from `GDS_ITERATIONS`, or `default` when unset.
pub fn iterations_from_env(default: u64) -> Result<u64, DstError> {
    match std::env::var(ITERATIONS_ENV) {
        Ok(s) => parse_env_u64(ITERATIONS_ENV, &s),
        Err(_) => Ok(default),
    }
}

fn parse_env_u64(var: &'static str, value: &str) -> Result<u64, DstError> {
    value
        .trim()
        .parse()
        .map_err(|source| DstError::InvalidEnvNumber {
            var,
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_u64() {
        assert_eq!(parse_env_u64(SEED_ENV, " 42 ").unwrap(), 42);
        let err = parse_env_u64(SEED_ENV, "forty-two").unwrap_err();
        assert!(err.to_string().contains("GDS_SEED"));
        assert!(err.to_string().contains("forty-two"));
    }

    #[test]
    fn test_simulation_from_env_seed() {
        let seed = get_or_generate_seed().unwrap();
        let iterations = iterations_from_env(200).unwrap();
        let config = SimulationConfig {
            iterations,
            ..SimulationConfig::default()
        };
        let summary = run_simulation(seed, &config).unwrap();
        assert!(summary.passed(), "{}", summary);
    }
}
