//! Errors for seeding and configuring simulations.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DstError {
    /// An environment variable held something other than an unsigned integer.
    #[error("{var} must be a valid u64, got `{value}`")]
    InvalidEnvNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A generator or simulation setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
