//! Errors for parsing names of core values.
//!
//! Classification itself cannot fail; only turning user text into a
//! [`Discipline`](crate::Discipline), [`PriorityOrder`](crate::PriorityOrder)
//! or [`Label`](crate::Label) can.

use thiserror::Error;

/// A name that does not denote any known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct NameError {
    /// What was being parsed (e.g. "discipline")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl NameError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
