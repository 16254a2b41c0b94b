//! # gds-stateright
//!
//! Stateright model that exhaustively checks the discipline classifier
//! on every bounded trace over a small point alphabet.

pub mod classifier_model;

pub use classifier_model::{reference_label, ClassifierModel, TraceState};
