//! # gds-core
//!
//! Core types and the container-discipline classifier.
//!
//! Given a trace of inserts and removes, the classifier decides which of
//! three disciplines could have produced the observed removals:
//!
//! | Discipline | Removes | Label |
//! |------------|---------|-------|
//! | LIFO | last inserted | `stack` |
//! | FIFO | first inserted | `queue` |
//! | Min-key | lowest `x + y`, ties by insertion | `priority queue` |
//!
//! Two or more fitting disciplines give `not sure`; none gives
//! `impossible`.
//!
//! ```rust
//! use gds_core::{classify, Label, Trace};
//!
//! let trace = Trace::new().insert(1, 1).insert(2, 2).remove(1, 1).remove(2, 2);
//! assert_eq!(classify(&trace).label, Label::NotSure);
//! ```

pub mod classifier;
pub mod discipline;
pub mod error;
pub mod label;
pub mod operation;
pub mod point;
pub mod shadow;
pub mod verdict;

pub use classifier::{classify, classify_with_order, Classifier};
pub use discipline::{Discipline, PriorityOrder};
pub use error::NameError;
pub use label::{Flags, Label};
pub use operation::{OpKind, Operation, Trace};
pub use point::{Point, COORDINATE_MAX, COORDINATE_MIN};
pub use shadow::{shadow_for, PriorityShadow, QueueShadow, ShadowContainer, StackShadow};
pub use verdict::{ClassificationReport, DisciplineVerdict, Mismatch};
