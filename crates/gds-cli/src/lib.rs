//! # gds-cli
//!
//! Text driver for the discipline classifier: reads traces, writes labels.
//!
//! | Module | Role |
//! |--------|------|
//! | [`input`] | Streaming reader for the `n` / `method x y` format |
//! | [`output`] | Label, JSON, explanation and trace writers |
//! | [`runner`] | Bodies of the `classify`, `generate` and `simulate` subcommands |
//! | [`config`] | Output format, classifier settings, log filter selection |
//!
//! ```rust
//! use gds_cli::{run_classify, ClassifyConfig};
//!
//! let input = "2\n1 3 4\n2 3 4\n";
//! let mut out = Vec::new();
//! run_classify(input.as_bytes(), &mut out, &ClassifyConfig::default()).unwrap();
//! assert_eq!(out, b"not sure\n");
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod runner;

pub use config::{log_directive, ClassifyConfig, OutputFormat, DEFAULT_LOG_DIRECTIVE, LOG_ENV};
pub use error::DriverError;
pub use input::{parse_traces, TraceReader};
pub use output::{write_explanations, write_json, write_labels, write_reports, write_traces};
pub use runner::{
    classify_all, generate_traces, open_input, run_classify, run_generate, run_simulate,
};
