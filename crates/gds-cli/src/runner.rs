//! Subcommand bodies, independent of argument parsing.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use gds_core::{ClassificationReport, Classifier};
use gds_dst::{
    run_simulation, GeneratedTrace, GeneratorConfig, SimulationConfig, SimulationSummary,
    TraceGenerator,
};
use tracing::{debug, info};

use crate::config::ClassifyConfig;
use crate::error::DriverError;
use crate::input::TraceReader;
use crate::output::{write_reports, write_traces};

/// Open `path` for buffered reading.
pub fn open_input(path: &Path) -> Result<BufReader<File>, DriverError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DriverError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Classify every trace in `reader`.
///
/// One classifier is reset between traces. All input is read before
/// anything is returned, so malformed input yields no partial results.
pub fn classify_all<R: BufRead>(
    reader: R,
    config: &ClassifyConfig,
) -> Result<Vec<ClassificationReport>, DriverError> {
    let mut classifier = Classifier::with_order(config.priority_order);
    let mut reports = Vec::new();

    for trace in TraceReader::new(reader).with_bounds(config.enforce_bounds) {
        let trace = trace?;
        classifier.reset();
        classifier.apply_trace(&trace);
        let report = classifier.report();
        debug!(trace = reports.len() + 1, label = %report.label, "classified");
        reports.push(report);
    }

    info!(traces = reports.len(), "classification finished");
    Ok(reports)
}

/// Classify `reader` and write the results to `out` in the configured format.
pub fn run_classify<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    config: &ClassifyConfig,
) -> Result<Vec<ClassificationReport>, DriverError> {
    let reports = classify_all(reader, config)?;
    write_reports(out, &reports, config.format)?;
    out.flush()?;
    Ok(reports)
}

/// Generate `count` traces from `seed`.
pub fn generate_traces(
    seed: u64,
    count: usize,
    config: GeneratorConfig,
) -> Result<Vec<GeneratedTrace>, DriverError> {
    let mut generator = TraceGenerator::new(seed, config)?;
    let generated: Vec<GeneratedTrace> = (0..count).map(|_| generator.generate()).collect();

    let corrupted = generated.iter().filter(|g| !g.is_faithful()).count();
    info!(seed, count, corrupted, "generated traces");
    Ok(generated)
}

/// Generate traces and write them in the input format.
pub fn run_generate<W: Write>(
    out: &mut W,
    seed: u64,
    count: usize,
    config: GeneratorConfig,
) -> Result<Vec<GeneratedTrace>, DriverError> {
    let generated = generate_traces(seed, count, config)?;
    write_traces(out, generated.iter().map(|g| &g.trace))?;
    out.flush()?;
    Ok(generated)
}

/// Run the deterministic self-check.
pub fn run_simulate(
    seed: u64,
    config: &SimulationConfig,
) -> Result<SimulationSummary, DriverError> {
    Ok(run_simulation(seed, config)?)
}
