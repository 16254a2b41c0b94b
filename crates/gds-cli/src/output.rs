//! Writers for labels, reports and generated traces.

use std::io::Write;

use gds_core::{ClassificationReport, Trace};

use crate::config::OutputFormat;
use crate::error::DriverError;

/// Write one label per line.
pub fn write_labels<W: Write>(
    out: &mut W,
    reports: &[ClassificationReport],
) -> Result<(), DriverError> {
    for report in reports {
        writeln!(out, "{}", report.label)?;
    }
    Ok(())
}

/// Write all reports as a pretty-printed JSON array.
pub fn write_json<W: Write>(
    out: &mut W,
    reports: &[ClassificationReport],
) -> Result<(), DriverError> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

/// Write reports in `format`.
pub fn write_reports<W: Write>(
    out: &mut W,
    reports: &[ClassificationReport],
    format: OutputFormat,
) -> Result<(), DriverError> {
    match format {
        OutputFormat::Text => write_labels(out, reports),
        OutputFormat::Json => write_json(out, reports),
    }
}

/// Write the human-readable explanation of every report.
pub fn write_explanations<W: Write>(
    out: &mut W,
    reports: &[ClassificationReport],
) -> Result<(), DriverError> {
    for (i, report) in reports.iter().enumerate() {
        write!(out, "Trace {}: {}", i + 1, report.format_report())?;
    }
    Ok(())
}

/// Write traces back in the input format.
pub fn write_traces<'a, W, I>(out: &mut W, traces: I) -> Result<(), DriverError>
where
    W: Write,
    I: IntoIterator<Item = &'a Trace>,
{
    for trace in traces {
        writeln!(out, "{}", trace.len())?;
        for operation in trace {
            writeln!(out, "{}", operation)?;
        }
    }
    Ok(())
}
