//! Driver configuration.

use gds_core::PriorityOrder;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "GDS_LOG";

/// Filter used when neither `-v` nor `GDS_LOG` says otherwise.
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// How classification results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One label per line
    #[default]
    Text,
    /// JSON array of full reports
    Json,
}

/// Settings for `gds classify`.
#[derive(Debug, Clone, Default)]
pub struct ClassifyConfig {
    /// Key order of the priority queue
    pub priority_order: PriorityOrder,
    /// Reject coordinates outside `[1, 100]`
    pub enforce_bounds: bool,
    pub format: OutputFormat,
    /// Also write a per-trace report explaining each label
    pub explain: bool,
}

/// Pick the log filter directive.
///
/// An explicit `-v` wins, then `GDS_LOG`, then [`DEFAULT_LOG_DIRECTIVE`].
#[must_use]
pub fn log_directive(verbosity: u8, env_value: Option<&str>) -> String {
    match (verbosity, env_value) {
        (0, Some(value)) if !value.trim().is_empty() => value.trim().to_string(),
        (0, _) => DEFAULT_LOG_DIRECTIVE.to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifyConfig::default();
        assert_eq!(config.priority_order, PriorityOrder::MinKey);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.enforce_bounds);
        assert!(!config.explain);
    }

    #[test]
    fn test_log_directive_precedence() {
        assert_eq!(log_directive(0, None), "warn");
        assert_eq!(log_directive(0, Some("gds_core=debug")), "gds_core=debug");
        assert_eq!(log_directive(0, Some("  ")), "warn");
        assert_eq!(log_directive(1, Some("error")), "info");
        assert_eq!(log_directive(2, None), "debug");
        assert_eq!(log_directive(7, None), "trace");
    }
}
