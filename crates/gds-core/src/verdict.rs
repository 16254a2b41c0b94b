//! Per-discipline verdicts and the report for a classified trace.
//!
//! Every discipline that was ruled out carries the first removal that
//! ruled it out, so a label can always be explained.

use std::fmt;

use crate::discipline::Discipline;
use crate::label::Label;
use crate::point::Point;

/// The first removal that disagreed with a discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mismatch {
    /// 1-based position of the remove within its trace
    pub step: u64,
    /// Value the trace claimed was removed
    pub expected: Point,
    /// Head the discipline actually had (`None` if it was empty)
    pub found: Option<Point>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(found) => write!(
                f,
                "step {}: expected {}, found {}",
                self.step, self.expected, found
            ),
            None => write!(
                f,
                "step {}: expected {}, container was empty",
                self.step, self.expected
            ),
        }
    }
}

/// Whether one discipline survived a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisciplineVerdict {
    pub discipline: Discipline,
    /// `true` if every removal matched this discipline's head
    pub consistent: bool,
    /// First disagreement, present exactly when `consistent` is false
    pub mismatch: Option<Mismatch>,
}

impl DisciplineVerdict {
    #[must_use]
    pub fn pass(discipline: Discipline) -> Self {
        Self {
            discipline,
            consistent: true,
            mismatch: None,
        }
    }

    #[must_use]
    pub fn fail(discipline: Discipline, mismatch: Mismatch) -> Self {
        debug_assert!(mismatch.step > 0, "Steps are 1-based");
        Self {
            discipline,
            consistent: false,
            mismatch: Some(mismatch),
        }
    }

    /// Format as a single-line status.
    #[must_use]
    pub fn format_status(&self) -> String {
        match (self.consistent, &self.mismatch) {
            (true, _) => format!("[PASS] {}", self.discipline),
            (false, Some(m)) => format!("[FAIL] {}: {}", self.discipline, m),
            (false, None) => format!("[FAIL] {}", self.discipline),
        }
    }
}

/// Outcome of classifying one trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationReport {
    pub label: Label,
    /// One verdict per discipline, in [`Discipline::ALL`] order
    pub verdicts: Vec<DisciplineVerdict>,
    /// Operations applied
    pub operations_count: u64,
    /// Remove operations applied
    pub removes_count: u64,
}

impl ClassificationReport {
    /// Verdict for `discipline`.
    #[must_use]
    pub fn verdict(&self, discipline: Discipline) -> Option<&DisciplineVerdict> {
        self.verdicts.iter().find(|v| v.discipline == discipline)
    }

    /// Whether `discipline` survived the trace.
    #[must_use]
    pub fn is_consistent(&self, discipline: Discipline) -> bool {
        self.verdict(discipline).is_some_and(|v| v.consistent)
    }

    /// Format as a multi-line report.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = format!(
            "Classification: {} ({} operations, {} removes)\n",
            self.label, self.operations_count, self.removes_count
        );

        for verdict in &self.verdicts {
            report.push_str("  ");
            report.push_str(&verdict.format_status());
            report.push('\n');
        }

        report
    }
}
