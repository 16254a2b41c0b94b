//! The discipline classifier.
//!
//! Replays a trace against a stack, a queue and a priority queue at the
//! same time. Each remove is checked against all three heads
//! independently; a discipline whose head disagrees is ruled out for the
//! rest of the trace.
//!
//! # Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Monotonic flags | A ruled-out discipline stays ruled out until `reset` |
//! | Equal sizes | All three shadows always hold the same number of points |
//! | Shared contents | Shadows of still-consistent disciplines hold the same multiset |
//! | Total | No sequence of operations panics, including removes on empty shadows |

use tracing::{debug, trace};

use crate::discipline::{Discipline, PriorityOrder};
use crate::label::{Flags, Label};
use crate::operation::{Operation, Trace};
use crate::point::Point;
use crate::shadow::{PriorityShadow, QueueShadow, ShadowContainer, StackShadow};
use crate::verdict::{ClassificationReport, DisciplineVerdict, Mismatch};

/// Classifies one trace at a time.
///
/// ```rust
/// use gds_core::{Classifier, Label, Operation, Point};
///
/// let mut classifier = Classifier::new();
/// classifier.apply(Operation::Insert(Point::new(1, 1)));
/// classifier.apply(Operation::Insert(Point::new(5, 5)));
/// classifier.apply(Operation::Remove(Point::new(5, 5)));
/// classifier.apply(Operation::Remove(Point::new(1, 1)));
/// assert_eq!(classifier.status(), Label::Stack);
///
/// classifier.reset();
/// assert_eq!(classifier.status(), Label::NotSure);
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    stack: StackShadow,
    queue: QueueShadow,
    priority: PriorityShadow,
    flags: Flags,
    /// First mismatch per discipline, indexed by `Discipline::index`
    mismatches: [Option<Mismatch>; 3],
    operations_count: u64,
    removes_count: u64,
}

impl Classifier {
    /// Create a classifier whose priority queue serves the lowest key first.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(PriorityOrder::MinKey)
    }

    /// Create a classifier with the given priority order.
    #[must_use]
    pub fn with_order(order: PriorityOrder) -> Self {
        Self {
            stack: StackShadow::new(),
            queue: QueueShadow::new(),
            priority: PriorityShadow::new(order),
            flags: Flags::all_consistent(),
            mismatches: [None; 3],
            operations_count: 0,
            removes_count: 0,
        }
    }

    /// Priority order of the priority shadow.
    #[must_use]
    pub fn priority_order(&self) -> PriorityOrder {
        self.priority.order()
    }

    /// Empty all shadows and mark every discipline consistent again.
    pub fn reset(&mut self) {
        for discipline in Discipline::ALL {
            self.shadow_mut(discipline).clear();
        }
        self.flags = Flags::all_consistent();
        self.mismatches = [None; 3];
        self.operations_count = 0;
        self.removes_count = 0;
    }

    /// Apply one operation.
    pub fn apply(&mut self, operation: Operation) {
        self.operations_count += 1;
        let step = self.operations_count;
        trace!(step, %operation, "apply");

        match operation {
            Operation::Insert(point) => {
                for discipline in Discipline::ALL {
                    self.shadow_mut(discipline).push(point);
                }
            }
            Operation::Remove(expected) => {
                self.removes_count += 1;
                for discipline in Discipline::ALL {
                    self.check_removal(discipline, expected, step);
                }
            }
        }
    }

    /// Apply every operation of `trace` in order.
    pub fn apply_trace(&mut self, trace: &Trace) {
        for operation in trace {
            self.apply(*operation);
        }
    }

    /// Label for the operations applied since the last reset.
    #[must_use]
    pub fn status(&self) -> Label {
        Label::from_flags(&self.flags)
    }

    /// Current consistency flags.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// First mismatch recorded for `discipline`, if it was ruled out.
    #[must_use]
    pub fn mismatch(&self, discipline: Discipline) -> Option<Mismatch> {
        self.mismatches[discipline.index()]
    }

    /// Build the full report for the current trace.
    #[must_use]
    pub fn report(&self) -> ClassificationReport {
        let verdicts = Discipline::ALL
            .iter()
            .map(|&d| match self.mismatch(d) {
                Some(m) => DisciplineVerdict::fail(d, m),
                None => DisciplineVerdict::pass(d),
            })
            .collect();

        ClassificationReport {
            label: self.status(),
            verdicts,
            operations_count: self.operations_count,
            removes_count: self.removes_count,
        }
    }

    /// Number of points currently held by `discipline`'s shadow.
    #[must_use]
    pub fn shadow_len(&self, discipline: Discipline) -> usize {
        self.shadow(discipline).len()
    }

    /// All shadows hold the same number of points.
    #[must_use]
    pub fn sizes_agree(&self) -> bool {
        let len = self.stack.len();
        self.queue.len() == len && self.priority.len() == len
    }

    /// Shadows of still-consistent disciplines hold the same multiset.
    ///
    /// A consistent discipline removed exactly the expected points, so its
    /// contents are the inserts minus the expected removes.
    #[must_use]
    pub fn consistent_contents_agree(&self) -> bool {
        let mut contents = self
            .flags
            .consistent()
            .map(|d| self.shadow(d).sorted_contents());

        match contents.next() {
            Some(first) => contents.all(|c| c == first),
            None => true,
        }
    }

    /// Read the head of `discipline`'s shadow, compare it to `expected`,
    /// then remove it whether or not it matched.
    ///
    /// An empty shadow has no head: that is a mismatch and nothing is removed.
    fn check_removal(&mut self, discipline: Discipline, expected: Point, step: u64) {
        let shadow = self.shadow_mut(discipline);
        let found = shadow.peek();
        if found.is_some() {
            shadow.pop();
        }
        if found != Some(expected) {
            self.record_mismatch(
                discipline,
                Mismatch {
                    step,
                    expected,
                    found,
                },
            );
        }
    }

    fn record_mismatch(&mut self, discipline: Discipline, mismatch: Mismatch) {
        if self.flags.rule_out(discipline) {
            debug!(%discipline, %mismatch, "discipline ruled out");
            self.mismatches[discipline.index()] = Some(mismatch);
        }
    }

    fn shadow(&self, discipline: Discipline) -> &dyn ShadowContainer {
        match discipline {
            Discipline::Stack => &self.stack,
            Discipline::Queue => &self.queue,
            Discipline::PriorityQueue => &self.priority,
        }
    }

    fn shadow_mut(&mut self, discipline: Discipline) -> &mut dyn ShadowContainer {
        match discipline {
            Discipline::Stack => &mut self.stack,
            Discipline::Queue => &mut self.queue,
            Discipline::PriorityQueue => &mut self.priority,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify `trace` with a fresh min-key classifier.
#[must_use]
pub fn classify(trace: &Trace) -> ClassificationReport {
    classify_with_order(trace, PriorityOrder::MinKey)
}

/// Classify `trace` with a fresh classifier using `order`.
#[must_use]
pub fn classify_with_order(trace: &Trace, order: PriorityOrder) -> ClassificationReport {
    let mut classifier = Classifier::with_order(order);
    classifier.apply_trace(trace);
    classifier.report()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_of(trace: &Trace) -> Label {
        classify(trace).label
    }

    #[test]
    fn test_empty_trace_is_not_sure() {
        let classifier = Classifier::new();
        assert_eq!(classifier.status(), Label::NotSure);
        assert_eq!(classifier.flags().consistent_count(), 3);
    }

    #[test]
    fn test_insert_only_is_not_sure() {
        let trace = Trace::new().insert(4, 4).insert(1, 9).insert(7, 2);
        let report = classify(&trace);
        assert_eq!(report.label, Label::NotSure);
        assert!(report.verdicts.iter().all(|v| v.consistent));
        assert_eq!(report.removes_count, 0);
    }

    #[test]
    fn test_scenario_queue_and_priority_agree() {
        let trace = Trace::new().insert(1, 1).insert(2, 2).remove(1, 1).remove(2, 2);
        let report = classify(&trace);
        assert_eq!(report.label, Label::NotSure);
        assert!(!report.is_consistent(Discipline::Stack));
        assert!(report.is_consistent(Discipline::Queue));
        assert!(report.is_consistent(Discipline::PriorityQueue));
    }

    #[test]
    fn test_scenario_stack_only() {
        let trace = Trace::new().insert(1, 1).insert(5, 5).remove(5, 5).remove(1, 1);
        assert_eq!(label_of(&trace), Label::Stack);
    }

    #[test]
    fn test_scenario_impossible() {
        let trace = Trace::new().insert(3, 3).insert(1, 1).remove(50, 50).remove(1, 1);
        let report = classify(&trace);
        assert_eq!(report.label, Label::Impossible);
        for verdict in &report.verdicts {
            let m = verdict.mismatch.expect("every discipline fails at step 3");
            assert_eq!(m.step, 3);
            assert_eq!(m.expected, Point::new(50, 50));
        }
    }

    #[test]
    fn test_scenario_remove_past_empty() {
        let trace = Trace::new().insert(2, 3).remove(2, 3).remove(2, 3);
        let report = classify(&trace);
        assert_eq!(report.label, Label::Impossible);
        for verdict in &report.verdicts {
            let m = verdict.mismatch.expect("second remove hits empty shadows");
            assert_eq!(m.step, 3);
            assert_eq!(m.found, None);
        }
    }

    #[test]
    fn test_ruled_out_discipline_does_not_stop_others() {
        // Stack already failed; the queue keeps going and stays consistent.
        let trace = Trace::new()
            .insert(1, 1)
            .insert(2, 2)
            .remove(1, 1)
            .remove(2, 2)
            .insert(9, 9)
            .remove(9, 9);
        let report = classify(&trace);
        assert!(report.is_consistent(Discipline::Queue));
        assert!(!report.is_consistent(Discipline::Stack));
    }

    #[test]
    fn test_single_element_trace_fits_everything() {
        let trace = Trace::new().insert(8, 8).remove(8, 8);
        assert_eq!(label_of(&trace), Label::NotSure);
    }

    #[test]
    fn test_queue_only() {
        let trace = Trace::new().insert(5, 5).insert(1, 1).remove(5, 5);
        assert_eq!(label_of(&trace), Label::Queue);
    }

    #[test]
    fn test_priority_only() {
        let trace = Trace::new()
            .insert(2, 2)
            .insert(1, 1)
            .insert(3, 3)
            .remove(1, 1);
        assert_eq!(label_of(&trace), Label::PriorityQueue);
    }

    #[test]
    fn test_priority_ties_use_insertion_order() {
        // (5, 1) and (1, 5) share key 6; the earlier one leaves first.
        let first = Trace::new().insert(5, 1).insert(1, 5).insert(9, 9).remove(5, 1);
        assert!(classify(&first).is_consistent(Discipline::PriorityQueue));

        let second = Trace::new().insert(5, 1).insert(1, 5).insert(9, 9).remove(1, 5);
        assert!(!classify(&second).is_consistent(Discipline::PriorityQueue));
    }

    #[test]
    fn test_max_key_order() {
        let trace = Trace::new()
            .insert(1, 1)
            .insert(9, 9)
            .insert(4, 4)
            .remove(9, 9);
        assert_eq!(
            classify_with_order(&trace, PriorityOrder::MaxKey).label,
            Label::PriorityQueue
        );
        assert_eq!(
            classify_with_order(&trace, PriorityOrder::MinKey).label,
            Label::Impossible
        );
    }

    #[test]
    fn test_flags_are_monotonic() {
        let trace = Trace::new()
            .insert(1, 1)
            .insert(2, 2)
            .remove(2, 2)
            .remove(1, 1)
            .insert(3, 3)
            .remove(3, 3)
            .remove(7, 7);

        let mut classifier = Classifier::new();
        let mut previous = classifier.flags();
        for op in &trace {
            classifier.apply(*op);
            let current = classifier.flags();
            assert!(current.no_flag_raised_since(&previous));
            previous = current;
        }
    }

    #[test]
    fn test_first_mismatch_is_kept() {
        let trace = Trace::new()
            .insert(1, 1)
            .insert(2, 2)
            .remove(1, 1)
            .remove(9, 9);
        let mut classifier = Classifier::new();
        classifier.apply_trace(&trace);

        let stack = classifier.mismatch(Discipline::Stack).unwrap();
        assert_eq!(stack.step, 3);
        assert_eq!(stack.found, Some(Point::new(2, 2)));

        let queue = classifier.mismatch(Discipline::Queue).unwrap();
        assert_eq!(queue.step, 4);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let trace = Trace::new().insert(1, 1).insert(5, 5).remove(5, 5).remove(1, 1);

        let mut once = Classifier::new();
        once.apply_trace(&Trace::new().insert(4, 4).remove(7, 7));
        once.reset();

        let mut twice = once.clone();
        twice.reset();

        once.apply_trace(&trace);
        twice.apply_trace(&trace);
        assert_eq!(once.report(), twice.report());
        assert_eq!(once.status(), Label::Stack);
    }

    #[test]
    fn test_reset_forgets_previous_trace() {
        let mut classifier = Classifier::new();
        classifier.apply_trace(&Trace::new().insert(1, 1).remove(2, 2));
        assert_eq!(classifier.status(), Label::Impossible);

        classifier.reset();
        assert_eq!(classifier.status(), Label::NotSure);
        assert!(classifier.mismatch(Discipline::Stack).is_none());
        assert_eq!(classifier.shadow_len(Discipline::Queue), 0);
        assert_eq!(classifier.report().operations_count, 0);

        // Leftover (1, 1) must not leak into the next trace.
        classifier.apply_trace(&Trace::new().insert(3, 3).remove(3, 3));
        assert_eq!(classifier.status(), Label::NotSure);
    }

    #[test]
    fn test_shadow_invariants_hold_throughout() {
        let trace = Trace::new()
            .insert(4, 4)
            .insert(1, 2)
            .insert(6, 1)
            .remove(6, 1)
            .remove(4, 4)
            .insert(2, 2)
            .remove(1, 2)
            .remove(2, 2)
            .remove(5, 5);

        let mut classifier = Classifier::new();
        for op in &trace {
            classifier.apply(*op);
            assert!(classifier.sizes_agree());
            assert!(classifier.consistent_contents_agree());
        }
    }

    #[test]
    fn test_mismatching_remove_still_removes_head() {
        // Queue head is (1, 1), not (2, 2); it is dropped anyway, so the
        // following remove of (2, 2) lines up with the queue again.
        let trace = Trace::new()
            .insert(1, 1)
            .insert(2, 2)
            .insert(3, 3)
            .remove(2, 2);
        let mut classifier = Classifier::new();
        classifier.apply_trace(&trace);
        assert!(!classifier.flags().is_consistent(Discipline::Queue));
        assert_eq!(classifier.shadow_len(Discipline::Queue), 2);
        assert!(classifier.sizes_agree());

        classifier.apply(Operation::Remove(Point::new(2, 2)));
        assert_eq!(classifier.mismatch(Discipline::Queue).map(|m| m.step), Some(4));
        assert_eq!(classifier.shadow_len(Discipline::Queue), 1);
    }

    #[test]
    fn test_report_counts() {
        let trace = Trace::new().insert(1, 1).remove(1, 1).insert(2, 2);
        let report = classify(&trace);
        assert_eq!(report.operations_count, 3);
        assert_eq!(report.removes_count, 1);
        assert_eq!(report.verdicts.len(), 3);
    }
}
