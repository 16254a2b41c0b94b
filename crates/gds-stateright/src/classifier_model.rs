//! Stateright model for the discipline classifier.
//!
//! Every state is a trace over a small alphabet of points, up to a
//! bounded length. Exploring the model enumerates every such trace,
//! including removes on empty containers, and checks the classifier
//! against a naive reference replay.

use gds_core::{Classifier, Flags, Label, Operation, Point, PriorityOrder, Trace};
use stateright::{Model, Property};

/// State of the model: a trace and what the classifier made of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceState {
    /// Operations applied so far
    pub trace: Trace,
    /// Classifier flags after the whole trace
    pub flags: Flags,
    /// Classifier flags before the last operation
    pub parent_flags: Flags,
    /// Classifier label after the whole trace
    pub label: Label,
    /// All shadows held the same number of points
    pub sizes_agree: bool,
    /// Still-consistent shadows held the same points
    pub contents_agree: bool,
}

impl TraceState {
    /// The empty trace.
    pub fn initial() -> Self {
        Self {
            trace: Trace::new(),
            flags: Flags::all_consistent(),
            parent_flags: Flags::all_consistent(),
            label: Label::NotSure,
            sizes_agree: true,
            contents_agree: true,
        }
    }

    /// State after appending `operation`, replaying the trace from scratch.
    pub fn extended(&self, operation: Operation, order: PriorityOrder) -> Self {
        let mut trace = self.trace.clone();
        trace.operations.push(operation);

        let mut classifier = Classifier::with_order(order);
        classifier.apply_trace(&trace);

        Self {
            flags: classifier.flags(),
            parent_flags: self.flags,
            label: classifier.status(),
            sizes_agree: classifier.sizes_agree(),
            contents_agree: classifier.consistent_contents_agree(),
            trace,
        }
    }
}

/// Label computed by a direct replay over plain vectors.
///
/// Shares nothing with the classifier but the `Point` type: each
/// discipline keeps `(insertion index, point)` pairs and picks its
/// head by scanning.
pub fn reference_label(trace: &Trace, order: PriorityOrder) -> Label {
    let mut consistent = [true; 3];
    let mut pools: [Vec<(usize, Point)>; 3] = Default::default();

    for (index, operation) in trace.iter().enumerate() {
        match *operation {
            Operation::Insert(point) => {
                for pool in &mut pools {
                    pool.push((index, point));
                }
            }
            Operation::Remove(expected) => {
                for (slot, pool) in pools.iter_mut().enumerate() {
                    let head = match slot {
                        0 => pool.len().checked_sub(1),
                        1 => (!pool.is_empty()).then_some(0),
                        _ => priority_head(pool, order),
                    };
                    match head {
                        Some(at) => {
                            let (_, found) = pool.remove(at);
                            if found != expected {
                                consistent[slot] = false;
                            }
                        }
                        None => consistent[slot] = false,
                    }
                }
            }
        }
    }

    match consistent {
        [true, false, false] => Label::Stack,
        [false, true, false] => Label::Queue,
        [false, false, true] => Label::PriorityQueue,
        [false, false, false] => Label::Impossible,
        _ => Label::NotSure,
    }
}

/// Position of the entry with the best key, earliest insertion on ties.
fn priority_head(pool: &[(usize, Point)], order: PriorityOrder) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (at, (index, point)) in pool.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => {
                let (best_index, best_point) = pool[b];
                let key = i64::from(point.x) + i64::from(point.y);
                let best_key = i64::from(best_point.x) + i64::from(best_point.y);
                let strictly = match order {
                    PriorityOrder::MinKey => key < best_key,
                    PriorityOrder::MaxKey => key > best_key,
                };
                strictly || (key == best_key && *index < best_index)
            }
        };
        if better {
            best = Some(at);
        }
    }
    best
}

/// Model enumerating bounded traces over `alphabet`.
pub struct ClassifierModel {
    pub alphabet: Vec<Point>,
    pub operations_max: usize,
    pub priority_order: PriorityOrder,
}

impl ClassifierModel {
    pub fn new(alphabet: Vec<Point>, operations_max: usize) -> Self {
        debug_assert!(!alphabet.is_empty());
        debug_assert!(operations_max <= 8, "Model checking long traces is slow");

        Self {
            alphabet,
            operations_max,
            priority_order: PriorityOrder::MinKey,
        }
    }

    pub fn with_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }
}

impl Model for ClassifierModel {
    type State = TraceState;
    type Action = Operation;

    fn init_states(&self) -> Vec<Self::State> {
        vec![TraceState::initial()]
    }

    fn actions(&self, state: &Self::State, actions: &mut Vec<Self::Action>) {
        if state.trace.len() >= self.operations_max {
            return;
        }
        for &point in &self.alphabet {
            actions.push(Operation::Insert(point));
            actions.push(Operation::Remove(point));
        }
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Option<Self::State> {
        Some(state.extended(action, self.priority_order))
    }

    fn properties(&self) -> Vec<Property<Self>> {
        vec![
            Property::always("LabelMatchesReference", |model: &Self, state: &Self::State| {
                state.label == reference_label(&state.trace, model.priority_order)
            }),
            Property::always("FlagsMonotonic", |_model: &Self, state: &Self::State| {
                state.flags.no_flag_raised_since(&state.parent_flags)
            }),
            Property::always("ShadowSizesAgree", |_model: &Self, state: &Self::State| {
                state.sizes_agree
            }),
            Property::always("ConsistentContentsAgree", |_model: &Self, state: &Self::State| {
                state.contents_agree
            }),
            Property::sometimes("ReachesStack", |_model: &Self, state: &Self::State| {
                state.label == Label::Stack
            }),
            Property::sometimes("ReachesQueue", |_model: &Self, state: &Self::State| {
                state.label == Label::Queue
            }),
            Property::sometimes("ReachesPriorityQueue", |_model: &Self, state: &Self::State| {
                state.label == Label::PriorityQueue
            }),
            Property::sometimes("ReachesNotSure", |_model: &Self, state: &Self::State| {
                state.label == Label::NotSure
            }),
            Property::sometimes("ReachesImpossible", |_model: &Self, state: &Self::State| {
                state.label == Label::Impossible
            }),
        ]
    }
}
