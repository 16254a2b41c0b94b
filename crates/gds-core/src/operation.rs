//! Operations and traces.
//!
//! A trace is the ordered list of operations making up one test case.
//! Remove operations carry the value the trace *claims* was removed; the
//! classifier compares that claim against each discipline's head.

use std::fmt;

use crate::point::Point;

/// A single insert or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", content = "point", rename_all = "lowercase"))]
pub enum Operation {
    /// Push the point into every container.
    Insert(Point),
    /// The point the trace expects to be removed next.
    Remove(Point),
}

/// Kind of an operation, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Insert,
    Remove,
}

impl OpKind {
    /// Numeric method code used by the text input format.
    #[must_use]
    pub fn method_code(self) -> u8 {
        match self {
            OpKind::Insert => 1,
            OpKind::Remove => 2,
        }
    }

    /// Inverse of [`OpKind::method_code`].
    #[must_use]
    pub fn from_method_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(OpKind::Insert),
            2 => Some(OpKind::Remove),
            _ => None,
        }
    }
}

impl Operation {
    #[must_use]
    pub fn new(kind: OpKind, point: Point) -> Self {
        match kind {
            OpKind::Insert => Operation::Insert(point),
            OpKind::Remove => Operation::Remove(point),
        }
    }

    #[must_use]
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Insert(_) => OpKind::Insert,
            Operation::Remove(_) => OpKind::Remove,
        }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        match self {
            Operation::Insert(p) | Operation::Remove(p) => *p,
        }
    }
}

impl fmt::Display for Operation {
    /// Renders in the text input format: `method x y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.point();
        write!(f, "{} {} {}", self.kind().method_code(), p.x, p.y)
    }
}

/// Ordered sequence of operations for one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    /// Operations in the order they were observed
    pub operations: Vec<Operation>,
}

impl Trace {
    /// Create a new empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Create an empty trace with room for `capacity` operations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Record an insert.
    pub fn record_insert(&mut self, point: Point) {
        self.operations.push(Operation::Insert(point));
    }

    /// Record a remove with its expected value.
    pub fn record_remove(&mut self, expected: Point) {
        self.operations.push(Operation::Remove(expected));
    }

    /// Builder form of [`Trace::record_insert`].
    #[must_use]
    pub fn insert(mut self, x: i32, y: i32) -> Self {
        self.record_insert(Point::new(x, y));
        self
    }

    /// Builder form of [`Trace::record_remove`].
    #[must_use]
    pub fn remove(mut self, x: i32, y: i32) -> Self {
        self.record_remove(Point::new(x, y));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of remove operations.
    #[must_use]
    pub fn removes_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.kind() == OpKind::Remove)
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }
}

impl FromIterator<Operation> for Trace {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
