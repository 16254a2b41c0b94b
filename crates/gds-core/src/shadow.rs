//! Shadow containers: one model container per discipline.
//!
//! Every insert goes into all three shadows, so they always hold the
//! same number of points. Only the order in which they give points back
//! differs.
//!
//! | Discipline | Container | Head |
//! |------------|-----------|------|
//! | Stack | `Vec` | last pushed |
//! | Queue | `VecDeque` | first pushed |
//! | PriorityQueue | `BinaryHeap` | lowest rank, then earliest pushed |

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::discipline::{Discipline, PriorityOrder};
use crate::point::Point;

/// A container that serves points in one discipline's order.
///
/// `peek` and `pop` return `None` on an empty container; callers decide
/// what an empty read means.
pub trait ShadowContainer {
    /// Discipline this container models.
    fn discipline(&self) -> Discipline;

    /// Add a point.
    fn push(&mut self, point: Point);

    /// The point that would be removed next.
    fn peek(&self) -> Option<Point>;

    /// Remove and return the head.
    fn pop(&mut self) -> Option<Point>;

    /// Number of points held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all points.
    fn clear(&mut self);

    /// Points held, sorted, for multiset comparison.
    fn sorted_contents(&self) -> Vec<Point>;
}

/// Last-in-first-out shadow.
#[derive(Debug, Clone, Default)]
pub struct StackShadow {
    items: Vec<Point>,
}

impl StackShadow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShadowContainer for StackShadow {
    fn discipline(&self) -> Discipline {
        Discipline::Stack
    }

    fn push(&mut self, point: Point) {
        self.items.push(point);
    }

    fn peek(&self) -> Option<Point> {
        self.items.last().copied()
    }

    fn pop(&mut self) -> Option<Point> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn sorted_contents(&self) -> Vec<Point> {
        let mut contents = self.items.clone();
        contents.sort_unstable();
        contents
    }
}

/// First-in-first-out shadow.
#[derive(Debug, Clone, Default)]
pub struct QueueShadow {
    items: VecDeque<Point>,
}

impl QueueShadow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShadowContainer for QueueShadow {
    fn discipline(&self) -> Discipline {
        Discipline::Queue
    }

    fn push(&mut self, point: Point) {
        self.items.push_back(point);
    }

    fn peek(&self) -> Option<Point> {
        self.items.front().copied()
    }

    fn pop(&mut self) -> Option<Point> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn sorted_contents(&self) -> Vec<Point> {
        let mut contents: Vec<Point> = self.items.iter().copied().collect();
        contents.sort_unstable();
        contents
    }
}

/// Heap entry. Field order drives the derived `Ord`: rank first, then
/// insertion sequence, so equal keys leave in insertion order. `seq` is
/// unique per push, so `point` never decides a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Ranked {
    rank: i64,
    seq: u64,
    point: Point,
}

/// Key-ordered shadow keyed by [`Point::priority_key`].
#[derive(Debug, Clone, Default)]
pub struct PriorityShadow {
    heap: BinaryHeap<Reverse<Ranked>>,
    order: PriorityOrder,
    seq_next: u64,
}

impl PriorityShadow {
    #[must_use]
    pub fn new(order: PriorityOrder) -> Self {
        Self {
            heap: BinaryHeap::new(),
            order,
            seq_next: 0,
        }
    }

    #[must_use]
    pub fn order(&self) -> PriorityOrder {
        self.order
    }
}

impl ShadowContainer for PriorityShadow {
    fn discipline(&self) -> Discipline {
        Discipline::PriorityQueue
    }

    fn push(&mut self, point: Point) {
        let entry = Ranked {
            rank: self.order.rank(point.priority_key()),
            seq: self.seq_next,
            point,
        };
        self.seq_next += 1;
        self.heap.push(Reverse(entry));
    }

    fn peek(&self) -> Option<Point> {
        self.heap.peek().map(|Reverse(entry)| entry.point)
    }

    fn pop(&mut self) -> Option<Point> {
        self.heap.pop().map(|Reverse(entry)| entry.point)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq_next = 0;
    }

    fn sorted_contents(&self) -> Vec<Point> {
        let mut contents: Vec<Point> = self.heap.iter().map(|Reverse(e)| e.point).collect();
        contents.sort_unstable();
        contents
    }
}

/// Build the shadow for `discipline`.
#[must_use]
pub fn shadow_for(discipline: Discipline, order: PriorityOrder) -> Box<dyn ShadowContainer> {
    match discipline {
        Discipline::Stack => Box::new(StackShadow::new()),
        Discipline::Queue => Box::new(QueueShadow::new()),
        Discipline::PriorityQueue => Box::new(PriorityShadow::new(order)),
    }
}
