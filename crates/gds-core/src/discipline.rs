//! The three removal disciplines under test.

use std::fmt;
use std::str::FromStr;

use crate::error::NameError;

/// A removal ordering: LIFO, FIFO or min-key.
///
/// Declaration order is the order verdicts are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Discipline {
    Stack,
    Queue,
    PriorityQueue,
}

impl Discipline {
    /// All disciplines, in reporting order.
    pub const ALL: [Discipline; 3] = [
        Discipline::Stack,
        Discipline::Queue,
        Discipline::PriorityQueue,
    ];

    /// Position of this discipline in [`Discipline::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Discipline::Stack => 0,
            Discipline::Queue => 1,
            Discipline::PriorityQueue => 2,
        }
    }

    /// Name as printed in labels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Discipline::Stack => "stack",
            Discipline::Queue => "queue",
            Discipline::PriorityQueue => "priority queue",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Discipline {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stack" | "lifo" => Ok(Discipline::Stack),
            "queue" | "fifo" => Ok(Discipline::Queue),
            "priority queue" | "priority-queue" | "priority_queue" | "priority" | "pq" => {
                Ok(Discipline::PriorityQueue)
            }
            _ => Err(NameError::new("discipline", s)),
        }
    }
}

/// Which end of the key order the priority container serves first.
///
/// Equal keys always leave in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriorityOrder {
    /// Smallest coordinate sum first
    #[default]
    MinKey,
    /// Largest coordinate sum first
    MaxKey,
}

impl PriorityOrder {
    /// Rank used by the min-heap: smaller rank leaves first.
    #[must_use]
    pub fn rank(self, key: i64) -> i64 {
        match self {
            PriorityOrder::MinKey => key,
            PriorityOrder::MaxKey => -key,
        }
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityOrder::MinKey => f.write_str("min"),
            PriorityOrder::MaxKey => f.write_str("max"),
        }
    }
}

impl FromStr for PriorityOrder {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" | "min-key" | "min_key" | "lowest" => Ok(PriorityOrder::MinKey),
            "max" | "max-key" | "max_key" | "highest" => Ok(PriorityOrder::MaxKey),
            _ => Err(NameError::new("priority order", s)),
        }
    }
}
