//! Consistency flags and the label derived from them.

use std::fmt;
use std::str::FromStr;

use crate::discipline::Discipline;
use crate::error::NameError;

/// Per-discipline consistency flags for the current trace.
///
/// Flags only ever go from `true` to `false`. There is no way to set a
/// single flag back to `true`; only [`Flags::all_consistent`] (used by
/// reset) starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    bits: [bool; 3],
}

impl Flags {
    /// Every discipline still plausible.
    #[must_use]
    pub const fn all_consistent() -> Self {
        Self { bits: [true; 3] }
    }

    /// Whether `discipline` is still consistent with the trace.
    #[must_use]
    pub fn is_consistent(&self, discipline: Discipline) -> bool {
        self.bits[discipline.index()]
    }

    /// Rule out `discipline`. Returns `true` if it was consistent before.
    pub fn rule_out(&mut self, discipline: Discipline) -> bool {
        let slot = &mut self.bits[discipline.index()];
        let was = *slot;
        *slot = false;
        was
    }

    /// Number of disciplines still consistent.
    #[must_use]
    pub fn consistent_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Disciplines still consistent, in reporting order.
    pub fn consistent(&self) -> impl Iterator<Item = Discipline> + '_ {
        Discipline::ALL
            .into_iter()
            .filter(move |d| self.is_consistent(*d))
    }

    /// Whether every flag set in `self` is also set in `earlier`.
    ///
    /// Holds for any later snapshot of the same trace.
    #[must_use]
    pub fn no_flag_raised_since(&self, earlier: &Flags) -> bool {
        Discipline::ALL
            .iter()
            .all(|&d| !self.is_consistent(d) || earlier.is_consistent(d))
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::all_consistent()
    }
}

/// Classification of a whole trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    #[cfg_attr(feature = "serde", serde(rename = "stack"))]
    Stack,
    #[cfg_attr(feature = "serde", serde(rename = "queue"))]
    Queue,
    #[cfg_attr(feature = "serde", serde(rename = "priority queue"))]
    PriorityQueue,
    /// Two or more disciplines fit
    #[cfg_attr(feature = "serde", serde(rename = "not sure"))]
    NotSure,
    /// No discipline fits
    #[cfg_attr(feature = "serde", serde(rename = "impossible"))]
    Impossible,
}

impl Label {
    /// Derive the label by counting consistent disciplines.
    #[must_use]
    pub fn from_flags(flags: &Flags) -> Self {
        match flags.consistent_count() {
            0 => Label::Impossible,
            1 => flags
                .consistent()
                .next()
                .map_or(Label::Impossible, Label::only),
            _ => Label::NotSure,
        }
    }

    /// Label for a trace that fits exactly `discipline`.
    #[must_use]
    pub fn only(discipline: Discipline) -> Self {
        match discipline {
            Discipline::Stack => Label::Stack,
            Discipline::Queue => Label::Queue,
            Discipline::PriorityQueue => Label::PriorityQueue,
        }
    }

    /// The single discipline this label names, if any.
    #[must_use]
    pub fn discipline(&self) -> Option<Discipline> {
        match self {
            Label::Stack => Some(Discipline::Stack),
            Label::Queue => Some(Discipline::Queue),
            Label::PriorityQueue => Some(Discipline::PriorityQueue),
            Label::NotSure | Label::Impossible => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Stack => "stack",
            Label::Queue => "queue",
            Label::PriorityQueue => "priority queue",
            Label::NotSure => "not sure",
            Label::Impossible => "impossible",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stack" => Ok(Label::Stack),
            "queue" => Ok(Label::Queue),
            "priority queue" => Ok(Label::PriorityQueue),
            "not sure" => Ok(Label::NotSure),
            "impossible" => Ok(Label::Impossible),
            _ => Err(NameError::new("label", s)),
        }
    }
}
