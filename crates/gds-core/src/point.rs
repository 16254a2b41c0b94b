//! Points carried by insert and remove operations.

use std::fmt;

/// Smallest coordinate allowed by the input contract.
pub const COORDINATE_MIN: i32 = 1;

/// Largest coordinate allowed by the input contract.
pub const COORDINATE_MAX: i32 = 100;

/// An ordered pair of coordinates.
///
/// Equality is componentwise. The classifier never relies on the
/// `[COORDINATE_MIN, COORDINATE_MAX]` bound; only the driver enforces it
/// when asked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Priority key: the sum of both coordinates.
    ///
    /// Widened to `i64` so no pair of `i32` values can overflow.
    #[must_use]
    pub fn priority_key(&self) -> i64 {
        i64::from(self.x) + i64::from(self.y)
    }

    /// Whether both coordinates lie within the input contract bounds.
    #[must_use]
    pub fn within_bounds(&self) -> bool {
        let range = COORDINATE_MIN..=COORDINATE_MAX;
        range.contains(&self.x) && range.contains(&self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
