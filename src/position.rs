//! Cursor positions and bounding boxes in rendered source text.
//!
//! Lines and columns are 1-indexed. Columns count characters (Unicode scalar
//! values), not bytes. Both fields are signed because subtraction and
//! negation are part of the arithmetic and produce transient values below 1.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A line and column in rendered source text.
///
/// Ordering is line-major: `(2, 1) > (1, 80)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: i64,
    pub column: i64,
}

impl Position {
    pub fn new(line: i64, column: i64) -> Self {
        Self { line, column }
    }

    /// The position before any text has been consumed: `(1, 1)`.
    pub fn start() -> Self {
        Self::new(1, 1)
    }

    /// (3, 10) -> (3, 11)
    pub fn advance_columns(&mut self, columns: i64) {
        self.column += columns;
    }

    /// (3, 10) -> (4, 1)
    pub fn advance_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// (3, 10) -> (3, 9)
    #[must_use]
    pub fn left(&self) -> Self {
        Self::new(self.line, self.column - 1)
    }

    /// (3, 10) -> (3, 11)
    #[must_use]
    pub fn right(&self) -> Self {
        Self::new(self.line, self.column + 1)
    }

    /// True when neither field is negative.
    pub fn is_non_negative(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }

    pub fn to_tuple(&self) -> (i64, i64) {
        (self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<(i64, i64)> for Position {
    fn from((line, column): (i64, i64)) -> Self {
        Self::new(line, column)
    }
}

impl From<Position> for (i64, i64) {
    fn from(pos: Position) -> Self {
        pos.to_tuple()
    }
}

impl Add for Position {
    type Output = Position;

    /// (1, 1) + (1, 1) -> (2, 2)
    fn add(self, other: Position) -> Position {
        Position::new(self.line + other.line, self.column + other.column)
    }
}

impl Add<(i64, i64)> for Position {
    type Output = Position;

    fn add(self, (line, column): (i64, i64)) -> Position {
        self + Position::new(line, column)
    }
}

impl Sub for Position {
    type Output = Position;

    /// (1, 1) - (1, 1) -> (0, 0)
    fn sub(self, other: Position) -> Position {
        Position::new(self.line - other.line, self.column - other.column)
    }
}

impl Sub<(i64, i64)> for Position {
    type Output = Position;

    fn sub(self, (line, column): (i64, i64)) -> Position {
        self - Position::new(line, column)
    }
}

impl Neg for Position {
    type Output = Position;

    /// (1, -1) -> (-1, 1)
    fn neg(self) -> Position {
        Position::new(-self.line, -self.column)
    }
}

impl PartialEq<(i64, i64)> for Position {
    fn eq(&self, other: &(i64, i64)) -> bool {
        self.to_tuple() == *other
    }
}

impl PartialOrd<(i64, i64)> for Position {
    fn partial_cmp(&self, other: &(i64, i64)) -> Option<Ordering> {
        Some(self.to_tuple().cmp(other))
    }
}

/// Compares against `[line, column]`. Slices of any other length are
/// simply unequal.
impl PartialEq<[i64]> for Position {
    fn eq(&self, other: &[i64]) -> bool {
        match other {
            [line, column] => self.line == *line && self.column == *column,
            _ => false,
        }
    }
}

/// Line-major ordering against `[line, column]`. Slices of any other length
/// are unordered, so every comparison with them is false.
impl PartialOrd<[i64]> for Position {
    fn partial_cmp(&self, other: &[i64]) -> Option<Ordering> {
        match other {
            [line, column] => Some(self.to_tuple().cmp(&(*line, *column))),
            _ => None,
        }
    }
}

/// Inclusive span of a node's rendered text.
///
/// `bottom_right` is the position of the last character, not the one after
/// it. An empty node has `top_left == bottom_right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: Position,
    pub bottom_right: Position,
}

impl BoundingBox {
    pub fn new(top_left: Position, bottom_right: Position) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Number of lines the box touches.
    pub fn line_span(&self) -> i64 {
        self.bottom_right.line - self.top_left.line + 1
    }

    /// Whether `pos` lies inside the box, treating it as a text range rather
    /// than a rectangle (middle lines are covered completely).
    pub fn contains(&self, pos: Position) -> bool {
        self.top_left <= pos && pos <= self.bottom_right
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.top_left, self.bottom_right)
    }
}
