//! # Positions Along the Span
//!
//! Beam demands and results are reported at three design positions: the left
//! support, midspan and the right support. [`PerPosition`] holds exactly one
//! value per position so that a missing or extra entry cannot be expressed.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Design position along the span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Middle,
    Right,
}

impl Position {
    /// All positions, left to right
    pub const ALL: [Position; 3] = [Position::Left, Position::Middle, Position::Right];

    /// Lowercase key used in reports ("left", "middle", "right")
    pub fn key(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Middle => "middle",
            Position::Right => "right",
        }
    }

    /// Support positions carry the tighter link spacing
    pub fn is_support(&self) -> bool {
        !matches!(self, Position::Middle)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One value for each of the left, middle and right positions.
///
/// ## JSON Example
///
/// ```json
/// { "left": 1979.0, "middle": 703.0, "right": 1979.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerPosition<T> {
    pub left: T,
    pub middle: T,
    pub right: T,
}

impl<T> PerPosition<T> {
    pub fn new(left: T, middle: T, right: T) -> Self {
        PerPosition { left, middle, right }
    }

    /// Build by evaluating `f` at each position, left to right
    pub fn from_fn(mut f: impl FnMut(Position) -> T) -> Self {
        let left = f(Position::Left);
        let middle = f(Position::Middle);
        let right = f(Position::Right);
        PerPosition { left, middle, right }
    }

    pub fn get(&self, position: Position) -> &T {
        match position {
            Position::Left => &self.left,
            Position::Middle => &self.middle,
            Position::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, position: Position) -> &mut T {
        match position {
            Position::Left => &mut self.left,
            Position::Middle => &mut self.middle,
            Position::Right => &mut self.right,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerPosition<U> {
        PerPosition {
            left: f(&self.left),
            middle: f(&self.middle),
            right: f(&self.right),
        }
    }

    /// Iterate `(position, value)` pairs, left to right
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        [&self.left, &self.middle, &self.right].into_iter()
    }
}

impl PerPosition<f64> {
    /// Largest of the three values
    pub fn max_value(&self) -> f64 {
        self.left.max(self.middle).max(self.right)
    }

    pub fn sum(&self) -> f64 {
        self.left + self.middle + self.right
    }
}

impl<T: Clone> PerPosition<T> {
    /// Build from a list that must hold exactly three entries (left, middle, right)
    pub fn from_slice(values: &[T]) -> Option<Self> {
        match values {
            [left, middle, right] => Some(PerPosition::new(left.clone(), middle.clone(), right.clone())),
            _ => None,
        }
    }
}

impl<T> Index<Position> for PerPosition<T> {
    type Output = T;
    fn index(&self, position: Position) -> &T {
        self.get(position)
    }
}

impl<T> IndexMut<Position> for PerPosition<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        self.get_mut(position)
    }
}
