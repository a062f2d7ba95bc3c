//! Cardinal directions and per-direction lookup tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a tile, or the direction from a cell to one of its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards row 0
    Top,
    /// Towards the last row
    Bottom,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// All four directions in table order
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The facing side of the neighbouring tile
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Grid step as (dx, dy), with y growing downwards
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Top => (0, -1),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Lowercase name as used in rule files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per direction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionTable<T> {
    values: [T; 4],
}

impl<T> DirectionTable<T> {
    /// Build a table by evaluating `f` for every direction in table order
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            values: Direction::ALL.map(&mut f),
        }
    }

    /// Value for a direction
    pub fn get(&self, direction: Direction) -> &T {
        let [top, bottom, left, right] = &self.values;
        match direction {
            Direction::Top => top,
            Direction::Bottom => bottom,
            Direction::Left => left,
            Direction::Right => right,
        }
    }

    /// Mutable value for a direction
    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        let [top, bottom, left, right] = &mut self.values;
        match direction {
            Direction::Top => top,
            Direction::Bottom => bottom,
            Direction::Left => left,
            Direction::Right => right,
        }
    }

    /// Iterate (direction, value) pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.values.iter())
    }

    /// Transform every value
    pub fn map<U>(&self, mut f: impl FnMut(Direction, &T) -> U) -> DirectionTable<U> {
        DirectionTable::from_fn(|direction| f(direction, self.get(direction)))
    }
}
