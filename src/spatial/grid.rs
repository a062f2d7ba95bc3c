//! Grid of cell domains and read-only snapshots of it
//!
//! Cells are stored in a row-major `Array2` indexed `[y, x]`, so iteration
//! order is top-to-bottom, left-to-right. Every domain starts full and only
//! ever shrinks while a solve runs.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Direction;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinates, x across and y down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Position {
    /// Create a position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    const fn index(self) -> [usize; 2] {
        [self.y, self.x]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// W×H array of cell domains
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<TileBitset>,
    tile_count: usize,
}

impl Grid {
    /// Create a grid where every cell may still hold any tile
    pub fn new(width: usize, height: usize, tile_count: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), TileBitset::all(tile_count)),
            tile_count,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of tiles each domain draws from
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Whether the position lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width() && position.y < self.height()
    }

    /// Domain at a position
    pub fn domain(&self, position: Position) -> Option<&TileBitset> {
        self.cells.get(position.index())
    }

    /// Mutable domain at a position
    pub fn domain_mut(&mut self, position: Position) -> Option<&mut TileBitset> {
        self.cells.get_mut(position.index())
    }

    /// Neighbouring position in a direction, if it lies inside the grid
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.x.checked_add_signed(dx)?;
        let y = position.y.checked_add_signed(dy)?;
        let neighbor = Position::new(x, y);
        self.contains(neighbor).then_some(neighbor)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Positions whose domain still holds more than one tile, in row-major order
    pub fn undecided(&self) -> Vec<Position> {
        self.cells
            .indexed_iter()
            .filter(|(_, domain)| domain.count() > 1)
            .map(|((y, x), _)| Position::new(x, y))
            .collect()
    }

    /// Sum of all domain sizes
    pub fn total_domain_size(&self) -> usize {
        self.cells.iter().map(TileBitset::count).sum()
    }

    /// Whether no cell has more than one candidate left
    pub fn is_fully_decided(&self) -> bool {
        self.cells.iter().all(|domain| domain.count() <= 1)
    }

    /// Read-only view of decided tiles
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.map(TileBitset::single_tile),
        }
    }
}

/// Decided tile per cell, `None` for undecided (or contradictory) cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: Array2<Option<usize>>,
}

impl GridSnapshot {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Decided tile at a position
    pub fn get(&self, position: Position) -> Option<usize> {
        self.cells.get(position.index()).copied().flatten()
    }

    /// Count of decided cells
    pub fn decided_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Count of cells without a decided tile
    pub fn undecided_count(&self) -> usize {
        self.cells.len() - self.decided_count()
    }

    /// Iterate (position, decided tile) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<usize>)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| (Position::new(x, y), *cell))
    }
}
