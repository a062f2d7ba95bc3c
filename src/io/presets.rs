//! Preset plans for fixing tiles before solving
//!
//! A plan is a YAML list applied in file order:
//!
//! ```yaml
//! - cell: { x: 2, y: 2, tile: 0 }
//! - border: { tile: 3 }
//! - mask:
//!     x: 1
//!     y: 1
//!     tile: 5
//!     rows:
//!       - ".#."
//!       - "###"
//! ```

use crate::algorithm::solver::GridSolver;
use crate::io::error::{AlgorithmError, Result, WithContext};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stencil character marking a preset cell in a mask
pub const MASK_MARK: char = '#';

/// One instruction of a preset plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetEntry {
    /// A single cell
    Cell {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Tile index
        tile: usize,
    },
    /// Every cell on the grid boundary
    Border {
        /// Tile index
        tile: usize,
    },
    /// Text stencil anchored at (x, y)
    Mask {
        /// Column of the stencil's first character
        x: usize,
        /// Row of the stencil's first line
        y: usize,
        /// Tile index for marked cells
        tile: usize,
        /// Stencil lines; `#` marks a preset cell
        rows: Vec<String>,
    },
}

impl PresetEntry {
    /// Placements produced by this entry on a `width` × `height` grid
    pub fn placements(&self, width: usize, height: usize) -> Vec<(usize, usize, usize)> {
        match self {
            Self::Cell { x, y, tile } => vec![(*x, *y, *tile)],
            Self::Border { tile } => border_positions(width, height)
                .into_iter()
                .map(|(x, y)| (x, y, *tile))
                .collect(),
            Self::Mask { x, y, tile, rows } => rows
                .iter()
                .enumerate()
                .flat_map(|(dy, row)| {
                    row.chars()
                        .enumerate()
                        .filter(|&(_, c)| c == MASK_MARK)
                        .map(move |(dx, _)| (x + dx, y + dy, *tile))
                })
                .collect(),
        }
    }
}

/// Boundary cells clockwise from (0, 0), each listed once
pub fn border_positions(width: usize, height: usize) -> Vec<(usize, usize)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let right = width - 1;
    let bottom = height - 1;

    let mut positions: Vec<(usize, usize)> = (0..width).map(|x| (x, 0)).collect();
    positions.extend((1..height).map(|y| (right, y)));
    if bottom > 0 {
        positions.extend((0..right).rev().map(|x| (x, bottom)));
    }
    if right > 0 {
        positions.extend((1..bottom).rev().map(|y| (0, y)));
    }
    positions
}

/// Ordered list of preset entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetPlan {
    entries: Vec<PresetEntry>,
}

impl PresetPlan {
    /// Create a plan from entries
    pub const fn new(entries: Vec<PresetEntry>) -> Self {
        Self { entries }
    }

    /// Parse a plan from YAML text
    ///
    /// # Errors
    ///
    /// Returns a rule format error if the text is not a valid plan
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read a plan from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read presets",
            source: e,
        })?;

        Self::from_yaml_str(&text).with_path(path)
    }

    /// Entries in file order
    pub fn entries(&self) -> &[PresetEntry] {
        &self.entries
    }

    /// Whether the plan has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All placements in file order
    pub fn expand(&self, width: usize, height: usize) -> Vec<(usize, usize, usize)> {
        self.entries
            .iter()
            .flat_map(|entry| entry.placements(width, height))
            .collect()
    }

    /// Apply every placement through the solver's preset operation
    ///
    /// Returns the number of placements applied.
    ///
    /// # Errors
    ///
    /// Stops at the first placement the solver rejects and returns its error;
    /// earlier placements stay applied
    pub fn apply_to<R: Rng>(&self, solver: &mut GridSolver<R>) -> Result<usize> {
        let width = solver.grid().width();
        let height = solver.grid().height();
        let placements = self.expand(width, height);

        for &(x, y, tile) in &placements {
            solver.preset(x, y, tile)?;
        }

        tracing::info!(placements = placements.len(), "applied presets");
        Ok(placements.len())
    }
}
