//! Spatial data structures for the tile grid
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and per-direction tables
//! - Grid state and snapshots
//! - Tile rasters and tile set construction

/// Cardinal directions and per-direction lookup tables
pub mod direction;
/// Grid state management and read-only snapshots
pub mod grid;
/// Tile rasters, validation and sheet slicing
pub mod tiles;

pub use direction::Direction;
pub use grid::{Grid, GridSnapshot, Position};
pub use tiles::{Tile, TileSet};
