//! Tile rasters, tile set validation and sheet slicing
//!
//! A tile set is an ordered collection of equal-size square rasters. The
//! position of a tile in the set is its identity throughout rule building
//! and solving. Sheets can be sliced into tiles with optional rotations,
//! dropping pieces that are identical once reduced to grayscale.

use crate::io::error::{AlgorithmError, Result};
use ndarray::{Array3, ArrayView3, Axis, Slice};
use std::collections::HashSet;

/// A single tile raster, laid out as (row, column, channel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    name: String,
    raster: Array3<u8>,
}

impl Tile {
    /// Wrap a raster with a display name
    pub const fn new(name: String, raster: Array3<u8>) -> Self {
        Self { name, raster }
    }

    /// Display name, usually the source file stem
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel data as (row, column, channel)
    pub const fn raster(&self) -> &Array3<u8> {
        &self.raster
    }

    /// Side length in pixels (tiles are square once part of a set)
    pub fn size(&self) -> usize {
        self.raster.dim().0
    }

    /// Number of channels per pixel
    pub fn channels(&self) -> usize {
        self.raster.dim().2
    }
}

/// Ordered, validated collection of equal-size square tiles
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<Tile>,
    tile_size: usize,
}

impl TileSet {
    /// Validate tiles and build a set
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than `min_tiles` tiles are given (or none at all)
    /// - Any raster is not square, is empty or has an unsupported channel count
    /// - Rasters differ in size or channel count
    pub fn new(tiles: Vec<Tile>, min_tiles: usize) -> Result<Self> {
        let Some(first) = tiles.first() else {
            return Err(AlgorithmError::InvalidTileSet {
                tile: None,
                reason: "tile set is empty".to_string(),
            });
        };

        if tiles.len() < min_tiles {
            return Err(AlgorithmError::InvalidTileSet {
                tile: None,
                reason: format!(
                    "found {} tiles, at least {min_tiles} required",
                    tiles.len()
                ),
            });
        }

        let (rows, cols, channels) = first.raster.dim();
        for tile in &tiles {
            let (tile_rows, tile_cols, tile_channels) = tile.raster.dim();
            let reason = if tile_rows != tile_cols {
                Some(format!("raster is {tile_cols}x{tile_rows}, tiles must be square"))
            } else if tile_rows == 0 {
                Some("raster is empty".to_string())
            } else if !(1..=4).contains(&tile_channels) {
                Some(format!("{tile_channels} channels, expected 1 to 4"))
            } else if tile_rows != rows || tile_cols != cols {
                Some(format!(
                    "raster is {tile_cols}x{tile_rows}, other tiles are {cols}x{rows}"
                ))
            } else if tile_channels != channels {
                Some(format!(
                    "{tile_channels} channels, other tiles have {channels}"
                ))
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(AlgorithmError::InvalidTileSet {
                    tile: Some(tile.name.clone()),
                    reason,
                });
            }
        }

        Ok(Self {
            tiles,
            tile_size: rows,
        })
    }

    /// Slice a square sheet into `divisions`×`divisions` tiles
    ///
    /// Pieces are taken row-major; with `include_rotations` each piece is
    /// followed by its 90°, 180° and 270° counter-clockwise rotations.
    /// Pieces identical in grayscale to an earlier piece are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet is not square, `divisions` is zero or
    /// the sheet size is not divisible by `divisions`
    pub fn from_sheet(
        sheet: &Array3<u8>,
        divisions: usize,
        include_rotations: bool,
    ) -> Result<Self> {
        let (height, width, _) = sheet.dim();
        if width != height {
            return Err(AlgorithmError::InvalidTileSet {
                tile: None,
                reason: format!("sheet is {width}x{height}, it must be square"),
            });
        }
        if divisions == 0 || width % divisions != 0 {
            return Err(crate::io::error::invalid_parameter(
                "divisions",
                &divisions,
                &format!("sheet size {width} is not divisible into that many pieces"),
            ));
        }

        let cell = width / divisions;
        let variants = if include_rotations {
            &["a", "b", "c", "d"][..]
        } else {
            &["a"][..]
        };

        let mut pieces = Vec::new();
        let mut counter = 1;
        for row in 0..divisions {
            for col in 0..divisions {
                let piece = sheet
                    .slice_axis(Axis(0), Slice::from(row * cell..(row + 1) * cell))
                    .slice_axis(Axis(1), Slice::from(col * cell..(col + 1) * cell))
                    .to_owned();

                let mut current = piece;
                for variant in variants {
                    pieces.push(Tile::new(format!("i{counter:02}{variant}"), current.clone()));
                    current = rotate_counter_clockwise(&current.view());
                }
                counter += 1;
            }
        }

        Self::new(deduplicate_tiles(pieces), 1)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set has no tiles (never true for a validated set)
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Side length of every tile in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Tile by index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// All tiles in index order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate tiles in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }
}

/// Rotate a raster 90° counter-clockwise
pub fn rotate_counter_clockwise(raster: &ArrayView3<'_, u8>) -> Array3<u8> {
    let mut rotated = raster.view().permuted_axes([1, 0, 2]);
    rotated.invert_axis(Axis(0));
    rotated.as_standard_layout().into_owned()
}

/// Reduce a raster to a single luma channel (ITU-R 601 weights)
///
/// One- and two-channel rasters keep their first channel.
pub fn to_grayscale(raster: &ArrayView3<'_, u8>) -> Array3<f64> {
    let (rows, cols, channels) = raster.dim();
    Array3::from_shape_fn((rows, cols, 1), |(row, col, _)| {
        let channel = |c: usize| f64::from(raster.get((row, col, c)).copied().unwrap_or(0));
        if channels >= 3 {
            0.299f64.mul_add(channel(0), 0.587f64.mul_add(channel(1), 0.114 * channel(2)))
        } else {
            channel(0)
        }
    })
}

fn deduplicate_tiles(tiles: Vec<Tile>) -> Vec<Tile> {
    let mut seen = HashSet::new();
    let mut unique_tiles = Vec::new();

    for tile in tiles {
        let key: Vec<u8> = to_grayscale(&tile.raster.view())
            .iter()
            .map(|&luma| luma.round() as u8)
            .collect();

        if seen.insert(key) {
            unique_tiles.push(tile);
        }
    }

    unique_tiles
}
