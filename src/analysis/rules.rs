//! Adjacency rule inference from tile edges
//!
//! Every ordered tile pair (A, B), including A = B, is tested once per
//! direction: B is allowed on side `d` of A when A's `d` edge matches B's
//! opposite edge. Pairs are tested independently, so the resulting table is
//! not necessarily symmetric. Lists are ordered by ascending tile index.

use crate::analysis::edges::{EdgeExtractor, EdgeSignature, is_similar};
use crate::io::error::{Result, rule_load_error};
use crate::spatial::direction::{Direction, DirectionTable};
use crate::spatial::tiles::TileSet;

/// Per-tile lists of tiles allowed next to it in each direction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjacencyRules {
    entries: Vec<DirectionTable<Vec<usize>>>,
}

impl AdjacencyRules {
    /// Build a table from per-tile direction lists, indexed by tile
    pub const fn new(entries: Vec<DirectionTable<Vec<usize>>>) -> Self {
        Self { entries }
    }

    /// Table where every tile may sit next to every tile in every direction
    pub fn fully_connected(tile_count: usize) -> Self {
        let all: Vec<usize> = (0..tile_count).collect();
        Self::new(vec![DirectionTable::from_fn(|_| all.clone()); tile_count])
    }

    /// Table with no allowed neighbours at all
    pub fn empty(tile_count: usize) -> Self {
        Self::new(vec![DirectionTable::default(); tile_count])
    }

    /// Number of tiles described
    pub fn tile_count(&self) -> usize {
        self.entries.len()
    }

    /// Tiles allowed on `direction` of `tile`
    pub fn allowed(&self, tile: usize, direction: Direction) -> &[usize] {
        self.entries
            .get(tile)
            .map_or(&[][..], |entry| entry.get(direction).as_slice())
    }

    /// Per-tile entries in index order
    pub fn entries(&self) -> &[DirectionTable<Vec<usize>>] {
        &self.entries
    }

    /// Tiles with no allowed neighbour in any direction
    pub fn isolated_tiles(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.iter().all(|(_, list)| list.is_empty()))
            .map(|(tile, _)| tile)
            .collect()
    }

    /// Check the table describes exactly `tile_count` tiles and only references them
    ///
    /// # Errors
    ///
    /// Returns a rule load error if the entry count differs from `tile_count`
    /// or any list references an index outside `0..tile_count`
    pub fn check_tile_count(&self, tile_count: usize) -> Result<()> {
        if self.entries.len() != tile_count {
            return Err(rule_load_error(&format!(
                "rules describe {} tiles but the tile set has {tile_count}",
                self.entries.len()
            )));
        }

        for (tile, entry) in self.entries.iter().enumerate() {
            for (direction, list) in entry.iter() {
                if let Some(&bad) = list.iter().find(|&&index| index >= tile_count) {
                    return Err(rule_load_error(&format!(
                        "tile {tile} lists tile {bad} on its {direction} side, only {tile_count} tiles exist"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Infers adjacency rules by comparing edge signatures
#[derive(Debug, Clone, Copy)]
pub struct RuleBuilder {
    extractor: EdgeExtractor,
    tolerance: f64,
}

impl RuleBuilder {
    /// Create a builder with an extraction policy and matching tolerance
    pub const fn new(extractor: EdgeExtractor, tolerance: f64) -> Self {
        Self {
            extractor,
            tolerance,
        }
    }

    /// Matching tolerance
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compute all four signatures of every tile, in tile order
    pub fn signatures(&self, tiles: &TileSet) -> Vec<DirectionTable<EdgeSignature>> {
        tiles
            .iter()
            .map(|tile| DirectionTable::from_fn(|direction| self.extractor.signature(tile, direction)))
            .collect()
    }

    /// Test every ordered tile pair in every direction
    pub fn build(&self, tiles: &TileSet) -> AdjacencyRules {
        let signatures = self.signatures(tiles);

        let entries: Vec<DirectionTable<Vec<usize>>> = signatures
            .iter()
            .map(|own| {
                DirectionTable::from_fn(|direction| {
                    let edge = own.get(direction);
                    signatures
                        .iter()
                        .enumerate()
                        .filter(|(_, other)| {
                            is_similar(edge, other.get(direction.opposite()), self.tolerance)
                        })
                        .map(|(index, _)| index)
                        .collect()
                })
            })
            .collect();

        let rules = AdjacencyRules::new(entries);
        let links: usize = rules
            .entries()
            .iter()
            .map(|entry| entry.iter().map(|(_, list)| list.len()).sum::<usize>())
            .sum();
        tracing::debug!(
            tiles = tiles.len(),
            links,
            tolerance = self.tolerance,
            "built adjacency rules"
        );

        rules
    }
}
