use crate::{
    algorithm::bitset::TileBitset,
    analysis::rules::AdjacencyRules,
    io::error::{AlgorithmError, Contradiction, Result},
    spatial::direction::{Direction, DirectionTable},
    spatial::grid::Grid,
};

/// Rule table compiled into bitsets for fast domain intersection
#[derive(Debug, Clone)]
pub struct ConstraintTable {
    allowed: Vec<DirectionTable<TileBitset>>,
    tile_count: usize,
}

impl ConstraintTable {
    /// Compile adjacency rules; out-of-range indices are dropped
    pub fn from_rules(rules: &AdjacencyRules) -> Self {
        let tile_count = rules.tile_count();
        let allowed = rules
            .entries()
            .iter()
            .map(|entry| entry.map(|_, list| TileBitset::from_indices(list, tile_count)))
            .collect();

        Self {
            allowed,
            tile_count,
        }
    }

    /// Number of tiles the table covers
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles allowed on `direction` of `tile`
    pub fn allowed(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.allowed.get(tile).map(|entry| entry.get(direction))
    }
}

/// Counters describing one propagation sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Decided cells whose constraints were applied
    pub sources: usize,
    /// Neighbour domains that lost at least one tile
    pub narrowed: usize,
}

/// Apply constraints from every decided cell to its four neighbours
///
/// A single row-major sweep: each cell whose domain holds exactly one tile
/// when visited intersects its top, bottom, left and right neighbours with
/// the tiles allowed in that direction. Cells decided earlier in the same
/// sweep are visited with their new domain; constraints from cells decided
/// after their visit are applied by the next sweep. Re-running the sweep over
/// unchanged decided cells changes nothing.
///
/// # Errors
///
/// Returns a contradiction if an intersection would leave a neighbour with
/// no tiles. The failing neighbour keeps its previous domain; cells visited
/// earlier in the sweep keep their narrowed domains.
pub fn propagate(grid: &mut Grid, constraints: &ConstraintTable) -> Result<PropagationStats> {
    let mut stats = PropagationStats::default();

    for position in grid.positions() {
        let Some(tile) = grid.domain(position).and_then(TileBitset::single_tile) else {
            continue;
        };
        stats.sources += 1;

        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(position, direction) else {
                continue;
            };
            let Some(allowed) = constraints.allowed(tile, direction) else {
                continue;
            };
            let Some(domain) = grid.domain_mut(neighbor) else {
                continue;
            };

            let narrowed = domain.intersection(allowed);
            if narrowed.is_empty() {
                return Err(AlgorithmError::Contradiction(Box::new(Contradiction {
                    position: neighbor,
                    origin: Some(position),
                    direction: Some(direction),
                    tile: Some(tile),
                    domain: domain.to_vec(),
                    allowed: allowed.to_vec(),
                    snapshot: None,
                })));
            }

            if narrowed.count() < domain.count() {
                stats.narrowed += 1;
                *domain = narrowed;
            }
        }
    }

    Ok(stats)
}
