use crate::spatial::grid::{Grid, Position};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Every choice draws exactly one value from the generator, so a fixed seed
/// and a fixed sequence of calls yield a fixed sequence of results.
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap an existing generator
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniformly random index below `len`, or None when `len` is zero
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly random element of `items`
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        let index = self.uniform_index(items.len())?;
        items.get(index).copied()
    }
}

/// Undecided cells sharing the smallest domain size, in row-major order
///
/// Undecided means more than one candidate tile. The domain size stands in
/// for entropy: fewer candidates means less uncertainty and higher priority.
pub fn lowest_entropy_cells(grid: &Grid) -> Vec<Position> {
    let sized: Vec<(Position, usize)> = grid
        .undecided()
        .into_iter()
        .filter_map(|position| grid.domain(position).map(|domain| (position, domain.count())))
        .collect();

    let Some(minimum) = sized.iter().map(|&(_, size)| size).min() else {
        return Vec::new();
    };

    sized
        .into_iter()
        .filter(|&(_, size)| size == minimum)
        .map(|(position, _)| position)
        .collect()
}
