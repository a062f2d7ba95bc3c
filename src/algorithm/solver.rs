use crate::{
    algorithm::bitset::TileBitset,
    algorithm::observer::SolveObserver,
    algorithm::propagation::{ConstraintTable, PropagationStats, propagate},
    algorithm::selection::{RandomSelector, lowest_entropy_cells},
    analysis::rules::AdjacencyRules,
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{AlgorithmError, Contradiction, Result, invalid_parameter},
    spatial::grid::{Grid, GridSnapshot, Position},
};
use rand::{Rng, rngs::StdRng};

/// One collapse decision: which cell was chosen and which tile it received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseRecord {
    /// Cell that was collapsed
    pub position: Position,
    /// Tile chosen for that cell
    pub tile: usize,
}

/// Result of a single collapse step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and constraints were propagated
    Collapsed(CollapseRecord),
    /// No undecided cells remain
    Complete,
}

/// How a solve run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every cell is decided
    Complete,
    /// The observer requested cancellation before the grid was decided
    Cancelled,
    /// The step budget ran out with undecided cells left
    Incomplete,
}

/// Summary of a solve run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// How the run ended
    pub status: SolveStatus,
    /// Collapse steps performed during this run
    pub steps: usize,
    /// Cells still undecided at the end
    pub undecided: usize,
}

/// Wave function collapse solver over a fixed-size grid
///
/// Owns the grid, the compiled rule table and the random generator. Cells
/// are collapsed lowest-entropy first with uniform random tie-breaking, and
/// every collapse is followed by a full propagation sweep. The solver never
/// backtracks: a contradiction aborts the operation, restores the grid to
/// its state before that operation and reports the failing cell.
pub struct GridSolver<R = StdRng> {
    grid: Grid,
    constraints: ConstraintTable,
    selector: RandomSelector<R>,
    history: Vec<CollapseRecord>,
}

impl GridSolver<StdRng> {
    /// Create a solver whose generator is seeded with `seed`
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`GridSolver::new`]
    pub fn seeded(
        width: usize,
        height: usize,
        rules: &AdjacencyRules,
        seed: u64,
    ) -> Result<Self> {
        Self::with_selector(width, height, rules, RandomSelector::new(seed))
    }
}

impl<R: Rng> GridSolver<R> {
    /// Create a solver drawing randomness from `rng`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either grid dimension is zero or exceeds the maximum
    /// - The rule table is empty or references tiles it does not describe
    pub fn new(width: usize, height: usize, rules: &AdjacencyRules, rng: R) -> Result<Self> {
        Self::with_selector(width, height, rules, RandomSelector::from_rng(rng))
    }

    fn with_selector(
        width: usize,
        height: usize,
        rules: &AdjacencyRules,
        selector: RandomSelector<R>,
    ) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let tile_count = rules.tile_count();
        if tile_count == 0 {
            return Err(AlgorithmError::InvalidTileSet {
                tile: None,
                reason: "rule table describes no tiles".to_string(),
            });
        }
        rules.check_tile_count(tile_count)?;

        Ok(Self {
            grid: Grid::new(width, height, tile_count),
            constraints: ConstraintTable::from_rules(rules),
            selector,
            history: Vec::new(),
        })
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read-only view of decided tiles
    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    /// Collapse decisions made so far, in order
    pub fn history(&self) -> &[CollapseRecord] {
        &self.history
    }

    /// Number of tiles in play
    pub const fn tile_count(&self) -> usize {
        self.constraints.tile_count()
    }

    /// Hand the grid over once solving is done
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Force a cell to a single tile, then propagate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position lies outside the grid
    /// - The tile index is not in the tile set
    /// - Propagation empties a cell (the grid is left as before the call)
    pub fn preset(&mut self, x: usize, y: usize, tile: usize) -> Result<()> {
        let position = Position::new(x, y);
        if !self.grid.contains(position) {
            return Err(AlgorithmError::OutOfBounds {
                position,
                dimensions: (self.grid.width(), self.grid.height()),
            });
        }
        if tile >= self.tile_count() {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                tile_count: self.tile_count(),
            });
        }

        let backup = self.grid.clone();
        if let Some(domain) = self.grid.domain_mut(position) {
            *domain = TileBitset::single(tile, self.constraints.tile_count());
        }
        self.sweep(backup)?;

        tracing::debug!(x, y, tile, "preset cell");
        Ok(())
    }

    /// Run one full propagation sweep
    ///
    /// # Errors
    ///
    /// Returns a contradiction if a cell would be emptied; the grid is left
    /// as before the call
    pub fn propagate(&mut self) -> Result<PropagationStats> {
        let backup = self.grid.clone();
        self.sweep(backup)
    }

    /// Collapse one lowest-entropy cell and propagate
    ///
    /// # Errors
    ///
    /// Returns a contradiction if the chosen cell has no candidates or
    /// propagation empties a cell; the grid is left as before the call
    pub fn collapse_step(&mut self) -> Result<StepOutcome> {
        let candidates = lowest_entropy_cells(&self.grid);
        let Some(position) = self.selector.choose(&candidates) else {
            return Ok(StepOutcome::Complete);
        };

        let backup = self.grid.clone();
        let tile = self.collapse_cell(position)?;
        let stats = self.sweep(backup)?;

        let record = CollapseRecord { position, tile };
        self.history.push(record);
        tracing::debug!(
            x = position.x,
            y = position.y,
            tile,
            candidates = candidates.len(),
            narrowed = stats.narrowed,
            "collapsed cell"
        );

        Ok(StepOutcome::Collapsed(record))
    }

    /// Solve without a presenter
    ///
    /// # Errors
    ///
    /// Returns a contradiction if any step empties a cell
    pub fn solve(&mut self) -> Result<SolveReport> {
        self.solve_with(&mut ())
    }

    /// Collapse cells until the grid is decided, notifying `observer` after every step
    ///
    /// One propagation sweep runs first so cells that are already decided
    /// constrain their neighbours. At most width × height steps are taken.
    ///
    /// # Errors
    ///
    /// Returns a contradiction if any step empties a cell. The grid is left
    /// at its last valid state and the error carries a snapshot of it; the
    /// observer still receives `on_finish` with that state.
    pub fn solve_with<O: SolveObserver + ?Sized>(&mut self, observer: &mut O) -> Result<SolveReport> {
        let result = self.run(observer);
        if let Err(error) = &result {
            if let AlgorithmError::Contradiction(details) = error {
                tracing::warn!(
                    x = details.position.x,
                    y = details.position.y,
                    "solve stopped at a contradiction"
                );
            }
            observer.on_finish(&self.grid.snapshot());
        }
        result
    }

    fn run<O: SolveObserver + ?Sized>(&mut self, observer: &mut O) -> Result<SolveReport> {
        self.propagate()?;

        let step_limit = self.grid.width() * self.grid.height();
        let mut steps = 0;
        let mut cancelled = false;

        for _ in 0..step_limit {
            if observer.should_cancel() {
                cancelled = true;
                break;
            }

            match self.collapse_step()? {
                StepOutcome::Complete => break,
                StepOutcome::Collapsed(record) => {
                    steps += 1;
                    observer.on_step(&self.grid.snapshot(), &record);
                }
            }
        }

        observer.on_finish(&self.grid.snapshot());

        let undecided = self.grid.undecided().len();
        let status = if undecided == 0 {
            SolveStatus::Complete
        } else if cancelled {
            SolveStatus::Cancelled
        } else {
            SolveStatus::Incomplete
        };

        Ok(SolveReport {
            status,
            steps,
            undecided,
        })
    }

    /// Replace a cell's domain with one tile drawn uniformly from it
    fn collapse_cell(&mut self, position: Position) -> Result<usize> {
        let tile_count = self.constraints.tile_count();
        let candidates = self
            .grid
            .domain(position)
            .map(TileBitset::to_vec)
            .ok_or(AlgorithmError::OutOfBounds {
                position,
                dimensions: (self.grid.width(), self.grid.height()),
            })?;

        let Some(tile) = self.selector.choose(&candidates) else {
            return Err(AlgorithmError::Contradiction(Box::new(Contradiction {
                position,
                origin: None,
                direction: None,
                tile: None,
                domain: Vec::new(),
                allowed: Vec::new(),
                snapshot: Some(self.grid.snapshot()),
            })));
        };

        if let Some(domain) = self.grid.domain_mut(position) {
            *domain = TileBitset::single(tile, tile_count);
        }
        Ok(tile)
    }

    /// Propagate, restoring `backup` if a contradiction occurs
    fn sweep(&mut self, backup: Grid) -> Result<PropagationStats> {
        match propagate(&mut self.grid, &self.constraints) {
            Ok(stats) => Ok(stats),
            Err(mut error) => {
                if let AlgorithmError::Contradiction(details) = &mut error {
                    details.snapshot = Some(backup.snapshot());
                }
                self.grid = backup;
                Err(error)
            }
        }
    }
}
