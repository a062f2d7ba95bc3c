//! Edge-matched tile grid generation with wave function collapse
//!
//! Tiles are compared along their borders to infer which tiles may sit next
//! to each other in each direction. A grid solver then repeatedly collapses
//! the most constrained cell to a random allowed tile and propagates the
//! consequences to its neighbours, without backtracking.

#![forbid(unsafe_code)]

/// Cell domains, propagation, selection and the grid solver
pub mod algorithm;
/// Edge signatures and adjacency rule inference
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Directions, grid state and tile sets
pub mod spatial;

pub use algorithm::solver::{GridSolver, SolveReport, SolveStatus};
pub use analysis::rules::{AdjacencyRules, RuleBuilder};
pub use io::error::{AlgorithmError, Result};
