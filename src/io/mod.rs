//! File formats, command line and presentation around the solver

/// Command-line parsing and command execution
pub mod cli;
/// Constants and validated generation parameters
pub mod configuration;
/// Crate error type and helpers
pub mod error;
/// Tile loading and grid image export
pub mod image;
/// YAML preset plans applied before solving
pub mod presets;
/// Progress bar presenter
pub mod progress;
/// YAML rule table persistence
pub mod rule_store;
/// Animated GIF capture of solve steps
pub mod visualization;
