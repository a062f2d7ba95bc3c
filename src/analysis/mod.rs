//! Adjacency inference from tile rasters

/// Edge signature extraction and similarity testing
pub mod edges;
/// Adjacency rule table and the builder that infers it
pub mod rules;
