//! Edge signature extraction and similarity testing
//!
//! A signature is the sequence of intensity values along one border of a
//! tile. The averaged policy reduces a border to one mean per channel; the
//! exact policy keeps every border pixel (channels interleaved, read
//! left-to-right for horizontal borders and top-to-bottom for vertical ones).

use crate::spatial::direction::Direction;
use crate::spatial::tiles::{Tile, to_grayscale};
use clap::ValueEnum;
use ndarray::{Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// How a border is reduced to a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// One mean value per channel across the whole border
    #[default]
    Averaged,
    /// Every border pixel verbatim
    Exact,
}

/// Which values are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    /// Compare each colour channel separately
    #[default]
    PerChannel,
    /// Reduce pixels to luma first
    Grayscale,
}

/// Directional fingerprint of a tile border
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSignature {
    values: Vec<f64>,
}

impl EdgeSignature {
    /// Wrap raw signature values
    pub const fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Signature values in border order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the signature holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extracts edge signatures under a fixed policy
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeExtractor {
    policy: EdgePolicy,
    channels: ChannelMode,
}

impl EdgeExtractor {
    /// Create an extractor
    pub const fn new(policy: EdgePolicy, channels: ChannelMode) -> Self {
        Self { policy, channels }
    }

    /// Configured extraction policy
    pub const fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Configured channel mode
    pub const fn channel_mode(&self) -> ChannelMode {
        self.channels
    }

    /// Signature of one side of a tile
    pub fn signature(&self, tile: &Tile, direction: Direction) -> EdgeSignature {
        if tile.raster().is_empty() {
            return EdgeSignature::new(Vec::new());
        }

        let raster: Array3<f64> = match self.channels {
            ChannelMode::PerChannel => tile.raster().mapv(f64::from),
            ChannelMode::Grayscale => to_grayscale(&tile.raster().view()),
        };

        let border = border_view(&raster, direction);
        let values = match self.policy {
            EdgePolicy::Exact => border.iter().copied().collect(),
            EdgePolicy::Averaged => border
                .mean_axis(Axis(0))
                .map(|means| means.to_vec())
                .unwrap_or_default(),
        };

        EdgeSignature::new(values)
    }
}

/// Border pixels as (position along the border, channel)
fn border_view(raster: &Array3<f64>, direction: Direction) -> ArrayView2<'_, f64> {
    let (rows, cols, _) = raster.dim();
    match direction {
        Direction::Top => raster.index_axis(Axis(0), 0),
        Direction::Bottom => raster.index_axis(Axis(0), rows.saturating_sub(1)),
        Direction::Left => raster.index_axis(Axis(1), 0),
        Direction::Right => raster.index_axis(Axis(1), cols.saturating_sub(1)),
    }
}

/// Whether two signatures match within `tolerance`
///
/// Holds iff both have the same length and every pairwise absolute
/// difference is at most `tolerance`. Signatures of different lengths never
/// match.
pub fn is_similar(a: &EdgeSignature, b: &EdgeSignature, tolerance: f64) -> bool {
    a.len() == b.len()
        && a.values
            .iter()
            .zip(&b.values)
            .all(|(x, y)| (x - y).abs() <= tolerance)
}
