//! Generation constants and runtime configuration defaults

use crate::analysis::edges::{ChannelMode, EdgeExtractor, EdgePolicy};
use crate::analysis::rules::RuleBuilder;
use crate::io::error::{Result, invalid_parameter};

/// Side length tiles are resized to, in pixels
pub const DEFAULT_TILE_SIZE: u32 = 64;

/// Default grid width and height in cells
pub const DEFAULT_GRID_SIZE: usize = 8;

// Lower than an exact-pixel tolerance would be, since averaging smooths noise
/// Maximum per-value difference for two edges to match
pub const DEFAULT_TOLERANCE: f64 = 15.0;

/// Largest meaningful tolerance for 8-bit channels
pub const MAX_TOLERANCE: f64 = 255.0;

/// Smallest tile set accepted by default
pub const DEFAULT_MIN_TILES: usize = 1;

/// Tile count below which a warning is emitted
pub const RECOMMENDED_MIN_TILES: usize = 9;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Maximum allowed tile side length in pixels
pub const MAX_TILE_SIZE: u32 = 4096;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Default rule file name
pub const DEFAULT_RULES_FILE: &str = "rules.yaml";
/// Default directory for generated images
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Prefix of generated image file names
pub const OUTPUT_PREFIX: &str = "wfc_";
/// Local-time stamp appended to generated image names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%y%m%d_%H%M";
/// Largest side, in pixels, of a composed grid image
pub const MAX_CANVAS_DIMENSION: usize = 16_384;
/// Fill colour for cells without a decided tile
pub const BACKGROUND_COLOR: [u8; 3] = [50, 50, 50];
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 100;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// How many frame delays the final GIF frame is held for
pub const FINAL_FRAME_HOLD: u32 = 20;

/// Every tunable parameter of rule building and solving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Side length tiles are resized to (1..=4096)
    pub tile_size: u32,
    /// Grid width in cells (1..=10 000)
    pub grid_width: usize,
    /// Grid height in cells (1..=10 000)
    pub grid_height: usize,
    /// Edge matching tolerance (0..=255)
    pub tolerance: f64,
    /// Edge signature policy
    pub edge_policy: EdgePolicy,
    /// Whether edges are compared per channel or in grayscale
    pub channel_mode: ChannelMode,
    /// Smallest acceptable tile count (at least 1)
    pub min_tiles: usize,
    /// Random seed
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            edge_policy: EdgePolicy::default(),
            channel_mode: ChannelMode::default(),
            min_tiles: DEFAULT_MIN_TILES,
            seed: DEFAULT_SEED,
        }
    }
}

impl GenerationConfig {
    /// Check every parameter against its valid range
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first value out of range
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 || self.tile_size > MAX_TILE_SIZE {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("must be between 1 and {MAX_TILE_SIZE}"),
            ));
        }

        for (parameter, value) in [
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
        ] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if !self.tolerance.is_finite() || !(0.0..=MAX_TOLERANCE).contains(&self.tolerance) {
            return Err(invalid_parameter(
                "tolerance",
                &self.tolerance,
                &format!("must be a number between 0 and {MAX_TOLERANCE}"),
            ));
        }

        if self.min_tiles == 0 {
            return Err(invalid_parameter(
                "min_tiles",
                &self.min_tiles,
                &"at least one tile is required",
            ));
        }

        Ok(())
    }

    /// Check the composed grid image fits within the canvas limit
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the grid at the configured tile
    /// size would be wider or taller than the maximum canvas dimension
    pub fn validate_canvas(&self) -> Result<()> {
        let tile_size = self.tile_size as usize;
        for (parameter, cells) in [
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
        ] {
            if cells.saturating_mul(tile_size) > MAX_CANVAS_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &cells,
                    &format!(
                        "{cells} cells of {tile_size} px exceed the {MAX_CANVAS_DIMENSION} px image limit"
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Rule builder for the configured edge policy and tolerance
    pub const fn rule_builder(&self) -> RuleBuilder {
        RuleBuilder::new(
            EdgeExtractor::new(self.edge_policy, self.channel_mode),
            self.tolerance,
        )
    }
}
