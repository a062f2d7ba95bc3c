//! Error types and context management for tile generation operations

use crate::spatial::direction::Direction;
use crate::spatial::grid::{GridSnapshot, Position};
use std::fmt;
use std::path::{Path, PathBuf};

/// Coarse classification of failures, used to decide whether a caller may retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameters or tile set, detected before any solving
    Configuration,
    /// Rule file missing, malformed or inconsistent with the tile set
    RuleLoad,
    /// A cell ran out of candidate tiles during solving
    Contradiction,
    /// Preset coordinates or tile index outside the valid range
    Bounds,
    /// File system or image codec failure
    Io,
}

/// Diagnostic record of a cell whose domain became empty
#[derive(Debug, Clone)]
pub struct Contradiction {
    /// Cell whose domain became empty
    pub position: Position,
    /// Decided cell whose constraint emptied the domain (None for a direct collapse)
    pub origin: Option<Position>,
    /// Direction from `origin` to `position`
    pub direction: Option<Direction>,
    /// Tile decided at `origin`
    pub tile: Option<usize>,
    /// Domain of `position` before the failing intersection
    pub domain: Vec<usize>,
    /// Tiles the rule table allowed in `direction` of `tile`
    pub allowed: Vec<usize>,
    /// Last valid grid state before the failing operation
    pub snapshot: Option<GridSnapshot>,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} has no remaining tiles", self.position)?;
        if let (Some(origin), Some(direction), Some(tile)) = (self.origin, self.direction, self.tile)
        {
            write!(
                f,
                " (tile {tile} at {origin} allows {:?} to its {direction}, domain was {:?})",
                self.allowed, self.domain
            )?;
        }
        Ok(())
    }
}

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Tile rasters do not form a usable tile set
    InvalidTileSet {
        /// Name of the offending tile, when a single tile is at fault
        tile: Option<String>,
        /// Description of what's wrong with the tile set
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Rule table is missing or inconsistent with the tile set
    RuleLoad {
        /// Rule file involved, if any
        path: Option<PathBuf>,
        /// Description of the problem
        reason: String,
    },

    /// Rule file could not be parsed or written
    RuleFormat {
        /// Rule file involved, if any
        path: Option<PathBuf>,
        /// Underlying YAML error
        source: serde_yaml::Error,
    },

    /// A cell domain became empty during solving
    Contradiction(Box<Contradiction>),

    /// Grid coordinates outside the grid
    OutOfBounds {
        /// Requested position
        position: Position,
        /// Grid dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// Tile index exceeds available tile set
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the set
        tile_count: usize,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl AlgorithmError {
    /// Classify the error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTileSet { .. } | Self::InvalidParameter { .. } => ErrorKind::Configuration,
            Self::RuleLoad { .. } | Self::RuleFormat { .. } => ErrorKind::RuleLoad,
            Self::Contradiction(_) => ErrorKind::Contradiction,
            Self::OutOfBounds { .. } | Self::InvalidTileIndex { .. } => ErrorKind::Bounds,
            Self::ImageLoad { .. } | Self::ImageExport { .. } | Self::FileSystem { .. } => {
                ErrorKind::Io
            }
        }
    }

    /// Contradiction details, if this is a contradiction
    pub fn contradiction(&self) -> Option<&Contradiction> {
        match self {
            Self::Contradiction(details) => Some(details.as_ref()),
            _ => None,
        }
    }
}

fn display_optional_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "<memory>".to_string(), |p| p.display().to_string())
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidTileSet { tile, reason } => match tile {
                Some(name) => write!(f, "Invalid tile set (tile '{name}'): {reason}"),
                None => write!(f, "Invalid tile set: {reason}"),
            },
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::RuleLoad { path, reason } => {
                write!(
                    f,
                    "Failed to load rules from '{}': {reason}",
                    display_optional_path(path.as_ref())
                )
            }
            Self::RuleFormat { path, source } => {
                write!(
                    f,
                    "Malformed rule file '{}': {source}",
                    display_optional_path(path.as_ref())
                )
            }
            Self::Contradiction(details) => write!(f, "Contradiction: {details}"),
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position {position} is outside the {}x{} grid",
                    dimensions.0, dimensions.1
                )
            }
            Self::InvalidTileIndex { index, tile_count } => {
                write!(
                    f,
                    "Tile index {index} is out of bounds (tile count: {tile_count})"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::RuleFormat { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Attaches a file path to errors raised without one
pub trait WithContext<T> {
    /// Record the path involved in the failing operation
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only variants that describe a file benefit from the path
            match &mut error {
                AlgorithmError::RuleLoad { path: slot, .. }
                | AlgorithmError::RuleFormat { path: slot, .. } => {
                    if slot.is_none() {
                        *slot = Some(path.to_path_buf());
                    }
                }
                AlgorithmError::FileSystem { path: slot, .. }
                | AlgorithmError::ImageLoad { path: slot, .. } => {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for AlgorithmError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::RuleFormat {
            path: None,
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a rule load error without a path
pub fn rule_load_error(reason: &(impl ToString + ?Sized)) -> AlgorithmError {
    AlgorithmError::RuleLoad {
        path: None,
        reason: reason.to_string(),
    }
}
