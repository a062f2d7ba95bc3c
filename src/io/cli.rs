//! Command-line interface for splitting sheets, building rules and generating grids

use crate::algorithm::solver::{GridSolver, SolveReport, SolveStatus};
use crate::analysis::edges::{ChannelMode, EdgePolicy};
use crate::analysis::rules::AdjacencyRules;
use crate::io::configuration::{
    DEFAULT_GRID_SIZE, DEFAULT_MIN_TILES, DEFAULT_OUTPUT_DIR, DEFAULT_RULES_FILE, DEFAULT_SEED,
    DEFAULT_TILE_SIZE, DEFAULT_TOLERANCE, GIF_FRAME_DELAY_MS, GenerationConfig,
    RECOMMENDED_MIN_TILES,
};
use crate::io::error::Result;
use crate::io::image::{
    export_grid_as_png, load_raster, load_tile_directory, save_tile_set, timestamped_output_path,
};
use crate::io::presets::PresetPlan;
use crate::io::progress::GenerationProgress;
use crate::io::rule_store;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::tiles::{Tile, TileSet};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Command-line arguments for the tile generation tool
#[derive(Debug, Parser)]
#[command(name = "edgetile")]
#[command(
    author,
    version,
    about = "Generate tile grids from edge-matched adjacency rules"
)]
pub struct Cli {
    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report every collapse step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::WARN
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Available operations
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Slice a square sheet into tiles with optional rotations
    Split(SplitArgs),
    /// Build an adjacency rule table from a tile directory
    Rules(RulesArgs),
    /// Solve a grid and export it as an image
    Generate(GenerateArgs),
}

/// Arguments of the `split` command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Square source image
    #[arg(value_name = "SHEET")]
    pub sheet: PathBuf,

    /// Pieces per side
    #[arg(short, long)]
    pub divisions: usize,

    /// Directory receiving the tiles
    #[arg(short, long)]
    pub out: PathBuf,

    /// Skip the 90°, 180° and 270° rotations
    #[arg(long)]
    pub no_rotate: bool,
}

/// Arguments of the `rules` command
#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Directory of PNG tiles
    #[arg(value_name = "TILE_DIR")]
    pub tile_dir: PathBuf,

    /// Rule file to write (defaults to rules.yaml inside the tile directory)
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Maximum per-value difference for two edges to match
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// How edges are reduced to signatures
    #[arg(short, long, value_enum, default_value_t = EdgePolicy::Averaged)]
    pub policy: EdgePolicy,

    /// Compare edges in grayscale instead of per channel
    #[arg(short, long)]
    pub grayscale: bool,

    /// Side length tiles are resized to before comparison
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Smallest acceptable number of tiles
    #[arg(long, default_value_t = DEFAULT_MIN_TILES)]
    pub min_tiles: usize,
}

/// Arguments of the `generate` command
#[derive(Debug, Args)]
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Directory of PNG tiles
    #[arg(value_name = "TILE_DIR")]
    pub tile_dir: PathBuf,

    /// Rule file to read (defaults to rules.yaml inside the tile directory)
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Write an empty rule table when the rule file is missing
    #[arg(long)]
    pub create_rules: bool,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_SIZE)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_SIZE)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// YAML preset plan applied before solving
    #[arg(short, long)]
    pub presets: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out: PathBuf,

    /// Also export an animated GIF of every step
    #[arg(long)]
    pub visualize: bool,

    /// Delay between GIF frames in milliseconds
    #[arg(long, default_value_t = GIF_FRAME_DELAY_MS)]
    pub frame_delay: u32,

    /// Side length tiles are resized to
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,
}

/// Files written by a successful `generate` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    /// Composited grid image
    pub image: PathBuf,
    /// Animation, when requested
    pub animation: Option<PathBuf>,
    /// Solve summary
    pub report: SolveReport,
}

/// Executes a parsed command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Split(args) => split(args).map(|_| ()),
            Command::Rules(args) => build_rules(args).map(|_| ()),
            Command::Generate(args) => generate(args, self.cli.quiet).map(|_| ()),
        }
    }
}

fn rules_path(tile_dir: &Path, explicit: Option<&PathBuf>) -> PathBuf {
    explicit.map_or_else(|| tile_dir.join(DEFAULT_RULES_FILE), Clone::clone)
}

fn warn_small_tile_set(tiles: &TileSet) {
    if tiles.len() < RECOMMENDED_MIN_TILES {
        tracing::warn!(
            tiles = tiles.len(),
            recommended = RECOMMENDED_MIN_TILES,
            "tile set is smaller than recommended"
        );
    }
}

fn warn_isolated_tiles(rules: &AdjacencyRules, tiles: &TileSet) {
    for index in rules.isolated_tiles() {
        let name = tiles.get(index).map_or("?", Tile::name);
        tracing::warn!(tile = index, name, "tile has no allowed neighbour in any direction");
    }
}

/// Slice a sheet and save the pieces, returning the written paths
///
/// # Errors
///
/// Returns an error if the sheet cannot be loaded or sliced, or a tile cannot be saved
pub fn split(args: &SplitArgs) -> Result<Vec<PathBuf>> {
    let sheet = load_raster(&args.sheet, None)?;
    let tiles = TileSet::from_sheet(&sheet, args.divisions, !args.no_rotate)?;
    let written = save_tile_set(&tiles, &args.out)?;

    tracing::info!(
        sheet = %args.sheet.display(),
        tiles = written.len(),
        out = %args.out.display(),
        "split sheet"
    );
    Ok(written)
}

/// Build the rule table for a tile directory and save it, returning the rule file path
///
/// # Errors
///
/// Returns an error if the parameters are invalid, tiles cannot be loaded or
/// the rule file cannot be written
pub fn build_rules(args: &RulesArgs) -> Result<PathBuf> {
    let config = GenerationConfig {
        tile_size: args.tile_size,
        tolerance: args.tolerance,
        edge_policy: args.policy,
        channel_mode: if args.grayscale {
            ChannelMode::Grayscale
        } else {
            ChannelMode::PerChannel
        },
        min_tiles: args.min_tiles,
        ..GenerationConfig::default()
    };
    config.validate()?;

    let tiles = load_tile_directory(&args.tile_dir, Some(config.tile_size), config.min_tiles)?;
    warn_small_tile_set(&tiles);

    let rules = config.rule_builder().build(&tiles);
    warn_isolated_tiles(&rules, &tiles);

    let path = rules_path(&args.tile_dir, args.rules.as_ref());
    rule_store::save(&rules, &path)?;

    tracing::info!(path = %path.display(), tiles = rules.tile_count(), "saved rules");
    Ok(path)
}

/// Load tiles and rules, apply presets, solve and export the result
///
/// When solving stops at a contradiction, the last valid state is still
/// exported before the error is returned.
///
/// # Errors
///
/// Returns an error if:
/// - Parameters are out of range or the image would be too large
/// - Tiles, rules or presets cannot be loaded
/// - A preset or a collapse step hits a contradiction
/// - An output file cannot be written
pub fn generate(args: &GenerateArgs, quiet: bool) -> Result<GenerateOutput> {
    let config = GenerationConfig {
        tile_size: args.tile_size,
        grid_width: args.width,
        grid_height: args.height,
        seed: args.seed,
        ..GenerationConfig::default()
    };
    config.validate()?;
    config.validate_canvas()?;

    let tiles = load_tile_directory(&args.tile_dir, Some(config.tile_size), config.min_tiles)?;
    warn_small_tile_set(&tiles);

    let path = rules_path(&args.tile_dir, args.rules.as_ref());
    let rules = rule_store::load_for_tiles(&path, tiles.len(), args.create_rules)?;
    warn_isolated_tiles(&rules, &tiles);

    let mut solver = GridSolver::seeded(config.grid_width, config.grid_height, &rules, config.seed)?;
    if let Some(presets) = &args.presets {
        PresetPlan::load(presets)?.apply_to(&mut solver)?;
    }

    let cells = config.grid_width * config.grid_height;
    let progress = if quiet {
        GenerationProgress::hidden(cells)
    } else {
        GenerationProgress::new(cells)
    };
    let capture = args.visualize.then(VisualizationCapture::new);
    let mut observers = (progress, capture);

    let image = timestamped_output_path(&args.out, "png");
    let start = Instant::now();
    let report = match solver.solve_with(&mut observers) {
        Ok(report) => report,
        Err(error) => {
            if let Some(snapshot) = error.contradiction().and_then(|c| c.snapshot.as_ref()) {
                if snapshot.decided_count() > 0 {
                    match export_grid_as_png(snapshot, &tiles, &image) {
                        Ok(()) => tracing::warn!(path = %image.display(), "saved last valid state"),
                        Err(export_error) => {
                            tracing::warn!(error = %export_error, "could not save last valid state");
                        }
                    }
                }
            }
            return Err(error);
        }
    };

    export_grid_as_png(&solver.snapshot(), &tiles, &image)?;

    let animation = match &observers.1 {
        Some(capture) => {
            let gif = image.with_extension("gif");
            capture.export_gif(&tiles, &gif, args.frame_delay)?;
            Some(gif)
        }
        None => None,
    };

    match report.status {
        SolveStatus::Complete => tracing::info!(
            steps = report.steps,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "grid complete"
        ),
        SolveStatus::Cancelled | SolveStatus::Incomplete => tracing::warn!(
            status = ?report.status,
            undecided = report.undecided,
            "grid left with undecided cells"
        ),
    }

    Ok(GenerateOutput {
        image,
        animation,
        report,
    })
}
