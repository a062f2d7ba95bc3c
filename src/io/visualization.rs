//! Frame capture and GIF generation for solve visualization

use crate::algorithm::observer::SolveObserver;
use crate::algorithm::solver::CollapseRecord;
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::compose_grid_image;
use crate::spatial::grid::GridSnapshot;
use crate::spatial::tiles::TileSet;
use image::{Delay, DynamicImage, Frame, codecs::gif::GifEncoder};
use std::path::Path;

/// Records one snapshot per collapse step plus the final state
///
/// Snapshots are rendered only when the animation is exported, so capture
/// stays cheap while the solver runs.
#[derive(Debug, Default)]
pub struct VisualizationCapture {
    frames: Vec<GridSnapshot>,
    finished: bool,
}

impl VisualizationCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self {
            frames: Vec::new(),
            finished: false,
        }
    }

    /// Captured snapshots in order, the final state last
    pub fn frames(&self) -> &[GridSnapshot] {
        &self.frames
    }

    /// Number of captured snapshots
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether the solve loop reported its final state
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Export the captured frames as an animated GIF
    ///
    /// Delays below what viewers honour are raised to that minimum, keeping
    /// every n-th frame so the apparent speed is preserved. The last frame is
    /// always kept and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - A snapshot references a tile missing from `tiles`
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, tiles: &TileSet, path: &Path, frame_delay_ms: u32) -> Result<()> {
        let Some(last) = self.frames.last() else {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "frames",
                value: "0".to_string(),
                reason: "no frames captured for visualization".to_string(),
            });
        };

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip = if frame_delay_ms == 0 {
            VIEWER_MIN_FRAME_DELAY_MS as usize
        } else {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1) as usize
        };

        let body = self.frames.len().saturating_sub(1);
        let mut frames = Vec::new();
        for (index, snapshot) in self.frames.iter().take(body).enumerate() {
            if index % skip == 0 {
                frames.push(render_frame(snapshot, tiles, delay_ms)?);
            }
        }
        frames.push(render_frame(last, tiles, delay_ms.saturating_mul(FINAL_FRAME_HOLD))?);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let frame_total = frames.len();
        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), frames = frame_total, "saved animation");
        Ok(())
    }
}

impl SolveObserver for VisualizationCapture {
    fn on_step(&mut self, snapshot: &GridSnapshot, _record: &CollapseRecord) {
        self.frames.push(snapshot.clone());
    }

    fn on_finish(&mut self, snapshot: &GridSnapshot) {
        self.frames.push(snapshot.clone());
        self.finished = true;
    }
}

fn render_frame(snapshot: &GridSnapshot, tiles: &TileSet, delay_ms: u32) -> Result<Frame> {
    let image = DynamicImage::ImageRgb8(compose_grid_image(snapshot, tiles)?).to_rgba8();
    Ok(Frame::from_parts(
        image,
        0,
        0,
        Delay::from_numer_denom_ms(delay_ms, 1),
    ))
}
