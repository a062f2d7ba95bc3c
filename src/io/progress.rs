//! Terminal progress display for grid generation

use crate::algorithm::observer::SolveObserver;
use crate::algorithm::solver::CollapseRecord;
use crate::spatial::grid::GridSnapshot;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Cells: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar counting decided cells while the solver runs
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Visible bar over `cells` grid cells
    pub fn new(cells: usize) -> Self {
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Bar that tracks progress without drawing
    pub fn hidden(cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(cells as u64);
        Self { bar }
    }

    /// Cells counted as decided so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total cells tracked
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Whether the bar has been finished
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl SolveObserver for GenerationProgress {
    fn on_step(&mut self, snapshot: &GridSnapshot, record: &CollapseRecord) {
        self.bar.set_position(snapshot.decided_count() as u64);
        self.bar.set_message(format!(
            "({}, {}) -> {}",
            record.position.x, record.position.y, record.tile
        ));
    }

    fn on_finish(&mut self, snapshot: &GridSnapshot) {
        self.bar.set_position(snapshot.decided_count() as u64);
        self.bar.finish_with_message("done");
    }
}
