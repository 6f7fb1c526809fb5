//! Progress display for tile loading and batch mosaic generation

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static LOADING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Targets: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static STATUS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Stage a target file is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhase {
    /// Decoding the target image
    Loading,
    /// Laying out, sampling and assigning tiles
    Assembling,
    /// Compositing and writing the output
    Rendering,
    /// Output written
    Done,
}

impl TargetPhase {
    const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Assembling => "assembling",
            Self::Rendering => "rendering",
            Self::Done => "done",
        }
    }
}

/// Coordinates progress display for tile loading and batch processing
///
/// Shows a status line for each of the last few targets and, for larger
/// batches, an overall bar
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    status_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `status`) for rolling window display
    target_states: Vec<(String, String)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            batch_bar: None,
            status_bars: Vec::new(),
            target_states: Vec::new(),
        }
    }

    /// Create a bar counting decoded tile images
    ///
    /// The returned handle can be shared with worker threads.
    pub fn tile_loading_bar(&self, tile_count: usize) -> ProgressBar {
        let bar = self
            .multi_progress
            .add(ProgressBar::new(tile_count as u64));
        bar.set_style(LOADING_STYLE.clone());
        bar.set_message("Loading tiles");
        bar
    }

    /// Prepare status lines for a batch of targets
    pub fn initialize(&mut self, target_count: usize) {
        // Switch to batch mode for large target sets to avoid terminal spam
        if target_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(target_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..target_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new_spinner();
            bar.set_style(STATUS_STYLE.clone());
            self.status_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a target and show it as loading
    pub fn start_target(&mut self, index: usize, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.target_states.len() {
            self.target_states
                .resize(index + 1, (String::new(), String::new()));
        }
        if let Some(state) = self.target_states.get_mut(index) {
            *state = (display_name, TargetPhase::Loading.label().to_string());
        }
        self.update_bars();
    }

    /// Move a target to another phase
    pub fn set_phase(&mut self, index: usize, phase: TargetPhase) {
        if let Some(state) = self.target_states.get_mut(index) {
            state.1 = phase.label().to_string();
        }
        self.update_bars();
    }

    /// Mark a target as written and advance the batch bar
    pub fn complete_target(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.target_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = format!("{} in {:.1}s", TargetPhase::Done.label(), elapsed.as_secs_f64());
        }
        self.update_bars();
    }

    /// Status text currently recorded for a target
    pub fn status(&self, index: usize) -> Option<&str> {
        self.target_states.get(index).map(|(_, status)| status.as_str())
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All targets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update status lines to show the last N registered targets
    fn update_bars(&self) {
        let active: Vec<&(String, String)> = self
            .target_states
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar, (name, status)) in self.status_bars.iter().zip(visible) {
            bar.set_prefix(name.clone());
            bar.set_message(status.clone());
        }

        for bar in self.status_bars.iter().skip(visible.len()) {
            bar.set_prefix(String::new());
            bar.set_message(String::new());
        }
    }
}
