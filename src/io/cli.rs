//! Command-line interface for building photomosaics from image files

use crate::algorithm::mosaic::{Mosaic, MosaicConfig};
use crate::io::configuration::{
    DEFAULT_MIN_REPETITION_DISTANCE, DEFAULT_TILE_COPIES, DEFAULT_TILE_COUNT, OUTPUT_SUFFIX,
};
use crate::io::error::{MosaicError, Result, io_error};
use crate::io::image::{image_files_in, is_supported_image, load_rgb_image, save_image};
use crate::io::progress::{ProgressManager, TargetPhase};
use crate::spatial::tiles::{AspectRatio, TilePool};
use clap::{ArgAction, Parser};
use indicatif::ParallelProgressIterator;
use log::{LevelFilter, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "greedymosaic")]
#[command(
    author,
    version,
    about = "Assemble photomosaics with a centre-biased greedy tile assignment"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Target image or directory of target images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory containing the tile images
    #[arg(short, long, value_name = "DIR")]
    pub tiles: PathBuf,

    /// Desired number of tiles in each mosaic
    #[arg(short = 'c', long = "count", default_value_t = DEFAULT_TILE_COUNT)]
    pub tile_count: usize,

    /// Minimum grid distance between two placements of the same tile (0 disables)
    #[arg(short = 'd', long = "distance", default_value_t = DEFAULT_MIN_REPETITION_DISTANCE)]
    pub min_repetition_distance: u32,

    /// Tile aspect ratio as WIDTH:HEIGHT or a name (square, landscape, portrait, wide, tall, panorama, banner)
    #[arg(short, long, default_value_t = AspectRatio::SQUARE)]
    pub aspect: AspectRatio,

    /// Number of independent tiles created from each tile image
    #[arg(long, default_value_t = DEFAULT_TILE_COPIES)]
    pub copies: usize,

    /// Directory for the results (defaults to next to each target)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Process targets even if their output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by `--quiet` and `--verbose`
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Mosaic configuration from the arguments
    pub const fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            tile_count_hint: self.tile_count,
            min_repetition_distance: self.min_repetition_distance,
            tile_aspect_ratio: self.aspect,
        }
    }
}

/// Orchestrates tile loading and batch processing of target images
pub struct FileProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build a mosaic for every selected target
    ///
    /// # Errors
    ///
    /// Returns an error if target or tile discovery fails, a tile or target
    /// cannot be decoded, mosaic assembly fails, or an output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let targets = self.collect_targets()?;
        if targets.is_empty() {
            info!("Nothing to do");
            return Ok(());
        }

        self.cli.mosaic_config().validate()?;
        let pool = self.load_tile_pool()?;

        self.progress_manager.initialize(targets.len());
        for (index, target) in targets.iter().enumerate() {
            self.process_target(target, index, &pool)?;
        }
        self.progress_manager.finish();

        Ok(())
    }

    /// Targets selected by the arguments, in path order
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory
    pub fn collect_targets(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_supported_image(target) {
                return Err(io_error("Target file must be a bmp, tiff, png or jpeg image"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            Ok(image_files_in(target)?
                .into_iter()
                .filter(|path| !Self::is_output_file(path) && self.should_process_file(path))
                .collect())
        } else {
            Err(io_error("Target must be an image file or directory"))
        }
    }

    /// Decode every tile image in parallel and crop it into the pool
    ///
    /// # Errors
    ///
    /// Returns an error if the tile directory cannot be read or any tile
    /// image cannot be decoded
    pub fn load_tile_pool(&self) -> Result<TilePool> {
        let start_time = Instant::now();
        let paths = image_files_in(&self.cli.tiles)?;
        if paths.is_empty() {
            return Err(MosaicError::InsufficientTiles {
                cells: self.cli.tile_count,
            });
        }

        let bar = self.progress_manager.tile_loading_bar(paths.len());
        let images = paths
            .par_iter()
            .progress_with(bar.clone())
            .map(|path| load_rgb_image(path))
            .collect::<Result<Vec<_>>>()?;
        bar.finish_and_clear();

        let pool = TilePool::from_images(images, self.cli.aspect, self.cli.copies)?;
        info!(
            "Loaded {} tiles from {} images in {:.1}s",
            pool.len(),
            paths.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(pool)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_target(&mut self, input_path: &Path, index: usize, pool: &TilePool) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);

        self.progress_manager.start_target(index, input_path);
        let target_image = load_rgb_image(input_path)?;

        self.progress_manager.set_phase(index, TargetPhase::Assembling);
        let mosaic = Mosaic::new(target_image, pool.clone(), self.cli.mosaic_config())?;

        self.progress_manager.set_phase(index, TargetPhase::Rendering);
        let result = mosaic.export();
        save_image(&result, &output_path)?;

        info!(
            "Wrote {} ({}x{}) in {:.1}s",
            output_path.display(),
            result.width(),
            result.height(),
            start_time.elapsed().as_secs_f64()
        );
        self.progress_manager
            .complete_target(index, start_time.elapsed());

        Ok(())
    }

    fn is_output_file(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    /// Where the mosaic for a target is written
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        match (&self.cli.output_dir, input_path.parent()) {
            (Some(directory), _) => directory.join(output_name),
            (None, Some(parent)) => parent.join(output_name),
            (None, None) => PathBuf::from(output_name),
        }
    }
}
