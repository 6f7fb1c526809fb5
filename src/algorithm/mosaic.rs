//! Mosaic aggregate tying layout, sampling, assignment and compositing together

use image::{Rgb, RgbImage};
use log::info;

use crate::algorithm::assignment::TileAssigner;
use crate::algorithm::builder::MosaicBuilder;
use crate::algorithm::compositor::compose;
use crate::analysis::sampling::sample_colour_grid;
use crate::io::configuration::{DEFAULT_MIN_REPETITION_DISTANCE, DEFAULT_TILE_COUNT};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::math::layout::Layout;
use crate::spatial::grid::{CoordGrid, Coordinate};
use crate::spatial::tiles::{AspectRatio, Tile, TilePool};

/// Parameters controlling grid size and tile spacing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Desired number of tiles; the actual count differs by rounding
    pub tile_count_hint: usize,
    /// Minimum grid distance between two placements of the same tile (0 disables the check)
    pub min_repetition_distance: u32,
    /// Shape of each tile, used for both grid sizing and tile cropping
    pub tile_aspect_ratio: AspectRatio,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_count_hint: DEFAULT_TILE_COUNT,
            min_repetition_distance: DEFAULT_MIN_REPETITION_DISTANCE,
            tile_aspect_ratio: AspectRatio::SQUARE,
        }
    }
}

impl MosaicConfig {
    /// Check values that can be rejected without looking at any image
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tile count hint is zero
    pub fn validate(&self) -> Result<()> {
        if self.tile_count_hint == 0 {
            return Err(invalid_parameter(
                "tile_count_hint",
                &self.tile_count_hint,
                &"must be positive",
            ));
        }
        Ok(())
    }
}

/// A target image rendered as a grid of tiles
///
/// Both grids are filled during construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct Mosaic {
    image: RgbImage,
    tiles: TilePool,
    colour_grid: CoordGrid<Rgb<u8>>,
    tile_grid: CoordGrid<Tile>,
    layout: Layout,
    fallback_cells: Vec<Coordinate>,
}

impl Mosaic {
    /// Start a fluent builder
    pub fn builder() -> MosaicBuilder {
        MosaicBuilder::new()
    }

    /// Lay out, sample and fill a mosaic for the target image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration or target image is unusable (`InvalidParameter`)
    /// - The pool was cropped to a different aspect ratio (`InvalidParameter`)
    /// - The pool is empty (`InsufficientTiles`)
    pub fn new(image: RgbImage, tiles: TilePool, config: MosaicConfig) -> Result<Self> {
        config.validate()?;
        if tiles.aspect_ratio() != config.tile_aspect_ratio {
            return Err(invalid_parameter(
                "tile_aspect_ratio",
                &config.tile_aspect_ratio,
                &format!("tile pool was cropped to {}", tiles.aspect_ratio()),
            ));
        }

        let layout = Layout::compute(
            image.width(),
            image.height(),
            config.tile_aspect_ratio,
            config.tile_count_hint,
        )?;
        if tiles.is_empty() {
            return Err(MosaicError::InsufficientTiles {
                cells: layout.tile_count(),
            });
        }

        let colour_grid = sample_colour_grid(&image, &layout)?;
        let assignment =
            TileAssigner::new(config.min_repetition_distance).assign(&colour_grid, tiles.tiles())?;

        info!(
            "Mosaic assessed: {}x{} tiles of {}x{} pixels from a pool of {}",
            layout.columns,
            layout.rows,
            layout.tile_width,
            layout.tile_height,
            tiles.len()
        );

        Ok(Self {
            image,
            tiles,
            colour_grid,
            tile_grid: assignment.tile_grid,
            layout,
            fallback_cells: assignment.fallback_cells,
        })
    }

    /// Render the tile grid into a new image
    pub fn export(&self) -> RgbImage {
        compose(&self.tile_grid, &self.layout)
    }

    /// Target image the mosaic approximates
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Tiles available to the mosaic
    pub const fn tiles(&self) -> &TilePool {
        &self.tiles
    }

    /// Sampled target colour per cell
    pub const fn colour_grid(&self) -> &CoordGrid<Rgb<u8>> {
        &self.colour_grid
    }

    /// Chosen tile per cell
    pub const fn tile_grid(&self) -> &CoordGrid<Tile> {
        &self.tile_grid
    }

    /// Grid and pixel sizes
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of tile rows
    pub const fn row_count(&self) -> usize {
        self.layout.rows
    }

    /// Number of tile columns
    pub const fn column_count(&self) -> usize {
        self.layout.columns
    }

    /// Width of one pasted tile in pixels
    pub const fn tile_width(&self) -> u32 {
        self.layout.tile_width
    }

    /// Height of one pasted tile in pixels
    pub const fn tile_height(&self) -> u32 {
        self.layout.tile_height
    }

    /// Cells that received the worst match because no tile met the repetition distance
    pub fn fallback_cells(&self) -> &[Coordinate] {
        &self.fallback_cells
    }
}
