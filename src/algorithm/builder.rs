//! Fluent construction of a mosaic from decoded images

use image::RgbImage;

use crate::algorithm::mosaic::{Mosaic, MosaicConfig};
use crate::io::configuration::DEFAULT_TILE_COPIES;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::{AspectRatio, TilePool};

/// Collects a target image, tile images and layout settings, then builds a [`Mosaic`]
///
/// Tile images are cropped to the configured aspect ratio when `build` runs,
/// so the ratio may be set after the images are added.
#[derive(Debug, Clone)]
pub struct MosaicBuilder {
    target: Option<RgbImage>,
    tile_images: Vec<RgbImage>,
    tile_copies: usize,
    config: MosaicConfig,
}

impl Default for MosaicBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MosaicBuilder {
    /// Create a builder with default configuration and no images
    pub fn new() -> Self {
        Self {
            target: None,
            tile_images: Vec::new(),
            tile_copies: DEFAULT_TILE_COPIES,
            config: MosaicConfig::default(),
        }
    }

    /// Image the mosaic should approximate
    #[must_use]
    pub fn target_image(mut self, image: RgbImage) -> Self {
        self.target = Some(image);
        self
    }

    /// Add one tile image
    #[must_use]
    pub fn with_tile_image(mut self, image: RgbImage) -> Self {
        self.tile_images.push(image);
        self
    }

    /// Add several tile images
    #[must_use]
    pub fn with_tile_images(mut self, images: impl IntoIterator<Item = RgbImage>) -> Self {
        self.tile_images.extend(images);
        self
    }

    /// Drop every tile image added so far
    #[must_use]
    pub fn clear_tiles(mut self) -> Self {
        self.tile_images.clear();
        self
    }

    /// Desired number of tiles
    #[must_use]
    pub const fn with_tile_count(mut self, tile_count_hint: usize) -> Self {
        self.config.tile_count_hint = tile_count_hint;
        self
    }

    /// Shape of each tile
    #[must_use]
    pub const fn with_tile_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.config.tile_aspect_ratio = aspect_ratio;
        self
    }

    /// Minimum grid distance between placements of the same tile
    #[must_use]
    pub const fn with_min_repetition_distance(mut self, distance: u32) -> Self {
        self.config.min_repetition_distance = distance;
        self
    }

    /// Number of independent tiles created from each tile image
    #[must_use]
    pub const fn with_tile_copies(mut self, copies: usize) -> Self {
        self.tile_copies = copies;
        self
    }

    /// Configuration the mosaic will be built with
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Number of tile images added so far
    pub fn tile_image_count(&self) -> usize {
        self.tile_images.len()
    }

    /// Crop the tile images, then lay out and fill the mosaic
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if no target image was set or the tile copy
    /// count is zero, and any error of [`Mosaic::new`]
    pub fn build(self) -> Result<Mosaic> {
        let target = self.target.ok_or_else(|| {
            invalid_parameter("target_image", &"<none>", &"a target image is required")
        })?;
        self.config.validate()?;

        let pool = TilePool::from_images(
            self.tile_images,
            self.config.tile_aspect_ratio,
            self.tile_copies,
        )?;
        Mosaic::new(target, pool, self.config)
    }
}
