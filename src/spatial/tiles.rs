//! Tiles, tile pools and aspect-ratio cropping
//!
//! A tile wraps one source image with a caller-assigned identity and its
//! precomputed average colour. Identity, not pixel content, decides equality:
//! several tiles may share one source image and still count as distinct units
//! for matching and repetition spacing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use image::{Rgb, RgbImage, imageops};
use rayon::prelude::*;

use crate::analysis::color::{average_color, color_distance};
use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Identity of a tile, unique within one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Width-to-height proportion used for grid sizing and tile cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// 1:1
    pub const SQUARE: Self = Self::from_parts(1, 1);
    /// 4:3 landscape
    pub const FOUR_THREE: Self = Self::from_parts(4, 3);
    /// 3:4 portrait
    pub const THREE_FOUR: Self = Self::from_parts(3, 4);
    /// 16:9 widescreen
    pub const SIXTEEN_NINE: Self = Self::from_parts(16, 9);
    /// 9:16 tall
    pub const NINE_SIXTEEN: Self = Self::from_parts(9, 16);
    /// 2:1 panorama
    pub const TWO_ONE: Self = Self::from_parts(2, 1);
    /// 1:2 banner
    pub const ONE_TWO: Self = Self::from_parts(1, 2);

    /// Every predefined ratio
    pub const ALL: [Self; 7] = [
        Self::SQUARE,
        Self::FOUR_THREE,
        Self::THREE_FOUR,
        Self::SIXTEEN_NINE,
        Self::NINE_SIXTEEN,
        Self::TWO_ONE,
        Self::ONE_TWO,
    ];

    const fn from_parts(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create an arbitrary ratio
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either part is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "tile_aspect_ratio",
                &format!("{width}:{height}"),
                &"both parts must be positive",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width units
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height units
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `width / height`
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self> {
        let named = match s.trim().to_ascii_lowercase().as_str() {
            "square" => Some(Self::SQUARE),
            "landscape" => Some(Self::FOUR_THREE),
            "portrait" => Some(Self::THREE_FOUR),
            "wide" => Some(Self::SIXTEEN_NINE),
            "tall" => Some(Self::NINE_SIXTEEN),
            "panorama" => Some(Self::TWO_ONE),
            "banner" => Some(Self::ONE_TWO),
            _ => None,
        };
        if let Some(ratio) = named {
            return Ok(ratio);
        }

        let malformed = || {
            invalid_parameter(
                "tile_aspect_ratio",
                &s,
                &"expected WIDTH:HEIGHT or one of square, landscape, portrait, wide, tall, panorama, banner",
            )
        };
        let (width, height) = s.trim().split_once(':').ok_or_else(malformed)?;
        let width = width.trim().parse::<u32>().map_err(|_parse| malformed())?;
        let height = height.trim().parse::<u32>().map_err(|_parse| malformed())?;
        Self::new(width, height)
    }
}

/// Centred crop rectangle `(x, y, width, height)` matching an aspect ratio
///
/// The longer side is shortened to match the ratio while the other side is
/// kept whole. Empty images yield an empty rectangle.
pub fn crop_region(width: u32, height: u32, aspect_ratio: AspectRatio) -> (u32, u32, u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0, 0, 0);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (rw, rh) = (u64::from(aspect_ratio.width), u64::from(aspect_ratio.height));

    let (crop_width, crop_height) = if w * rh > h * rw {
        // Too wide: keep the height, round the width to nearest
        let target = (h * rw + rh / 2) / rh;
        (target.clamp(1, w), h)
    } else {
        let target = (w * rh + rw / 2) / rw;
        (w, target.clamp(1, h))
    };

    // Both values are bounded by the original u32 dimensions
    let crop_width = crop_width as u32;
    let crop_height = crop_height as u32;

    (
        (width - crop_width) / 2,
        (height - crop_height) / 2,
        crop_width,
        crop_height,
    )
}

/// Centre-crop an image to an aspect ratio
pub fn crop_to_aspect_ratio(image: &RgbImage, aspect_ratio: AspectRatio) -> RgbImage {
    let (x, y, width, height) = crop_region(image.width(), image.height(), aspect_ratio);
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    imageops::crop_imm(image, x, y, width, height).to_image()
}

/// One placeable unit of a source image
///
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    image: Arc<RgbImage>,
    color: Rgb<u8>,
}

impl Tile {
    /// Wrap an image as-is, computing its average colour
    pub fn new(id: TileId, image: RgbImage) -> Self {
        Self::from_shared(id, Arc::new(image))
    }

    /// Centre-crop an image to the aspect ratio, then wrap it
    pub fn cropped(id: TileId, image: &RgbImage, aspect_ratio: AspectRatio) -> Self {
        Self::new(id, crop_to_aspect_ratio(image, aspect_ratio))
    }

    /// Wrap an already shared buffer
    pub fn from_shared(id: TileId, image: Arc<RgbImage>) -> Self {
        let color = average_color(&image);
        Self { id, image, color }
    }

    /// Create a tile sharing this tile's pixels under a different identity
    #[must_use]
    pub fn with_id(&self, id: TileId) -> Self {
        Self {
            id,
            image: Arc::clone(&self.image),
            color: self.color,
        }
    }

    /// Tile identity
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Pixel buffer
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Precomputed quadratic-mean colour
    pub const fn color(&self) -> Rgb<u8> {
        self.color
    }

    /// Distance from this tile's colour to a target colour
    pub fn color_distance(&self, target: Rgb<u8>) -> u32 {
        color_distance(self.color, target)
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Arena of tiles cropped to one aspect ratio
///
/// Identities are handed out in insertion order, so a pool built from the same
/// images in the same order always assigns the same ids.
#[derive(Debug, Clone)]
pub struct TilePool {
    aspect_ratio: AspectRatio,
    tiles: Vec<Tile>,
}

impl TilePool {
    /// Create an empty pool
    pub const fn new(aspect_ratio: AspectRatio) -> Self {
        Self {
            aspect_ratio,
            tiles: Vec::new(),
        }
    }

    /// Build a pool from source images, cropping and averaging in parallel
    ///
    /// Each image becomes `copies` independent tiles with consecutive ids.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `copies` is zero
    pub fn from_images(
        images: Vec<RgbImage>,
        aspect_ratio: AspectRatio,
        copies: usize,
    ) -> Result<Self> {
        let mut pool = Self::new(aspect_ratio);
        pool.extend_from_images(images, copies)?;
        Ok(pool)
    }

    /// Crop and average images in parallel, then append them
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `copies` is zero
    pub fn extend_from_images(&mut self, images: Vec<RgbImage>, copies: usize) -> Result<()> {
        Self::check_copies(copies)?;

        let aspect_ratio = self.aspect_ratio;
        let prepared: Vec<Tile> = images
            .into_par_iter()
            .map(|image| Tile::cropped(TileId(0), &image, aspect_ratio))
            .collect();

        for tile in prepared {
            self.push_prepared(&tile, copies);
        }
        Ok(())
    }

    /// Crop an image and append it as one tile
    pub fn push(&mut self, image: &RgbImage) -> TileId {
        let tile = Tile::cropped(self.next_id(), image, self.aspect_ratio);
        let id = tile.id();
        self.tiles.push(tile);
        id
    }

    /// Crop an image once and append it as `copies` independent tiles
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `copies` is zero
    pub fn push_copies(&mut self, image: &RgbImage, copies: usize) -> Result<Vec<TileId>> {
        Self::check_copies(copies)?;
        let tile = Tile::cropped(TileId(0), image, self.aspect_ratio);
        Ok(self.push_prepared(&tile, copies))
    }

    fn push_prepared(&mut self, tile: &Tile, copies: usize) -> Vec<TileId> {
        (0..copies)
            .map(|_| {
                let copy = tile.with_id(self.next_id());
                let id = copy.id();
                self.tiles.push(copy);
                id
            })
            .collect()
    }

    fn check_copies(copies: usize) -> Result<()> {
        if copies == 0 {
            return Err(invalid_parameter(
                "tile_copies",
                &copies,
                &"each image must yield at least one tile",
            ));
        }
        Ok(())
    }

    fn next_id(&self) -> TileId {
        TileId(self.tiles.len() as u64)
    }

    /// Ratio every tile was cropped to
    pub const fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// All tiles in id order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile with the given id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        usize::try_from(id.0).ok().and_then(|index| self.tiles.get(index))
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the pool holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove every tile
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
