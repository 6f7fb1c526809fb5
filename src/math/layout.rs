//! Grid sizing from a tile count hint and aspect ratios
//!
//! Chooses `columns × rows` so that the cell count approximates the hint while
//! `columns · tile_width / (rows · tile_height)` approximates the target image's
//! aspect ratio. The count is not corrected after rounding.
//!
//! Known limitation: the sides are always returned as `(side2, side1)`, also
//! for portrait targets. Swapping them by orientation proved unreliable and is
//! not attempted.

use log::info;
use num_traits::ToPrimitive;

use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::tiles::AspectRatio;

/// Row/column counts and per-cell pixel sizes for one mosaic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Number of tile columns
    pub columns: usize,
    /// Number of tile rows
    pub rows: usize,
    /// Width of one pasted tile in output pixels
    pub tile_width: u32,
    /// Height of one pasted tile in output pixels
    pub tile_height: u32,
    /// Width of the target region sampled for one cell
    pub scan_width: u32,
    /// Height of the target region sampled for one cell
    pub scan_height: u32,
    /// Output canvas width (`tile_width · columns`)
    pub canvas_width: u32,
    /// Output canvas height (`tile_height · rows`)
    pub canvas_height: u32,
}

impl Layout {
    /// Compute the layout for a target image
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - Either image dimension is zero
    /// - `tile_count_hint` is zero
    /// - The computed grid has no rows or no columns
    /// - The grid has more rows or columns than the image has pixels
    /// - The tile width rounds to zero
    ///
    /// Returns `Computation` if a size does not fit the pixel coordinate range
    pub fn compute(
        image_width: u32,
        image_height: u32,
        tile_aspect_ratio: AspectRatio,
        tile_count_hint: usize,
    ) -> Result<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(invalid_parameter(
                "image_dimensions",
                &format!("{image_width}x{image_height}"),
                &"target image must have a non-zero area",
            ));
        }

        let image_ratio = f64::from(image_width) / f64::from(image_height);
        let (columns, rows) = grid_sides(image_ratio, tile_aspect_ratio.ratio(), tile_count_hint)?;

        if rows == 0 {
            return Err(invalid_parameter(
                "rows",
                &rows,
                &"tile count hint is too small for this aspect ratio",
            ));
        }
        if columns == 0 {
            return Err(invalid_parameter(
                "columns",
                &columns,
                &"tile count hint is too small for this aspect ratio",
            ));
        }

        let rows_u32 = to_pixel_count(rows, "rows")?;
        let columns_u32 = to_pixel_count(columns, "columns")?;

        let tile_height = image_height / rows_u32;
        if tile_height == 0 {
            return Err(invalid_parameter(
                "rows",
                &rows,
                &format!("image is only {image_height} pixels high"),
            ));
        }

        let scan_width = image_width / columns_u32;
        if scan_width == 0 {
            return Err(invalid_parameter(
                "columns",
                &columns,
                &format!("image is only {image_width} pixels wide"),
            ));
        }

        let tile_width = (f64::from(tile_height) * tile_aspect_ratio.ratio())
            .round()
            .to_u32()
            .ok_or_else(|| computation_error("tile width", &"value out of range"))?;
        if tile_width == 0 {
            return Err(invalid_parameter(
                "tile_aspect_ratio",
                &tile_aspect_ratio,
                &"tile width rounds to zero pixels",
            ));
        }

        let canvas_width = tile_width
            .checked_mul(columns_u32)
            .ok_or_else(|| computation_error("canvas width", &"overflows u32"))?;
        let canvas_height = tile_height
            .checked_mul(rows_u32)
            .ok_or_else(|| computation_error("canvas height", &"overflows u32"))?;

        info!("Actual tile count = {}", columns * rows);

        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            scan_width,
            scan_height: tile_height,
            canvas_width,
            canvas_height,
        })
    }

    /// Number of cells in the grid
    pub const fn tile_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Output canvas size as `(width, height)`
    pub const fn canvas_dimensions(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }
}

/// Grid sides for an image ratio, a tile ratio and a tile count hint
///
/// Returns `(columns, rows)` where
/// `rows = round(sqrt(tile_ratio · hint / image_ratio))` and
/// `columns = round(sqrt(image_ratio · hint / tile_ratio))`.
///
/// # Errors
///
/// Returns `InvalidParameter` if the hint is zero or either ratio is not a
/// positive finite number, and `Computation` if a side overflows `usize`
pub fn grid_sides(image_ratio: f64, tile_ratio: f64, tile_count_hint: usize) -> Result<(usize, usize)> {
    if tile_count_hint == 0 {
        return Err(invalid_parameter(
            "tile_count_hint",
            &tile_count_hint,
            &"must be positive",
        ));
    }
    if !(image_ratio.is_finite() && image_ratio > 0.0) {
        return Err(invalid_parameter(
            "image_ratio",
            &image_ratio,
            &"must be a positive finite number",
        ));
    }
    if !(tile_ratio.is_finite() && tile_ratio > 0.0) {
        return Err(invalid_parameter(
            "tile_ratio",
            &tile_ratio,
            &"must be a positive finite number",
        ));
    }

    let hint = tile_count_hint as f64;
    let side1 = rounded_side((tile_ratio * hint / image_ratio).sqrt(), "row count")?;
    let side2 = rounded_side((image_ratio * hint / tile_ratio).sqrt(), "column count")?;

    Ok((side2, side1))
}

fn rounded_side(value: f64, operation: &'static str) -> Result<usize> {
    value
        .round()
        .to_usize()
        .ok_or_else(|| computation_error(operation, &format!("{value} is not a valid grid side")))
}

fn to_pixel_count(value: usize, operation: &'static str) -> Result<u32> {
    value
        .to_u32()
        .ok_or_else(|| computation_error(operation, &format!("{value} exceeds u32")))
}
