//! Per-cell colour sampling of the target image

use image::{Rgb, RgbImage};

use crate::analysis::color::average_color_of_region;
use crate::io::error::Result;
use crate::math::layout::Layout;
use crate::spatial::grid::CoordGrid;

/// Sample the target image into a fully populated colour grid
///
/// Cell `(j, i)` holds the quadratic-mean colour of the
/// `scan_width × scan_height` region starting at `(j · scan_width, i · scan_height)`.
/// Pixels beyond the last full region are ignored.
///
/// # Errors
///
/// Returns `OutOfBounds` if the layout disagrees with its own grid bounds
pub fn sample_colour_grid(image: &RgbImage, layout: &Layout) -> Result<CoordGrid<Rgb<u8>>> {
    let mut colour_grid = CoordGrid::new(layout.columns, layout.rows);

    let mut y = 0;
    for i in 0..layout.rows {
        let mut x = 0;
        for j in 0..layout.columns {
            let colour =
                average_color_of_region(image, x, y, layout.scan_width, layout.scan_height);
            colour_grid.add(j, i, colour)?;
            x += layout.scan_width;
        }
        y += layout.scan_height;
    }

    Ok(colour_grid)
}
