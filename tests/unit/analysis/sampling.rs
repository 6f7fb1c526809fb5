//! Tests for per-cell sampling of the target image

#[cfg(test)]
mod tests {

    use greedymosaic::analysis::sampling::sample_colour_grid;
    use greedymosaic::math::layout::Layout;
    use image::{Rgb, RgbImage};

    fn layout(columns: usize, rows: usize, scan_width: u32, scan_height: u32) -> Layout {
        Layout {
            columns,
            rows,
            tile_width: scan_width,
            tile_height: scan_height,
            scan_width,
            scan_height,
            canvas_width: scan_width * columns as u32,
            canvas_height: scan_height * rows as u32,
        }
    }

    fn quadrants() -> RgbImage {
        RgbImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
            (true, true) => Rgb([255, 0, 0]),
            (false, true) => Rgb([0, 255, 0]),
            (true, false) => Rgb([0, 0, 255]),
            (false, false) => Rgb([255, 255, 255]),
        })
    }

    // Tests that each cell samples its own scan region with column j and row i
    // Verified by swapping the row and column indices when storing cells
    #[test]
    fn test_cells_sample_their_own_region() {
        let grid = sample_colour_grid(&quadrants(), &layout(2, 2, 2, 2));
        assert!(grid.is_ok());
        let Ok(grid) = grid else { return };

        assert!(grid.is_full());
        assert!(matches!(grid.get(0, 0), Ok(&Rgb([255, 0, 0]))));
        assert!(matches!(grid.get(1, 0), Ok(&Rgb([0, 255, 0]))));
        assert!(matches!(grid.get(0, 1), Ok(&Rgb([0, 0, 255]))));
        assert!(matches!(grid.get(1, 1), Ok(&Rgb([255, 255, 255]))));
    }

    // Tests that pixels beyond the last full region are ignored
    // Verified by stretching the last region to the image edge
    #[test]
    fn test_remainder_pixels_are_ignored() {
        let mut image = RgbImage::from_pixel(5, 2, Rgb([40, 40, 40]));
        for y in 0..2 {
            image.put_pixel(4, y, Rgb([255, 255, 255]));
        }

        let grid = sample_colour_grid(&image, &layout(2, 1, 2, 2));

        assert!(grid.is_ok_and(|grid| {
            grid.len() == 2 && grid.iter().all(|(_, &colour)| colour == Rgb([40, 40, 40]))
        }));
    }

    // Tests that the grid bounds follow the layout
    // Verified by sizing the grid from the image dimensions
    #[test]
    fn test_grid_bounds_follow_layout() {
        let grid = sample_colour_grid(&quadrants(), &layout(4, 1, 1, 4));

        assert!(grid.is_ok_and(|grid| grid.width() == 4 && grid.height() == 1 && grid.is_full()));
    }
}
