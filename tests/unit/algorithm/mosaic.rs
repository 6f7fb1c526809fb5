//! Tests for the mosaic aggregate

#[cfg(test)]
mod tests {

    use greedymosaic::spatial::tiles::{AspectRatio, TilePool};
    use greedymosaic::{Mosaic, MosaicConfig, MosaicError};
    use image::{Rgb, RgbImage};

    fn half_black_half_white(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    fn black_and_white_pool(aspect_ratio: AspectRatio) -> TilePool {
        let mut pool = TilePool::new(aspect_ratio);
        pool.push(&RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
        pool.push(&RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
        pool
    }

    fn config(tile_count_hint: usize) -> MosaicConfig {
        MosaicConfig {
            tile_count_hint,
            ..MosaicConfig::default()
        }
    }

    // Tests that construction fills both grids to the layout size
    // Verified by skipping assignment in Mosaic::new
    #[test]
    fn test_new_fills_colour_and_tile_grids() {
        let mosaic = Mosaic::new(
            half_black_half_white(40, 40),
            black_and_white_pool(AspectRatio::SQUARE),
            config(16),
        );
        assert!(mosaic.is_ok());
        let Ok(mosaic) = mosaic else { return };

        assert_eq!((mosaic.column_count(), mosaic.row_count()), (4, 4));
        assert_eq!((mosaic.tile_width(), mosaic.tile_height()), (10, 10));
        assert!(mosaic.colour_grid().is_full());
        assert!(mosaic.tile_grid().is_full());
        assert_eq!(mosaic.tile_grid().len(), mosaic.layout().tile_count());
        assert!(mosaic.fallback_cells().is_empty());
        assert_eq!(mosaic.image().dimensions(), (40, 40));
        assert_eq!(mosaic.tiles().len(), 2);
    }

    // Tests that the exported image matches the target's light and dark halves
    // Verified by pasting the worst match in every cell
    #[test]
    fn test_export_reproduces_target_halves() {
        let mosaic = Mosaic::new(
            half_black_half_white(40, 40),
            black_and_white_pool(AspectRatio::SQUARE),
            config(16),
        );
        assert!(mosaic.is_ok());
        let Ok(mosaic) = mosaic else { return };

        let output = mosaic.export();

        assert_eq!(output.dimensions(), mosaic.layout().canvas_dimensions());
        assert_eq!(output.get_pixel(5, 5), &Rgb([0, 0, 0]));
        assert_eq!(output.get_pixel(35, 35), &Rgb([255, 255, 255]));
    }

    // Tests that an empty pool is reported as insufficient tiles
    // Verified by defaulting to a blank tile when the pool is empty
    #[test]
    fn test_empty_pool_is_rejected() {
        let result = Mosaic::new(
            half_black_half_white(20, 20),
            TilePool::new(AspectRatio::SQUARE),
            config(4),
        );

        assert!(matches!(result, Err(MosaicError::InsufficientTiles { cells: 4 })));
    }

    // Tests that a pool cropped to another ratio is rejected
    // Verified by removing the aspect ratio comparison
    #[test]
    fn test_aspect_ratio_mismatch_is_rejected() {
        let result = Mosaic::new(
            half_black_half_white(20, 20),
            black_and_white_pool(AspectRatio::FOUR_THREE),
            config(4),
        );

        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "tile_aspect_ratio",
                ..
            })
        ));
    }

    // Tests that a zero tile count is rejected before layout
    // Verified by removing the validate call
    #[test]
    fn test_zero_tile_count_is_rejected() {
        let result = Mosaic::new(
            half_black_half_white(20, 20),
            black_and_white_pool(AspectRatio::SQUARE),
            config(0),
        );

        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "tile_count_hint",
                ..
            })
        ));
    }

    // Tests that an unreachable repetition distance still yields a complete mosaic
    // Verified by failing construction when fallbacks occur
    #[test]
    fn test_unsatisfiable_distance_reports_fallbacks() {
        let mut pool = TilePool::new(AspectRatio::SQUARE);
        pool.push(&RgbImage::from_pixel(4, 4, Rgb([90, 90, 90])));
        let config = MosaicConfig {
            tile_count_hint: 9,
            min_repetition_distance: 5,
            tile_aspect_ratio: AspectRatio::SQUARE,
        };

        let mosaic = Mosaic::new(half_black_half_white(30, 30), pool, config);

        assert!(mosaic.is_ok_and(|mosaic| mosaic.tile_grid().is_full()
            && mosaic.fallback_cells().len() == 8));
    }

    // Tests the default configuration values
    // Verified by changing the default tile count
    #[test]
    fn test_default_config() {
        let config = MosaicConfig::default();

        assert_eq!(config.tile_count_hint, 2000);
        assert_eq!(config.min_repetition_distance, 0);
        assert_eq!(config.tile_aspect_ratio, AspectRatio::SQUARE);
        assert!(config.validate().is_ok());
    }
}
