//! Renders a filled tile grid into one output image
//!
//! Every distinct tile is resized once (bilinear) to the cell size, then the
//! canvas is split into disjoint bands of one tile row each and the bands are
//! filled in parallel. Cells without a tile keep the background colour.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::io::configuration::BACKGROUND_COLOR;
use crate::math::layout::Layout;
use crate::spatial::grid::{CoordGrid, Coordinate};
use crate::spatial::tiles::{Tile, TileId};

const CHANNELS: usize = 3;

/// Resize a tile's pixels to exactly `width × height` with bilinear filtering
pub fn resize_tile(tile: &Tile, width: u32, height: u32) -> RgbImage {
    if tile.image().dimensions() == (width, height) {
        return tile.image().clone();
    }
    imageops::resize(tile.image(), width, height, FilterType::Triangle)
}

/// Paste every tile of the grid onto a `canvas_width × canvas_height` canvas
///
/// Cell `(j, i)` lands at pixel offset `(j · tile_width, i · tile_height)`.
pub fn compose(tile_grid: &CoordGrid<Tile>, layout: &Layout) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(
        layout.canvas_width,
        layout.canvas_height,
        Rgb(BACKGROUND_COLOR),
    );

    let resized = resize_distinct_tiles(tile_grid, layout);

    let tile_width = layout.tile_width as usize;
    let tile_height = layout.tile_height as usize;
    let row_stride = layout.canvas_width as usize * CHANNELS;
    let band_len = row_stride * tile_height;
    if band_len == 0 {
        return canvas;
    }

    canvas
        .par_chunks_mut(band_len)
        .enumerate()
        .for_each(|(row, band)| {
            for column in 0..layout.columns {
                let Some(tile) = tile_grid.try_get(Coordinate::new(column, row)) else {
                    continue;
                };
                let Some(pixels) = resized.get(&tile.id()) else {
                    continue;
                };
                paste_into_band(band, row_stride, column * tile_width * CHANNELS, pixels);
            }
        });

    canvas
}

fn resize_distinct_tiles(tile_grid: &CoordGrid<Tile>, layout: &Layout) -> HashMap<TileId, RgbImage> {
    let mut distinct: HashMap<TileId, &Tile> = HashMap::new();
    for (_, tile) in tile_grid.iter() {
        distinct.entry(tile.id()).or_insert(tile);
    }

    distinct
        .into_par_iter()
        .map(|(id, tile)| (id, resize_tile(tile, layout.tile_width, layout.tile_height)))
        .collect()
}

// Copies each pixel row of the tile into the band starting at `offset` bytes
fn paste_into_band(band: &mut [u8], row_stride: usize, offset: usize, pixels: &RgbImage) {
    let tile_row_len = pixels.width() as usize * CHANNELS;
    if tile_row_len == 0 {
        return;
    }

    for (y, source_row) in pixels.as_raw().chunks_exact(tile_row_len).enumerate() {
        let start = y * row_stride + offset;
        if let Some(target_row) = band.get_mut(start..start + tile_row_len) {
            target_row.copy_from_slice(source_row);
        }
    }
}
