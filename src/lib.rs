//! Centre-biased photomosaic assembly
//!
//! A target image is sampled into a grid of average colours, every cell is
//! matched against a pool of tile images by breadth-first traversal from the
//! grid centre, and a minimum repetition distance keeps copies of the same tile
//! apart. The filled grid is then composited into one output image.

#![forbid(unsafe_code)]

/// Tile assignment, compositing and the mosaic aggregate
pub mod algorithm;
/// Colour sampling of target and tile images
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Grid layout calculations
pub mod math;
/// Coordinate grids, tiles and tile pools
pub mod spatial;

pub use algorithm::mosaic::{Mosaic, MosaicConfig};
pub use io::error::{MosaicError, Result};
