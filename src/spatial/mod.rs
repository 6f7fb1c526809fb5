//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - The bounded coordinate grid with neighbour queries
//! - Tiles, tile pools and aspect-ratio cropping

/// Sparse coordinate grid
pub mod grid;
/// Tile identity, cropping and pools
pub mod tiles;

pub use grid::{CoordGrid, Coordinate};
pub use tiles::{AspectRatio, Tile, TileId, TilePool};
