/// Centre-biased breadth-first tile assignment
pub mod assignment;
/// Fluent mosaic construction
pub mod builder;
/// Rendering of a filled tile grid
pub mod compositor;
/// Mosaic aggregate and configuration
pub mod mosaic;
/// Distance to the nearest reachable copy of a tile
pub mod repetition;
