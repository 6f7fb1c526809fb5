//! Colour analysis of target and tile images

/// Quadratic-mean colour sampling and RGB distance
pub mod color;
/// Per-cell colour grid of the target image
pub mod sampling;
