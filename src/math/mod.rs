//! Mathematical utilities for the mosaic layout

/// Row/column counts and tile sizes
pub mod layout;
