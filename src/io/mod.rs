//! Input/output, configuration and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Default values and constants
pub mod configuration;
/// Error types
pub mod error;
/// Image file discovery, decoding and encoding
pub mod image;
/// Progress display
pub mod progress;
