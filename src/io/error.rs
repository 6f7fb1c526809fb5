//! Errors raised while laying out, filling and rendering a mosaic, and by the file driver

use std::fmt;
use std::path::PathBuf;

/// Every failure the library and the command-line driver can report
#[derive(Debug)]
pub enum MosaicError {
    /// A target or tile image could not be opened or decoded
    ImageLoad {
        /// File that was being decoded
        path: PathBuf,
        /// Decoder failure
        source: image::ImageError,
    },

    /// The rendered mosaic could not be encoded or written
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder failure
        source: image::ImageError,
    },

    /// Directory listing or creation failed
    FileSystem {
        /// Directory being accessed
        path: PathBuf,
        /// What was attempted, e.g. "read directory"
        operation: &'static str,
        /// Operating system error
        source: std::io::Error,
    },

    /// Configuration value rejected before any grid work
    InvalidParameter {
        /// Setting name as used in the API
        parameter: &'static str,
        /// Rejected value, formatted
        value: String,
        /// Constraint the value violates
        reason: String,
    },

    /// Grid coordinate outside the fixed grid bounds
    OutOfBounds {
        /// Column of the rejected coordinate
        x: usize,
        /// Row of the rejected coordinate
        y: usize,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// No value stored at the requested grid coordinate
    CellNotFound {
        /// Column of the missing cell
        x: usize,
        /// Row of the missing cell
        y: usize,
    },

    /// Tile pool is empty at assignment start
    ///
    /// Supply more tile images or lower the tile count.
    InsufficientTiles {
        /// Number of grid cells that needed a tile
        cells: usize,
    },

    /// A derived size did not fit its integer type
    Computation {
        /// Quantity being computed
        operation: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot decode '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write mosaic to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(f, "Failed to {operation} '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Coordinate ({x}, {y}) is outside the {width}x{height} grid"
                )
            }
            Self::CellNotFound { x, y } => {
                write!(f, "No value stored at coordinate ({x}, {y})")
            }
            Self::InsufficientTiles { cells } => {
                write!(
                    f,
                    "No tiles available to fill {cells} cells; supply more tile images or lower the tile count"
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Cannot compute {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "access",
            source: err,
        }
    }
}

/// Build an `InvalidParameter` error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Build a `Computation` error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an error for a rejected filesystem path
pub fn io_error(msg: &str) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
