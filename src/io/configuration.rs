//! Mosaic constants and runtime configuration defaults

// Layout defaults
/// Desired number of tiles when none is specified
pub const DEFAULT_TILE_COUNT: usize = 2000;

/// Minimum grid distance between two placements of the same tile (0 disables the check)
pub const DEFAULT_MIN_REPETITION_DISTANCE: u32 = 0;

/// Number of independent tiles created from each source image
pub const DEFAULT_TILE_COPIES: usize = 1;

// Rendering
/// Canvas colour visible wherever no tile was pasted
pub const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];

// Input and output settings
/// Image file extensions accepted for targets and tiles (matched case-insensitively)
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["bmp", "tiff", "png", "jpg", "jpeg"];

/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
