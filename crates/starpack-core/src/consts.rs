/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// First brightness threshold tried by automatic threshold detection.
pub const DEFAULT_AUTO_THRESHOLD_START: f64 = 0.90;

/// Amount the automatic threshold is lowered after each unsuccessful scan.
pub const DEFAULT_AUTO_THRESHOLD_STEP: f64 = 0.01;

/// Lowest threshold automatic detection will try.
pub const DEFAULT_AUTO_THRESHOLD_FLOOR: f64 = 0.20;

/// Most scans automatic threshold detection may be configured to run.
pub const MAX_AUTO_THRESHOLD_STEPS: f64 = 10_000.0;

/// Raw bright-pixel count at which automatic threshold detection stops.
pub const DEFAULT_MIN_RAW_POINTS: usize = 10;

/// Number of largest stars kept in a frame's star map.
pub const DEFAULT_MAX_STARS: usize = 10;

/// Size assigned to a single bright pixel before clustering.
pub const RAW_STAR_SIZE: f64 = 1.0;

/// Extra radius added to a star when testing whether it touches a cluster.
pub const NEIGHBOR_INFLATION: f64 = 1.0;

/// Half width of the translation search window; offsets lie in (-w, w].
pub const DEFAULT_SEARCH_HALF_WINDOW: i32 = 500;

/// Smallest rotation (degrees) tried for every translation.
pub const DEFAULT_MIN_ROTATION: i32 = -10;

/// Largest rotation (degrees) tried for every translation.
pub const DEFAULT_MAX_ROTATION: i32 = 10;

/// Rotation increment (degrees) between tried rotations.
pub const DEFAULT_ROTATION_STEP: i32 = 1;

/// File extensions picked up when an input path is a directory.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tif", "tiff"];
