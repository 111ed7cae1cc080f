//! Numeric constants and configuration defaults.

/// Vectors shorter than this normalize to zero instead of blowing up.
pub const NORMALIZE_EPSILON: f32 = 1.0e-5;

/// Squared-length product below which the angle between two vectors is 0°.
pub const ANGLE_EPSILON_SQR: f32 = 1.0e-15;

/// Threads per workgroup for the parallel engine's kernels.
pub const WORKGROUP_SIZE: usize = 64;

/// Default object-name pattern that opts a model into baking.
pub const DEFAULT_NAME_SUFFIX: &str = "_SN";

/// Default asset-path pattern that opts a model into baking.
pub const DEFAULT_FILE_PATH: &str = "Assets/SmoothNormal/";

/// Tolerance used when comparing engine outputs against each other.
pub const PARITY_TOLERANCE: f32 = 1.0e-4;
