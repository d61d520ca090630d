//! Constants used throughout the library

/// Minimum number of contour points required before a spine line is fitted
pub const MIN_SPINE_FIT_POINTS: usize = 5;

/// Fraction of the bounding-box height searched for shoulder points
pub const UPPER_BAND_FRACTION: f64 = 0.35;

/// Spine angle (degrees) above which posture is critical
pub const CRITICAL_SPINE_ANGLE_DEG: f64 = 12.0;

/// Shoulder tilt (percent of frame height) above which posture is critical
pub const CRITICAL_SHOULDER_TILT_PCT: f64 = 6.0;

/// Head offset (absolute pixels) above which posture is critical
pub const CRITICAL_HEAD_OFFSET_PX: f64 = 80.0;

/// Spine angle (degrees) above which posture needs adjusting
pub const ADJUST_SPINE_ANGLE_DEG: f64 = 6.0;

/// Shoulder tilt (percent of frame height) above which posture needs adjusting
pub const ADJUST_SHOULDER_TILT_PCT: f64 = 3.0;

/// Head offset (absolute pixels) above which posture needs adjusting
pub const ADJUST_HEAD_OFFSET_PX: f64 = 40.0;

/// Contours with a smaller polygon area are ignored when picking the subject
pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 2000.0;

/// Huber tuning constant (95% efficiency under Gaussian noise)
pub const DEFAULT_HUBER_C: f64 = 1.345;

/// Iteration cap for reweighted line fitting
pub const LINE_FIT_MAX_ITERATIONS: usize = 30;

/// Direction change below which reweighted fitting has converged
pub const LINE_FIT_CONVERGENCE_EPS: f64 = 1e-6;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;

/// Largest frame (and largest raster window) accepted, in pixels
pub const MAX_FRAME_PIXELS: u64 = 1 << 26;
