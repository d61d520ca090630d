//! Checked integer conversions for contour and raster coordinates
//!
//! Contour points may sit anywhere in `i32`, so extents and deltas are
//! computed in `i64` and only narrowed through these helpers.

use crate::{Error, Result};

/// Safely convert usize to i32 with overflow checking
///
/// # Errors
///
/// Returns an error if the value exceeds i32::MAX
pub fn usize_to_i32(value: usize) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i32")))
}

/// Safely convert a non-negative i64 to usize
///
/// # Errors
///
/// Returns an error if the value is negative or exceeds usize::MAX
pub fn i64_to_usize(value: i64) -> Result<usize> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} cannot be used as an index")))
}

/// Narrow an i64 to i32, saturating at the i32 bounds
#[must_use]
pub fn i64_to_i32_saturating(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Narrow a non-negative i64 extent to u32, saturating at the u32 bounds
#[must_use]
pub fn i64_to_u32_saturating(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { 0 } else { u32::MAX })
}

/// Clamp and convert f64 to i64 for pixel coordinates
///
/// Non-finite values map to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
#[allow(clippy::cast_precision_loss)] // Bounds are pixel coordinates well below 2^53
pub fn f64_to_i64_clamp(value: f64, min: i64, max: i64) -> i64 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(min as f64, max as f64);
    (clamped as i64).clamp(min, max)
}
