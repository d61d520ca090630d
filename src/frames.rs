//! Frame batch input for offline analysis.
//!
//! A batch file is YAML listing, per frame, the frame dimensions and every
//! contour the segmentation stage found:
//!
//! ```yaml
//! frames:
//!   - width: 640
//!     height: 480
//!     contours:
//!       - [[200, 100], [400, 100], [400, 450], [200, 450]]
//! ```

use crate::constants::MAX_FRAME_PIXELS;
use crate::geometry::{FrameShape, Point};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One frame's worth of segmentation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// External contours found in the frame, in any order
    #[serde(default)]
    pub contours: Vec<Vec<Point>>,
}

impl FrameRecord {
    /// Frame dimensions
    #[must_use]
    pub const fn shape(&self) -> FrameShape {
        FrameShape::new(self.height, self.width)
    }
}

#[derive(Debug, Deserialize)]
struct FrameBatch {
    frames: Vec<FrameRecord>,
}

/// Load a frame batch from a YAML file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid batch, or
/// contains a frame with zero width or height or more than
/// `MAX_FRAME_PIXELS` pixels
pub fn load_frames<P: AsRef<Path>>(path: P) -> Result<Vec<FrameRecord>> {
    let path = path.as_ref();
    log::info!("Loading frames from: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_frames(&content)
}

/// Parse a frame batch from YAML text
///
/// # Errors
///
/// Returns an error if the text is not a valid batch or contains a frame
/// with zero width or height or more than `MAX_FRAME_PIXELS` pixels
pub fn parse_frames(content: &str) -> Result<Vec<FrameRecord>> {
    let batch: FrameBatch = serde_yaml::from_str(content)
        .map_err(|e| Error::InputFormat(format!("Failed to parse frame batch: {e}")))?;

    if let Some(index) = batch.frames.iter().position(|f| f.shape().is_empty()) {
        return Err(Error::InvalidInput(format!("Frame {index} has zero width or height")));
    }
    if let Some(index) = batch
        .frames
        .iter()
        .position(|f| u64::from(f.width) * u64::from(f.height) > MAX_FRAME_PIXELS)
    {
        return Err(Error::InvalidInput(format!(
            "Frame {index} exceeds {MAX_FRAME_PIXELS} pixels"
        )));
    }

    log::debug!("Parsed {} frames", batch.frames.len());
    Ok(batch.frames)
}
