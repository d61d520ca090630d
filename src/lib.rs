//! Silhouette-based posture analysis.
//!
//! This library turns the outer contour of a seated subject into three
//! geometric posture indicators and a posture tier:
//! - **Spine angle**: deviation of the silhouette's best-fit axis from vertical
//! - **Shoulder tilt**: height difference between the topmost points of the
//!   left and right halves of the upper body band
//! - **Head offset**: horizontal distance between the top of the head and the
//!   middle of the bounding box
//!
//! Every frame is analysed independently; there is no state between calls.
//! Segmentation (thresholding and contour extraction) happens upstream.
//!
//! # Examples
//!
//! ## Extract and classify
//!
//! ```
//! use posture_sentinel::{classify, extract_features, FrameShape, Point, PostureLabel};
//!
//! // Upright box silhouette, sampled every 10 px along its outline
//! let mut contour = Vec::new();
//! contour.extend((200..=400).step_by(10).map(|x| Point::new(x, 100)));
//! contour.extend((110..=450).step_by(10).map(|y| Point::new(400, y)));
//! contour.extend((200..400).step_by(10).rev().map(|x| Point::new(x, 450)));
//! contour.extend((110..450).step_by(10).rev().map(|y| Point::new(200, y)));
//!
//! let frame = FrameShape::new(480, 640);
//! let metrics = extract_features(&contour, frame);
//! assert_eq!(classify(metrics.as_ref(), frame.height), PostureLabel::Optimal);
//!
//! // Nothing detected
//! assert!(extract_features(&[], frame).is_none());
//! assert_eq!(classify(None, frame.height), PostureLabel::Unknown);
//! ```
//!
//! ## Configured analyzer
//!
//! ```no_run
//! use posture_sentinel::{config::Config, analyzer::PostureAnalyzer, frames::load_frames};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("posture.yaml")?;
//! let analyzer = PostureAnalyzer::new(config)?;
//!
//! for frame in load_frames("frames.yaml")? {
//!     let assessment = analyzer.analyze_contours(&frame.contours, frame.shape());
//!     println!("{}", assessment.label);
//! }
//! # Ok(())
//! # }
//! ```

/// Point, frame and bounding-box types plus polygon helpers
pub mod geometry;

/// Contour rasterization into a binary silhouette mask
pub mod mask;

/// Orthogonal-distance line fitting
pub mod line_fit;

/// Posture feature extraction
pub mod features;

/// Posture tier classification
pub mod classifier;

/// Subject selection and per-frame analysis
pub mod analyzer;

/// Frame batch input
pub mod frames;

/// Error types and result handling
pub mod error;

/// Checked integer conversions
pub mod safe_cast;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

/// `OpenCV` contour interop
#[cfg(feature = "opencv")]
pub mod interop;

pub use classifier::{classify, PostureLabel};
pub use error::{Error, Result};
pub use features::{extract_features, Metrics};
pub use geometry::{BoundingBox, FrameShape, Point};
