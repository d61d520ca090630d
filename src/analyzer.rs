//! Per-frame posture analysis: subject selection, extraction, classification.

use crate::classifier::{classify_with, PostureLabel};
use crate::config::Config;
use crate::features::{extract_features_with, Metrics};
use crate::geometry::{polygon_area, FrameShape, Point};
use crate::Result;
use serde::Serialize;

/// Outcome of analysing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Extracted metrics, absent when no silhouette was found
    pub metrics: Option<Metrics>,
    /// Posture tier
    pub label: PostureLabel,
}

/// Stateless posture analyzer bound to a validated configuration
///
/// Each call depends only on its arguments, so one analyzer can be shared
/// between frame-processing threads.
#[derive(Debug, Clone)]
pub struct PostureAnalyzer {
    config: Config,
}

impl PostureAnalyzer {
    /// Create an analyzer after validating the configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the configuration is invalid
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Initializing PostureAnalyzer (line fit: {:?}, band fraction: {})",
            config.extraction.line_fit,
            config.extraction.upper_band_fraction
        );
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyse the subject contour of one frame
    #[must_use]
    pub fn analyze(&self, contour: &[Point], frame: FrameShape) -> Assessment {
        let metrics = extract_features_with(contour, frame, &self.config.extraction);
        let label = classify_with(metrics.as_ref(), frame.height, &self.config.classification);

        if let Some(m) = &metrics {
            log::debug!(
                "Frame {}x{}: {} (spine {:.1}°, shoulder tilt {:?} px, head offset {:.0} px)",
                frame.width,
                frame.height,
                label,
                m.spine_angle_deg,
                m.shoulder_tilt_px,
                m.head_offset_px
            );
            if !m.spine_measured {
                log::debug!("Contour has {} points, spine angle not measured", contour.len());
            }
        } else {
            log::debug!("Frame {}x{}: no silhouette", frame.width, frame.height);
        }

        Assessment { metrics, label }
    }

    /// Pick the subject among all contours of a frame, then analyse it
    #[must_use]
    pub fn analyze_contours<C: AsRef<[Point]>>(&self, contours: &[C], frame: FrameShape) -> Assessment {
        let subject = select_subject(contours, self.config.input.min_contour_area).unwrap_or(&[]);
        self.analyze(subject, frame)
    }
}

/// Largest contour by polygon area whose area exceeds `min_area`
///
/// Ties keep the earliest contour.
#[must_use]
pub fn select_subject<C: AsRef<[Point]>>(contours: &[C], min_area: f64) -> Option<&[Point]> {
    let mut best: Option<(&[Point], f64)> = None;
    for contour in contours {
        let contour = contour.as_ref();
        let area = polygon_area(contour);
        if area <= min_area {
            continue;
        }
        if best.map_or(true, |(_, best_area)| area > best_area) {
            best = Some((contour, area));
        }
    }

    if best.is_none() && !contours.is_empty() {
        log::trace!("No contour above {} px² among {}", min_area, contours.len());
    }

    best.map(|(contour, _)| contour)
}
