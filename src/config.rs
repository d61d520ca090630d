//! Configuration management for the posture sentinel

use crate::classifier::{ClassifierThresholds, TierThresholds};
use crate::constants::{DEFAULT_MIN_CONTOUR_AREA, MIN_SPINE_FIT_POINTS, UPPER_BAND_FRACTION};
use crate::line_fit::LineFitMethod;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feature extraction parameters
    pub extraction: ExtractionConfig,

    /// Classification thresholds
    pub classification: ClassifierThresholds,

    /// Contour input handling
    pub input: InputConfig,
}

/// Feature extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum contour points before the spine line is fitted
    pub min_fit_points: usize,

    /// Fraction of the bounding-box height searched for shoulders (0.0-1.0)
    pub upper_band_fraction: f64,

    /// Rows below the topmost contour row still counted as head points
    pub head_row_tolerance_px: u32,

    /// Line fitting method for the spine axis
    pub line_fit: LineFitMethod,
}

/// Contour input handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Contours with a smaller polygon area are not considered the subject
    pub min_contour_area: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_fit_points: MIN_SPINE_FIT_POINTS,
            upper_band_fraction: UPPER_BAND_FRACTION,
            head_row_tolerance_px: 0,
            line_fit: LineFitMethod::LeastSquares,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_contour_area: DEFAULT_MIN_CONTOUR_AREA,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.min_fit_points < 2 {
            return Err(Error::ConfigError(
                "Minimum fit points must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&extraction.upper_band_fraction) {
            return Err(Error::ConfigError(
                "Upper band fraction must be between 0.0 and 1.0".to_string(),
            ));
        }
        if let LineFitMethod::Huber { c } = extraction.line_fit {
            if !(c.is_finite() && c > 0.0) {
                return Err(Error::ConfigError(format!(
                    "Huber constant must be positive, got {c}"
                )));
            }
        }

        validate_tier("critical", &self.classification.critical)?;
        validate_tier("adjust", &self.classification.adjust)?;

        let (critical, adjust) = (&self.classification.critical, &self.classification.adjust);
        if adjust.spine_angle_deg > critical.spine_angle_deg
            || adjust.shoulder_tilt_pct > critical.shoulder_tilt_pct
            || adjust.head_offset_px > critical.head_offset_px
        {
            return Err(Error::ConfigError(
                "Adjust thresholds must not exceed critical thresholds".to_string(),
            ));
        }

        if !(self.input.min_contour_area.is_finite() && self.input.min_contour_area >= 0.0) {
            return Err(Error::ConfigError(
                "Minimum contour area must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_tier(name: &str, tier: &TierThresholds) -> Result<()> {
    let values = [
        ("spine_angle_deg", tier.spine_angle_deg),
        ("shoulder_tilt_pct", tier.shoulder_tilt_pct),
        ("head_offset_px", tier.head_offset_px),
    ];
    for (field, value) in values {
        if !(value.is_finite() && value >= 0.0) {
            return Err(Error::ConfigError(format!(
                "Threshold {name}.{field} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Posture Sentinel Configuration

# Feature extraction
extraction:
  min_fit_points: 5
  upper_band_fraction: 0.35
  head_row_tolerance_px: 0
  line_fit:
    method: least_squares

# Classification thresholds (a metric strictly above a limit triggers the tier)
classification:
  critical:
    spine_angle_deg: 12.0
    shoulder_tilt_pct: 6.0
    head_offset_px: 80.0
  adjust:
    spine_angle_deg: 6.0
    shoulder_tilt_pct: 3.0
    head_offset_px: 40.0

# Contour input
input:
  min_contour_area: 2000.0
"#;
