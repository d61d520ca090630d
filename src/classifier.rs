//! Threshold-based posture classification.

use crate::constants::{
    ADJUST_HEAD_OFFSET_PX, ADJUST_SHOULDER_TILT_PCT, ADJUST_SPINE_ANGLE_DEG, CRITICAL_HEAD_OFFSET_PX,
    CRITICAL_SHOULDER_TILT_PCT, CRITICAL_SPINE_ANGLE_DEG,
};
use crate::features::Metrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete posture tier for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostureLabel {
    /// No metric exceeds the adjust thresholds
    Optimal,
    /// At least one metric exceeds an adjust threshold
    Adjust,
    /// At least one metric exceeds a critical threshold
    Critical,
    /// Nothing was detected in the frame
    Unknown,
}

impl PostureLabel {
    /// All labels in display order
    pub const ALL: [Self; 4] = [Self::Optimal, Self::Adjust, Self::Critical, Self::Unknown];

    /// Label name as shown to users
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Adjust => "Adjust",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PostureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Limits for one tier; a metric strictly above its limit triggers the tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Spine deviation from vertical, degrees
    pub spine_angle_deg: f64,
    /// Shoulder tilt as a percentage of frame height
    pub shoulder_tilt_pct: f64,
    /// Head offset in absolute pixels
    pub head_offset_px: f64,
}

impl TierThresholds {
    fn exceeded_by(&self, metrics: &Metrics, shoulder_pct: Option<f64>) -> bool {
        metrics.spine_angle_deg > self.spine_angle_deg
            || shoulder_pct.is_some_and(|pct| pct > self.shoulder_tilt_pct)
            || metrics.head_offset_px > self.head_offset_px
    }
}

/// Threshold table, checked critical first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Limits for the `Critical` tier
    pub critical: TierThresholds,
    /// Limits for the `Adjust` tier
    pub adjust: TierThresholds,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            critical: TierThresholds {
                spine_angle_deg: CRITICAL_SPINE_ANGLE_DEG,
                shoulder_tilt_pct: CRITICAL_SHOULDER_TILT_PCT,
                head_offset_px: CRITICAL_HEAD_OFFSET_PX,
            },
            adjust: TierThresholds {
                spine_angle_deg: ADJUST_SPINE_ANGLE_DEG,
                shoulder_tilt_pct: ADJUST_SHOULDER_TILT_PCT,
                head_offset_px: ADJUST_HEAD_OFFSET_PX,
            },
        }
    }
}

/// Classify metrics with the default thresholds
#[must_use]
pub fn classify(metrics: Option<&Metrics>, frame_height: u32) -> PostureLabel {
    classify_with(metrics, frame_height, &ClassifierThresholds::default())
}

/// Classify metrics against an explicit threshold table
///
/// Shoulder tilt is normalised by frame height; when the tilt is missing (or
/// the frame height is zero) that term never triggers a tier.
#[must_use]
pub fn classify_with(
    metrics: Option<&Metrics>,
    frame_height: u32,
    thresholds: &ClassifierThresholds,
) -> PostureLabel {
    let Some(metrics) = metrics else {
        return PostureLabel::Unknown;
    };

    let shoulder_pct = metrics
        .shoulder_tilt_px
        .filter(|_| frame_height > 0)
        .map(|tilt| tilt / f64::from(frame_height) * 100.0);

    if thresholds.critical.exceeded_by(metrics, shoulder_pct) {
        PostureLabel::Critical
    } else if thresholds.adjust.exceeded_by(metrics, shoulder_pct) {
        PostureLabel::Adjust
    } else {
        PostureLabel::Optimal
    }
}
