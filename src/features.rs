//! Posture feature extraction from a silhouette contour.
//!
//! Given the outer contour of the subject and the frame dimensions this
//! computes the bounding box, the lateral offset of the head, the height
//! difference between the two shoulders and the tilt of the body axis.
//! Extraction is a pure function of its inputs; an empty contour simply
//! yields no metrics.

use crate::config::ExtractionConfig;
use crate::geometry::{BoundingBox, FrameShape, Point};
use crate::line_fit::fit_line;
use crate::mask::SilhouetteMask;
use crate::safe_cast::f64_to_i64_clamp;
use serde::{Deserialize, Serialize};

/// Geometric posture indicators for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Deviation of the body axis from vertical, degrees (0 = upright)
    pub spine_angle_deg: f64,
    /// Vertical distance between the shoulder points, when both were found
    pub shoulder_tilt_px: Option<f64>,
    /// Horizontal distance between the top of the head and the box midline
    pub head_offset_px: f64,
    /// Box enclosing the contour
    pub bbox: BoundingBox,
    /// Topmost silhouette pixel in the left half of the upper band
    pub left_shoulder: Option<Point>,
    /// Topmost silhouette pixel in the right half of the upper band
    pub right_shoulder: Option<Point>,
    /// False when the contour was too small to fit an axis and the spine
    /// angle is the 0-degree fallback rather than a measurement
    pub spine_measured: bool,
}

/// Extract metrics with the default extraction parameters
///
/// Returns `None` when the contour is empty (nothing detected this frame).
#[must_use]
pub fn extract_features(contour: &[Point], frame: FrameShape) -> Option<Metrics> {
    extract_features_with(contour, frame, &ExtractionConfig::default())
}

/// Extract metrics with explicit extraction parameters
#[must_use]
pub fn extract_features_with(
    contour: &[Point],
    frame: FrameShape,
    config: &ExtractionConfig,
) -> Option<Metrics> {
    let bbox = BoundingBox::from_points(contour)?;

    let head_offset_px = head_offset(contour, &bbox, config.head_row_tolerance_px);

    let (left_shoulder, right_shoulder) =
        find_shoulders(contour, frame, &bbox, config.upper_band_fraction);
    let shoulder_tilt_px = match (left_shoulder, right_shoulder) {
        (Some(l), Some(r)) => Some((f64::from(l.y) - f64::from(r.y)).abs()),
        _ => None,
    };

    let (spine_angle_deg, spine_measured) = spine_angle(contour, config);

    log::trace!(
        "Extracted features: bbox={:?} spine={:.2} shoulder_tilt={:?} head_offset={:.1}",
        bbox,
        spine_angle_deg,
        shoulder_tilt_px,
        head_offset_px
    );

    Some(Metrics {
        spine_angle_deg,
        shoulder_tilt_px,
        head_offset_px,
        bbox,
        left_shoulder,
        right_shoulder,
        spine_measured,
    })
}

/// Distance from the median x of the topmost contour row to the box midline
///
/// With `tolerance == 0` only points exactly on the minimum y count.
fn head_offset(contour: &[Point], bbox: &BoundingBox, tolerance: u32) -> f64 {
    let top_limit = i64::from(bbox.y) + i64::from(tolerance);
    let mut xs: Vec<i32> = contour
        .iter()
        .filter(|p| i64::from(p.y) <= top_limit)
        .map(|p| p.x)
        .collect();
    xs.sort_unstable();

    let n = xs.len();
    let median = match n {
        0 => return 0.0,
        _ if n % 2 == 0 => (f64::from(xs[n / 2 - 1]) + f64::from(xs[n / 2])) / 2.0,
        _ => f64::from(xs[n / 2]),
    };

    (median.trunc() - f64::from(bbox.center_x())).abs()
}

/// Topmost foreground pixel in each half of the upper band of the box
///
/// Only the band itself (clipped to the frame) is rasterized.
fn find_shoulders(
    contour: &[Point],
    frame: FrameShape,
    bbox: &BoundingBox,
    band_fraction: f64,
) -> (Option<Point>, Option<Point>) {
    let height = i64::from(bbox.height);
    let band_height = f64_to_i64_clamp((f64::from(bbox.height) * band_fraction).floor(), 0, height);
    let top = i64::from(bbox.y);
    let rows = top..top + band_height;
    let (left, mid, right) = (
        i64::from(bbox.x),
        i64::from(bbox.center_x()),
        i64::from(bbox.right()),
    );

    let mask = match SilhouetteMask::rasterize_window(contour, frame, rows.clone(), left..right) {
        Ok(mask) => mask,
        Err(e) => {
            log::warn!("Skipping shoulder search: {}", e);
            return (None, None);
        }
    };

    (
        mask.topmost_in(rows.clone(), left..mid),
        mask.topmost_in(rows, mid..right),
    )
}

/// Body-axis deviation from vertical and whether it was actually measured
fn spine_angle(contour: &[Point], config: &ExtractionConfig) -> (f64, bool) {
    if contour.len() < config.min_fit_points {
        return (0.0, false);
    }

    match fit_line(contour, config.line_fit) {
        Some(line) => (line.deviation_from_vertical_deg().max(0.0), true),
        None => (0.0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_fit::LineFitMethod;
    use proptest::prelude::*;

    /// Densely sampled rectangle outline, clockwise from the top-left corner
    fn rect_outline(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
        let mut pts = Vec::new();
        pts.extend((x0..x1).map(|x| Point::new(x, y0)));
        pts.extend((y0..y1).map(|y| Point::new(x1, y)));
        pts.extend((x0 + 1..=x1).rev().map(|x| Point::new(x, y1)));
        pts.extend((y0 + 1..=y1).rev().map(|y| Point::new(x0, y)));
        pts
    }

    #[test]
    fn test_empty_contour_yields_nothing() {
        assert!(extract_features(&[], FrameShape::new(480, 640)).is_none());
    }

    #[test]
    fn test_upright_rectangle() {
        let contour = rect_outline(100, 50, 200, 400);
        let metrics = extract_features(&contour, FrameShape::new(480, 640)).unwrap();

        assert_eq!(metrics.bbox, BoundingBox { x: 100, y: 50, width: 100, height: 350 });
        assert!(metrics.spine_angle_deg.abs() < 1e-6);
        assert!(metrics.spine_measured);
        assert_eq!(metrics.head_offset_px, 0.0);
        assert_eq!(metrics.left_shoulder, Some(Point::new(100, 50)));
        assert_eq!(metrics.right_shoulder, Some(Point::new(150, 50)));
        assert_eq!(metrics.shoulder_tilt_px, Some(0.0));
    }

    #[test]
    fn test_head_offset_median_of_top_row() {
        // Pointed "head" at x = 20 on top of a 0..100 wide body
        let contour = vec![
            Point::new(20, 0),
            Point::new(30, 10),
            Point::new(100, 10),
            Point::new(100, 200),
            Point::new(0, 200),
            Point::new(0, 10),
            Point::new(10, 10),
        ];
        let metrics = extract_features(&contour, FrameShape::new(300, 300)).unwrap();
        assert_eq!(metrics.head_offset_px, 30.0);
    }

    #[test]
    fn test_head_offset_even_count_truncates() {
        let bbox = BoundingBox { x: 0, y: 0, width: 10, height: 10 };
        let contour = vec![Point::new(2, 0), Point::new(5, 0), Point::new(9, 10)];
        // median(2, 5) = 3.5 -> 3, centre 5
        assert_eq!(head_offset(&contour, &bbox, 0), 2.0);
    }

    #[test]
    fn test_head_offset_tolerance_band() {
        let bbox = BoundingBox { x: 0, y: 0, width: 100, height: 100 };
        let contour = vec![
            Point::new(10, 0),
            Point::new(50, 1),
            Point::new(52, 1),
            Point::new(100, 100),
        ];
        assert_eq!(head_offset(&contour, &bbox, 0), 40.0);
        assert_eq!(head_offset(&contour, &bbox, 1), 0.0);
    }

    #[test]
    fn test_few_points_fall_back_to_vertical() {
        let contour = vec![
            Point::new(0, 0),
            Point::new(100, 10),
            Point::new(110, 20),
            Point::new(5, 30),
        ];
        let metrics = extract_features(&contour, FrameShape::new(100, 200)).unwrap();
        assert_eq!(metrics.spine_angle_deg, 0.0);
        assert!(!metrics.spine_measured);
    }

    #[test]
    fn test_band_fraction_controls_shoulder_search() {
        let contour = rect_outline(10, 10, 50, 100);
        let config = ExtractionConfig {
            upper_band_fraction: 0.0,
            ..ExtractionConfig::default()
        };
        let metrics = extract_features_with(&contour, FrameShape::new(200, 200), &config).unwrap();
        assert!(metrics.left_shoulder.is_none());
        assert!(metrics.right_shoulder.is_none());
        assert!(metrics.shoulder_tilt_px.is_none());
    }

    #[test]
    fn test_huber_configuration_is_used() {
        let contour = rect_outline(100, 50, 200, 400);
        let config = ExtractionConfig {
            line_fit: LineFitMethod::huber(),
            ..ExtractionConfig::default()
        };
        let metrics = extract_features_with(&contour, FrameShape::new(480, 640), &config).unwrap();
        assert!(metrics.spine_angle_deg < 1.0);
    }

    fn contour_strategy() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((-50i32..700, -50i32..530).prop_map(Point::from), 0..60)
    }

    fn coordinate() -> impl Strategy<Value = i32> {
        prop_oneof![any::<i32>(), -5000i32..5000]
    }

    fn frame_strategy() -> impl Strategy<Value = FrameShape> {
        prop_oneof![
            (0u32..=2048, 0u32..=2048).prop_map(|(h, w)| FrameShape::new(h, w)),
            (any::<u32>(), any::<u32>()).prop_map(|(h, w)| FrameShape::new(h, w)),
        ]
    }

    // Property-based tests
    proptest! {
        #[test]
        fn prop_full_range_inputs_never_abort(
            contour in prop::collection::vec((coordinate(), coordinate()).prop_map(Point::from), 0..40),
            frame in frame_strategy()
        ) {
            let Some(m) = extract_features(&contour, frame) else {
                prop_assert!(contour.is_empty());
                return Ok(());
            };

            prop_assert!((0.0..=90.0).contains(&m.spine_angle_deg));
            prop_assert!(m.head_offset_px >= 0.0);
            prop_assert!(m.head_offset_px <= f64::from(m.bbox.width));
            prop_assert!(contour.iter().all(|p| m.bbox.contains(*p)));
            for shoulder in [m.left_shoulder, m.right_shoulder].into_iter().flatten() {
                prop_assert!(m.bbox.contains(shoulder));
                prop_assert!(shoulder.x >= 0 && shoulder.y >= 0);
            }
            prop_assert_eq!(
                m.shoulder_tilt_px.is_some(),
                m.left_shoulder.is_some() && m.right_shoulder.is_some()
            );
            let _ = crate::classifier::classify(Some(&m), frame.height);
        }

        #[test]
        fn prop_metrics_stay_in_range(contour in contour_strategy()) {
            let frame = FrameShape::new(480, 640);
            let Some(m) = extract_features(&contour, frame) else {
                prop_assert!(contour.is_empty());
                return Ok(());
            };

            prop_assert!((0.0..=90.0).contains(&m.spine_angle_deg));
            prop_assert!(m.head_offset_px >= 0.0);
            prop_assert!(m.head_offset_px <= f64::from(m.bbox.width));
            prop_assert!(contour.iter().all(|p| m.bbox.contains(*p)));

            for shoulder in [m.left_shoulder, m.right_shoulder].into_iter().flatten() {
                prop_assert!(m.bbox.contains(shoulder));
            }
            prop_assert_eq!(
                m.shoulder_tilt_px.is_some(),
                m.left_shoulder.is_some() && m.right_shoulder.is_some()
            );
            if let Some(tilt) = m.shoulder_tilt_px {
                prop_assert!(tilt >= 0.0 && tilt <= f64::from(m.bbox.height));
            }
        }

        #[test]
        fn prop_spine_angle_ignores_translation(
            contour in prop::collection::vec((0i32..300, 0i32..300).prop_map(Point::from), 5..40),
            dx in 0i32..100,
            dy in -100i32..100
        ) {
            let frame = FrameShape::new(480, 640);
            let shifted: Vec<Point> = contour.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect();
            let a = extract_features(&contour, frame).unwrap();
            let b = extract_features(&shifted, frame).unwrap();
            prop_assert!((a.spine_angle_deg - b.spine_angle_deg).abs() < 1e-3);
            prop_assert_eq!(a.head_offset_px, b.head_offset_px);
        }
    }
}
