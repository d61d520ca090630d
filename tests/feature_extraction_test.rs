//! Feature extraction tests on synthetic silhouettes


use posture_sentinel::{
    classifier::{classify_with, ClassifierThresholds, TierThresholds},
    classify, extract_features, BoundingBox, FrameShape, Point, PostureLabel,
};
use test_helpers::{outline, rect_outline, rotated_rect_outline, seated_silhouette};

const VGA: FrameShape = FrameShape::new(480, 640);

#[test]
fn test_no_detection() {
    assert!(extract_features(&[], VGA).is_none());
    assert_eq!(classify(None, VGA.height), PostureLabel::Unknown);
}

#[test]
fn test_upright_symmetric_rectangle() {
    let contour = rect_outline(100, 50, 200, 400);
    let metrics = extract_features(&contour, VGA).expect("contour is not empty");

    assert_eq!(metrics.bbox, BoundingBox { x: 100, y: 50, width: 100, height: 350 });
    assert!(metrics.spine_angle_deg.abs() < 1e-6, "spine = {}", metrics.spine_angle_deg);
    assert_eq!(metrics.shoulder_tilt_px, Some(0.0));
    assert_eq!(metrics.head_offset_px, 0.0);
    assert_eq!(classify(Some(&metrics), VGA.height), PostureLabel::Optimal);
}

#[test]
fn test_corner_only_rectangle() {
    // Four vertices, as a polygon-simplified contour would report
    let contour = vec![
        Point::new(100, 50),
        Point::new(200, 50),
        Point::new(200, 400),
        Point::new(100, 400),
    ];
    let metrics = extract_features(&contour, VGA).unwrap();

    assert_eq!(metrics.spine_angle_deg, 0.0);
    assert!(!metrics.spine_measured);
    assert_eq!(metrics.left_shoulder, Some(Point::new(100, 50)));
    assert_eq!(metrics.right_shoulder, Some(Point::new(150, 50)));
    assert_eq!(metrics.shoulder_tilt_px, Some(0.0));
    // Top row is x = 100 and x = 200, median 150 = box centre
    assert_eq!(metrics.head_offset_px, 0.0);
    assert_eq!(classify(Some(&metrics), VGA.height), PostureLabel::Optimal);
}

#[test]
fn test_rotated_rectangle_spine_angle() {
    for theta in (5..=80).step_by(5) {
        let theta = f64::from(theta);
        for signed in [theta, -theta] {
            let contour = rotated_rect_outline((320.0, 240.0), 60.0, 300.0, signed);
            let metrics = extract_features(&contour, VGA).unwrap();
            assert!(
                (metrics.spine_angle_deg - theta).abs() < 1.0,
                "rotation {signed}: expected ~{theta}, got {}",
                metrics.spine_angle_deg
            );
            assert!(metrics.spine_measured);
        }
    }
}

#[test]
fn test_degenerate_contours_fall_back_to_vertical() {
    let cases: Vec<Vec<Point>> = vec![
        vec![Point::new(10, 10)],
        vec![Point::new(0, 0), Point::new(300, 5)],
        vec![Point::new(0, 0), Point::new(300, 5), Point::new(10, 200)],
        // Strongly tilted quadrilateral
        vec![
            Point::new(0, 0),
            Point::new(40, 20),
            Point::new(240, 220),
            Point::new(200, 240),
        ],
    ];

    for contour in cases {
        let metrics = extract_features(&contour, VGA).unwrap();
        assert_eq!(metrics.spine_angle_deg, 0.0, "contour {contour:?}");
        assert!(!metrics.spine_measured);
    }
}

#[test]
fn test_head_offset_tiers() {
    // Tall frame so the 100 px shoulder step stays below 3% of its height
    let frame = FrameShape::new(4000, 640);
    let cases = [
        (0, PostureLabel::Optimal),
        (30, PostureLabel::Optimal),
        (40, PostureLabel::Optimal),
        (41, PostureLabel::Adjust),
        (60, PostureLabel::Adjust),
        (80, PostureLabel::Adjust),
        (81, PostureLabel::Critical),
        (150, PostureLabel::Critical),
    ];

    for (delta, expected) in cases {
        let contour = seated_silhouette(delta);
        let metrics = extract_features(&contour, frame).unwrap();
        assert_eq!(metrics.head_offset_px, f64::from(delta), "delta {delta}");
        assert!(metrics.spine_angle_deg < 6.0, "delta {delta}: spine {}", metrics.spine_angle_deg);
        assert_eq!(classify(Some(&metrics), frame.height), expected, "delta {delta}");
    }
}

#[test]
fn test_off_centre_head_shifts_one_shoulder() {
    let frame = FrameShape::new(4000, 640);
    let metrics = extract_features(&seated_silhouette(60), frame).unwrap();

    // Head spans x 120..160, entirely in the left half
    assert_eq!(metrics.left_shoulder, Some(Point::new(120, 50)));
    assert_eq!(metrics.right_shoulder, Some(Point::new(200, 150)));
    assert_eq!(metrics.shoulder_tilt_px, Some(100.0));
}

#[test]
fn test_missing_right_shoulder() {
    // Narrow column on the left with a foot extending right at the bottom:
    // the right half of the upper band holds no silhouette pixels
    let contour = outline(&[(0, 0), (40, 0), (40, 300), (200, 300), (200, 340), (0, 340)]);
    let metrics = extract_features(&contour, VGA).unwrap();

    assert_eq!(metrics.left_shoulder, Some(Point::new(0, 0)));
    assert!(metrics.right_shoulder.is_none());
    assert!(metrics.shoulder_tilt_px.is_none());

    // Even a zero shoulder threshold cannot fire without a tilt value
    let mut strict = ClassifierThresholds::default();
    strict.critical.shoulder_tilt_pct = 0.0;
    strict.adjust.shoulder_tilt_pct = 0.0;
    assert_eq!(
        classify_with(Some(&metrics), VGA.height, &strict),
        classify(Some(&metrics), VGA.height)
    );
}

#[test]
fn test_missing_shoulder_label_uses_remaining_terms() {
    let contour = outline(&[(0, 0), (40, 0), (40, 300), (200, 300), (200, 340), (0, 340)]);
    let metrics = extract_features(&contour, VGA).unwrap();

    // Only the spine and head terms remain; disabling them leaves Optimal
    let never = TierThresholds {
        spine_angle_deg: f64::MAX,
        shoulder_tilt_pct: 0.0,
        head_offset_px: f64::MAX,
    };
    let thresholds = ClassifierThresholds { critical: never, adjust: never };
    assert_eq!(
        classify_with(Some(&metrics), VGA.height, &thresholds),
        PostureLabel::Optimal
    );
}

#[test]
fn test_extraction_is_stateless() {
    let contour = rotated_rect_outline((320.0, 240.0), 60.0, 300.0, 15.0);
    let first = extract_features(&contour, VGA);
    let _ = extract_features(&rect_outline(0, 0, 10, 10), VGA);
    let second = extract_features(&contour, VGA);
    assert_eq!(first, second);
}
