//! Shared geometric types: contour points, frame shape and bounding boxes.

use crate::safe_cast::{i64_to_i32_saturating, i64_to_u32_saturating};
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in image space (x to the right, y downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Pixel dimensions of the source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameShape {
    /// Number of rows
    pub height: u32,
    /// Number of columns
    pub width: u32,
}

impl FrameShape {
    /// Create a frame shape from (height, width), matching the row-major order
    /// image libraries report
    #[must_use]
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Whether the frame has no pixels
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }
}

/// Axis-aligned box enclosing a contour
///
/// `width` and `height` are `max - min` of the enclosed coordinates, so a
/// single point yields a zero-sized box. They are unsigned because a
/// contour spanning the whole `i32` range is wider than `i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl BoundingBox {
    /// Compute the bounding box of a point set, `None` when empty
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            x: min_x,
            y: min_y,
            width: i64_to_u32_saturating(i64::from(max_x) - i64::from(min_x)),
            height: i64_to_u32_saturating(i64::from(max_y) - i64::from(min_y)),
        })
    }

    /// Horizontal midline, `x + width / 2` with integer division
    #[must_use]
    pub fn center_x(&self) -> i32 {
        i64_to_i32_saturating(i64::from(self.x) + i64::from(self.width / 2))
    }

    /// Right edge (inclusive maximum x of the enclosed points)
    #[must_use]
    pub fn right(&self) -> i32 {
        i64_to_i32_saturating(i64::from(self.x) + i64::from(self.width))
    }

    /// Bottom edge (inclusive maximum y of the enclosed points)
    #[must_use]
    pub fn bottom(&self) -> i32 {
        i64_to_i32_saturating(i64::from(self.y) + i64::from(self.height))
    }

    /// Whether a point lies inside or on the box
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Unsigned polygon area by the shoelace formula
///
/// The polygon is implicitly closed (last point connects to the first).
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    // Each cross term can reach 2^63, so accumulate in i128
    let twice_area: i128 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| {
            i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y)
        })
        .sum();

    #[allow(clippy::cast_precision_loss)] // Area is reported as a float anyway
    let area = twice_area.unsigned_abs() as f64 / 2.0;
    area
}
