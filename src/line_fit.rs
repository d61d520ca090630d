//! Orthogonal-distance line fitting for contour point sets.
//!
//! The fitted direction is the principal eigenvector of the (weighted) point
//! covariance, which minimises the sum of squared perpendicular distances.
//! The Huber variant reweights points by their distance to the previous fit
//! and refits until the line stops moving.

use crate::constants::{DEFAULT_HUBER_C, EPSILON, LINE_FIT_CONVERGENCE_EPS, LINE_FIT_MAX_ITERATIONS};
use crate::geometry::Point;
use nalgebra::{Matrix2, SymmetricEigen, Vector2};
use serde::{Deserialize, Serialize};

/// Distance model used when fitting a line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum LineFitMethod {
    /// Plain total least squares
    #[default]
    LeastSquares,
    /// Iteratively reweighted fit with Huber weights, `c` in pixels
    Huber {
        /// Distance beyond which points are down-weighted
        c: f64,
    },
}

impl LineFitMethod {
    /// Huber fitting with the conventional tuning constant
    #[must_use]
    pub const fn huber() -> Self {
        Self::Huber { c: DEFAULT_HUBER_C }
    }
}

/// A fitted 2-D line: unit direction plus a point on the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLine {
    /// Unit direction `(vx, vy)`, canonicalised so that `vx >= 0`
    pub direction: (f64, f64),
    /// Point on the line (the weighted centroid)
    pub point: (f64, f64),
}

impl FittedLine {
    /// Signed angle between the line and the image x-axis, in degrees
    ///
    /// Lies in `(-90, 90]` because the direction has `vx >= 0`.
    #[must_use]
    pub fn angle_to_horizontal_deg(&self) -> f64 {
        self.direction.1.atan2(self.direction.0).to_degrees()
    }

    /// Unsigned deviation from the image y-axis, in degrees (0 = vertical)
    #[must_use]
    pub fn deviation_from_vertical_deg(&self) -> f64 {
        90.0 - self.angle_to_horizontal_deg().abs()
    }

    /// Perpendicular distance from `(x, y)` to the line
    #[must_use]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let (vx, vy) = self.direction;
        let (dx, dy) = (x - self.point.0, y - self.point.1);
        (dx * vy - dy * vx).abs()
    }
}

/// Fit a line to `points`, `None` when fewer than two points are given
#[must_use]
pub fn fit_line(points: &[Point], method: LineFitMethod) -> Option<FittedLine> {
    if points.len() < 2 {
        return None;
    }

    let pts: Vec<Vector2<f64>> = points
        .iter()
        .map(|p| Vector2::new(f64::from(p.x), f64::from(p.y)))
        .collect();
    let mut weights = vec![1.0; pts.len()];
    let mut line = weighted_fit(&pts, &weights)?;

    let LineFitMethod::Huber { c } = method else {
        return Some(line);
    };

    for iteration in 0..LINE_FIT_MAX_ITERATIONS {
        for (w, p) in weights.iter_mut().zip(&pts) {
            let r = line.distance_to(p.x, p.y);
            *w = if r <= c { 1.0 } else { c / r };
        }

        let next = weighted_fit(&pts, &weights)?;
        let dot = next.direction.0 * line.direction.0 + next.direction.1 * line.direction.1;
        let shift = (next.point.0 - line.point.0).hypot(next.point.1 - line.point.1);
        line = next;

        if (1.0 - dot.abs()) < LINE_FIT_CONVERGENCE_EPS && shift < LINE_FIT_CONVERGENCE_EPS {
            log::trace!("Huber line fit converged after {} iterations", iteration + 1);
            break;
        }
    }

    Some(line)
}

fn weighted_fit(pts: &[Vector2<f64>], weights: &[f64]) -> Option<FittedLine> {
    let total: f64 = weights.iter().sum();
    if total < EPSILON {
        return None;
    }

    let centroid = pts
        .iter()
        .zip(weights)
        .fold(Vector2::<f64>::zeros(), |acc, (p, &w)| acc + p * w)
        / total;

    let covariance = pts
        .iter()
        .zip(weights)
        .fold(Matrix2::<f64>::zeros(), |acc, (p, &w)| {
            let d = p - centroid;
            acc + d * d.transpose() * w
        })
        / total;

    let eigen = SymmetricEigen::new(covariance);
    let major = eigen.eigenvectors.column(eigen.eigenvalues.imax()).into_owned();
    let norm = major.norm();
    if norm < EPSILON {
        return None;
    }

    let mut direction = major / norm;
    if direction.x < 0.0 || (direction.x == 0.0 && direction.y < 0.0) {
        direction = -direction;
    }

    Some(FittedLine {
        direction: (direction.x, direction.y),
        point: (centroid.x, centroid.y),
    })
}
