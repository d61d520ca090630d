//! Binary silhouette raster built from a contour.
//!
//! Every raster row is assembled from spans: the even-odd interior of the
//! polygon sampled on integer pixel rows, plus the pixels each outline edge
//! passes through, so boundary pixels are always foreground. A mask covers a
//! window of the frame and only rows inside that window are visited, so the
//! cost follows the window size rather than the contour's coordinate range.

use crate::constants::MAX_FRAME_PIXELS;
use crate::geometry::{FrameShape, Point};
use crate::safe_cast::{f64_to_i64_clamp, i64_to_i32_saturating, i64_to_usize, usize_to_i32};
use crate::{Error, Result};
use ndarray::{s, Array2};
use std::ops::Range;

/// Binary raster marking the interior (and boundary) of a contour
#[derive(Debug, Clone)]
pub struct SilhouetteMask {
    /// Frame row of `data[[0, _]]`
    row0: i64,
    /// Frame column of `data[[_, 0]]`
    col0: i64,
    data: Array2<bool>,
}

impl SilhouetteMask {
    /// Rasterize `contour` over the whole frame
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the frame has more than
    /// `MAX_FRAME_PIXELS` pixels
    pub fn rasterize(contour: &[Point], frame: FrameShape) -> Result<Self> {
        Self::rasterize_window(contour, frame, 0..i64::from(frame.height), 0..i64::from(frame.width))
    }

    /// Rasterize `contour` over the `rows` x `cols` window of the frame
    ///
    /// The window is clipped to the frame first; pixels outside it are never
    /// visited.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the clipped window has more than
    /// `MAX_FRAME_PIXELS` pixels
    pub fn rasterize_window(
        contour: &[Point],
        frame: FrameShape,
        rows: Range<i64>,
        cols: Range<i64>,
    ) -> Result<Self> {
        let rows = clip_range(rows, frame.height);
        let cols = clip_range(cols, frame.width);
        let (n_rows, n_cols) = (rows.end - rows.start, cols.end - cols.start);

        let pixels = n_rows.unsigned_abs().saturating_mul(n_cols.unsigned_abs());
        if pixels > MAX_FRAME_PIXELS {
            return Err(Error::InvalidInput(format!(
                "Raster window {n_cols}x{n_rows} exceeds {MAX_FRAME_PIXELS} pixels"
            )));
        }

        let mut mask = Self {
            row0: rows.start,
            col0: cols.start,
            data: Array2::from_elem((i64_to_usize(n_rows)?, i64_to_usize(n_cols)?), false),
        };
        if pixels > 0 && !contour.is_empty() {
            mask.fill(contour, rows.end);
        }
        Ok(mask)
    }

    /// Window height in pixels
    #[must_use]
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Window width in pixels
    #[must_use]
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Frame coordinates `(x, y)` of the window's top-left pixel
    #[must_use]
    pub const fn origin(&self) -> (i64, i64) {
        (self.col0, self.row0)
    }

    /// Whether the pixel at (x, y) is foreground; reads outside the window are false
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|idx| self.data[idx])
    }

    /// Number of foreground pixels
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Borrow the underlying raster, indexed `[[row - origin.y, col - origin.x]]`
    #[must_use]
    pub fn as_array(&self) -> &Array2<bool> {
        &self.data
    }

    /// First foreground pixel of a rectangular region in row-major order
    ///
    /// The region is clipped to the window. The result is the topmost
    /// foreground pixel, leftmost among ties, in frame coordinates.
    #[must_use]
    pub fn topmost_in(&self, rows: Range<i64>, cols: Range<i64>) -> Option<Point> {
        let rows = local_range(rows, self.row0, self.height())?;
        let cols = local_range(cols, self.col0, self.width())?;

        for r in rows {
            let row = self.data.slice(s![r, cols.clone()]);
            if let Some(offset) = row.iter().position(|&v| v) {
                let x = self.col0 + i64::from(usize_to_i32(cols.start + offset).ok()?);
                let y = self.row0 + i64::from(usize_to_i32(r).ok()?);
                return Some(Point::new(i64_to_i32_saturating(x), i64_to_i32_saturating(y)));
            }
        }

        None
    }

    fn index(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let col = usize::try_from(x.checked_sub(self.col0)?).ok()?;
        let row = usize::try_from(y.checked_sub(self.row0)?).ok()?;
        (row < self.height() && col < self.width()).then_some((row, col))
    }

    /// Fill window rows up to frame row `rows_end` (exclusive)
    fn fill(&mut self, contour: &[Point], rows_end: i64) {
        let edges: Vec<Edge> = contour
            .iter()
            .zip(contour.iter().cycle().skip(1))
            .map(|(&a, &b)| Edge { a, b })
            .collect();

        let y_min = contour.iter().map(|p| i64::from(p.y)).min().unwrap_or(0);
        let y_max = contour.iter().map(|p| i64::from(p.y)).max().unwrap_or(-1);
        // Both bounds lie inside the contour's i32 extent here
        let first = i64_to_i32_saturating(self.row0.max(y_min));
        let last = i64_to_i32_saturating((rows_end - 1).min(y_max));

        let mut crossings: Vec<f64> = Vec::with_capacity(edges.len());
        for y in first..=last {
            let Ok(row) = i64_to_usize(i64::from(y) - self.row0) else {
                continue;
            };

            if edges.len() >= 3 {
                crossings.clear();
                crossings.extend(edges.iter().filter_map(|e| e.crossing(y)));
                crossings.sort_by(f64::total_cmp);
                for span in crossings.chunks_exact(2) {
                    self.fill_span(row, span[0].ceil(), span[1].floor());
                }
            }

            for edge in &edges {
                if let Some((lo, hi)) = edge.outline_span(y) {
                    self.fill_span(row, lo, hi);
                }
            }
        }
    }

    /// Set window row `row` from frame column `lo` to `hi` inclusive, clipped
    fn fill_span(&mut self, row: usize, lo: f64, hi: f64) {
        let Ok(width) = usize_to_i32(self.width()) else {
            return;
        };
        let last = self.col0 + i64::from(width) - 1;
        let start = f64_to_i64_clamp(lo, self.col0 - 1, last + 1).max(self.col0);
        let end = f64_to_i64_clamp(hi, self.col0 - 1, last + 1).min(last);
        if start > end {
            return;
        }

        let (Ok(start), Ok(end)) = (i64_to_usize(start - self.col0), i64_to_usize(end - self.col0)) else {
            return;
        };
        self.data.slice_mut(s![row, start..=end]).fill(true);
    }
}

/// One polygon edge from `a` to `b`
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: Point,
    b: Point,
}

impl Edge {
    /// x of the edge line at height `y`; only called for non-horizontal edges
    fn x_at(&self, y: f64) -> f64 {
        let (ax, ay) = (f64::from(self.a.x), f64::from(self.a.y));
        let (bx, by) = (f64::from(self.b.x), f64::from(self.b.y));
        ax + (y - ay) / (by - ay) * (bx - ax)
    }

    /// Even-odd crossing with row `y`, half-open so shared vertices count once
    fn crossing(&self, y: i32) -> Option<f64> {
        if (self.a.y <= y) == (self.b.y <= y) {
            return None;
        }
        Some(self.x_at(f64::from(y)))
    }

    /// Columns the edge covers on row `y`, as inclusive float bounds
    ///
    /// A non-horizontal edge covers the pixel centres it passes within half a
    /// row of `y`; steep edges that pass between centres take the nearest one.
    fn outline_span(&self, y: i32) -> Option<(f64, f64)> {
        let (lo_y, hi_y) = (self.a.y.min(self.b.y), self.a.y.max(self.b.y));
        if y < lo_y || y > hi_y {
            return None;
        }

        let (ax, bx) = (f64::from(self.a.x), f64::from(self.b.x));
        if self.a.y == self.b.y {
            return Some((ax.min(bx), ax.max(bx)));
        }

        let yf = f64::from(y);
        let x0 = self.x_at((yf - 0.5).max(f64::from(lo_y)));
        let x1 = self.x_at((yf + 0.5).min(f64::from(hi_y)));
        let (lo, hi) = (x0.min(x1).ceil(), x0.max(x1).floor());
        if lo <= hi {
            Some((lo, hi))
        } else {
            let x = self.x_at(yf).round();
            Some((x, x))
        }
    }
}

/// Intersect a frame-coordinate range with a window axis, as local indices
fn local_range(range: Range<i64>, origin: i64, len: usize) -> Option<Range<usize>> {
    let start = i64_to_usize(range.start.saturating_sub(origin).max(0)).ok()?.min(len);
    let end = i64_to_usize(range.end.saturating_sub(origin).max(0)).ok()?.min(len);
    (start < end).then_some(start..end)
}

fn clip_range(range: Range<i64>, len: u32) -> Range<i64> {
    let start = range.start.clamp(0, i64::from(len));
    let end = range.end.clamp(start, i64::from(len));
    start..end
}
