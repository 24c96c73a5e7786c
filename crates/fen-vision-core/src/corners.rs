//! Ordering of unordered board-corner candidates.

use crate::GEOMETRY_EPS;
use nalgebra::Point2;
use serde::Serialize;

/// Minimal enclosed area (px²) of an ordered board quadrilateral.
pub const MIN_QUAD_AREA: f64 = 1e-6;

/// Errors produced while ordering corner candidates.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerError {
    #[error("need 4 board corners, found {found}")]
    InsufficientCorners { found: usize },
    #[error("board corners are coincident or collinear")]
    DegenerateCorners,
}

/// Board quadrilateral in image pixels, ordered top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Quad {
    corners: [Point2<f64>; 4],
}

impl Quad {
    /// Wrap corners that are already in (tl, tr, br, bl) order.
    pub fn from_ordered(corners: [Point2<f64>; 4]) -> Self {
        Self { corners }
    }

    #[inline]
    pub fn corners(&self) -> [Point2<f64>; 4] {
        self.corners
    }

    #[inline]
    pub fn top_left(&self) -> Point2<f64> {
        self.corners[0]
    }

    #[inline]
    pub fn top_right(&self) -> Point2<f64> {
        self.corners[1]
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f64> {
        self.corners[2]
    }

    #[inline]
    pub fn bottom_left(&self) -> Point2<f64> {
        self.corners[3]
    }

    /// Unsigned shoelace area in px².
    pub fn area(&self) -> f64 {
        let c = &self.corners;
        let mut twice = 0.0;
        for k in 0..4 {
            let a = c[k];
            let b = c[(k + 1) % 4];
            twice += a.x * b.y - b.x * a.y;
        }
        0.5 * twice.abs()
    }
}

/// Order corner candidates into (top-left, top-right, bottom-right, bottom-left).
///
/// Top-left has the smallest `x + y`, bottom-right the largest; top-right has
/// the smallest `y - x`, bottom-left the largest. On exact ties the earliest
/// candidate wins. This is valid for roughly front-facing boards (rotation
/// within 45° of axis alignment).
///
/// Extra candidates beyond four take part in the same extremum selection.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(points), fields(n = points.len())))]
pub fn normalize_corners(points: &[Point2<f64>]) -> Result<Quad, CornerError> {
    if points.len() < 4 {
        return Err(CornerError::InsufficientCorners {
            found: points.len(),
        });
    }
    if points.len() > 4 {
        log::debug!(
            "{} corner candidates, keeping the extreme four",
            points.len()
        );
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(CornerError::DegenerateCorners);
    }

    let sum = |p: &Point2<f64>| p.x + p.y;
    let diff = |p: &Point2<f64>| p.y - p.x;

    let tl = points[argmin(points, sum)];
    let br = points[argmax(points, sum)];
    let tr = points[argmin(points, diff)];
    let bl = points[argmax(points, diff)];

    let quad = Quad::from_ordered([tl, tr, br, bl]);

    for i in 0..4 {
        for j in (i + 1)..4 {
            if (quad.corners[i] - quad.corners[j]).norm() < GEOMETRY_EPS {
                return Err(CornerError::DegenerateCorners);
            }
        }
    }
    if quad.area() < MIN_QUAD_AREA {
        return Err(CornerError::DegenerateCorners);
    }

    Ok(quad)
}

fn argmin(points: &[Point2<f64>], key: impl Fn(&Point2<f64>) -> f64) -> usize {
    let mut best = 0;
    let mut best_val = key(&points[0]);
    for (i, p) in points.iter().enumerate().skip(1) {
        let v = key(p);
        if v < best_val {
            best = i;
            best_val = v;
        }
    }
    best
}

fn argmax(points: &[Point2<f64>], key: impl Fn(&Point2<f64>) -> f64) -> usize {
    argmin(points, |p| -key(p))
}
