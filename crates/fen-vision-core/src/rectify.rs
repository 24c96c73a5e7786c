//! Mapping between the board photograph and the canonical top-down frame.

use crate::{homography_from_4pt, Homography, Quad, GEOMETRY_EPS};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("board quadrilateral is degenerate (zero-length side or singular correspondence)")]
    DegenerateQuadrilateral,
    #[error("homography maps the point to infinity (zero homogeneous scale)")]
    SingularTransform,
}

/// Pixel size of the canonical rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSize {
    pub width: u32,
    pub height: u32,
}

impl CanonicalSize {
    /// Canonical-frame corners matching (tl, tr, br, bl).
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let w = (self.width - 1) as f64;
        let h = (self.height - 1) as f64;
        [
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }
}

/// Projective mapping of a board quadrilateral onto its canonical rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectification {
    pub h_rect_from_img: Homography,
    pub h_img_from_rect: Homography,
    pub size: CanonicalSize,
}

impl Rectification {
    /// Map an image point into the canonical frame.
    pub fn to_canonical(&self, p: Point2<f64>) -> Result<Point2<f64>, GeometryError> {
        transform_point(&self.h_rect_from_img, p)
    }

    /// Map a canonical-frame point back into the image.
    pub fn to_image(&self, p: Point2<f64>) -> Result<Point2<f64>, GeometryError> {
        transform_point(&self.h_img_from_rect, p)
    }
}

/// Canonical rectangle size: the longer of each pair of opposite sides,
/// floored, at least one pixel.
fn canonical_size(quad: &Quad) -> CanonicalSize {
    let [tl, tr, br, bl] = quad.corners();
    let width = (bl - br).norm().max((tl - tr).norm());
    let height = (tl - bl).norm().max((tr - br).norm());
    CanonicalSize {
        width: (width.floor() as u32).max(1),
        height: (height.floor() as u32).max(1),
    }
}

/// Compute the homography from the ordered board quadrilateral onto
/// `(0,0)`, `(W-1,0)`, `(W-1,H-1)`, `(0,H-1)`.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(quad)))]
pub fn compute_homography(quad: &Quad) -> Result<Rectification, GeometryError> {
    let c = quad.corners();
    for k in 0..4 {
        if (c[k] - c[(k + 1) % 4]).norm() < GEOMETRY_EPS {
            return Err(GeometryError::DegenerateQuadrilateral);
        }
    }

    let size = canonical_size(quad);
    let dst = size.corners();

    let h_rect_from_img =
        homography_from_4pt(&c, &dst).ok_or(GeometryError::DegenerateQuadrilateral)?;
    let h_img_from_rect = h_rect_from_img
        .inverse()
        .ok_or(GeometryError::DegenerateQuadrilateral)?;

    log::debug!(
        "canonical rectangle {}x{} from quad {:?}",
        size.width,
        size.height,
        c
    );

    Ok(Rectification {
        h_rect_from_img,
        h_img_from_rect,
        size,
    })
}

/// Apply `h` to `p` in homogeneous coordinates and renormalize.
#[inline]
pub fn transform_point(h: &Homography, p: Point2<f64>) -> Result<Point2<f64>, GeometryError> {
    let v = h.apply_homogeneous(p);
    let w = v[2];
    if !w.is_finite() || w.abs() < GEOMETRY_EPS {
        return Err(GeometryError::SingularTransform);
    }
    Ok(Point2::new(v[0] / w, v[1] / w))
}
