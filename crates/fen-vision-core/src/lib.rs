//! Geometric core for reading a board position from a photograph.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete object detector or image type. Given four
//! unordered board-corner candidates it produces an ordered [`Quad`], a
//! projective [`Homography`] into a canonical axis-aligned rectangle, and
//! point transforms between the two frames.
//!
//! ## Quickstart
//!
//! ```
//! use fen_vision_core::{compute_homography, normalize_corners};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corners = [
//!     Point2::new(800.0, 800.0),
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.0, 800.0),
//!     Point2::new(800.0, 0.0),
//! ];
//! let quad = normalize_corners(&corners)?;
//! let rect = compute_homography(&quad)?;
//! assert_eq!((rect.size.width, rect.size.height), (800, 800));
//!
//! let p = rect.to_canonical(Point2::new(50.0, 50.0))?;
//! assert!(p.x < 100.0 && p.y < 100.0);
//! # Ok(())
//! # }
//! ```

mod corners;
mod homography;
mod image;
mod rectify;

pub use corners::{normalize_corners, CornerError, Quad, MIN_QUAD_AREA};
pub use homography::{homography_from_4pt, warp_perspective_gray, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use rectify::{
    compute_homography, transform_point, CanonicalSize, GeometryError, Rectification,
};

/// Absolute tolerance for geometric equality checks.
///
/// Used for side lengths and point coincidence (pixels), for the homogeneous
/// scale in [`transform_point`], and for pivots in the homography solve.
pub const GEOMETRY_EPS: f64 = 1e-9;
