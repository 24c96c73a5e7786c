//! Anchor points of detected pieces.

use crate::Piece;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Fraction of the box height, measured up from the bottom edge, where the
/// anchor sits: the middle of the lowest 40% of the box.
pub const DEFAULT_ANCHOR_HEIGHT_FRAC: f64 = 0.2;

/// Axis-aligned detector box in image pixels (`x1 <= x2`, `y1 <= y2`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }

    /// Point the piece stands on, biased toward the bottom of the box.
    ///
    /// Tall pieces photographed at an angle have boxes that reach into the
    /// squares behind them; the box base stays on the occupied square.
    #[inline]
    pub fn anchor(&self) -> Point2<f64> {
        self.anchor_with_bias(DEFAULT_ANCHOR_HEIGHT_FRAC)
    }

    /// Anchor `height_frac * height` above the bottom edge, horizontally centered.
    #[inline]
    pub fn anchor_with_bias(&self, height_frac: f64) -> Point2<f64> {
        Point2::new(
            0.5 * (self.x1 + self.x2),
            self.y2 - height_frac * self.height(),
        )
    }
}

/// A classified piece reduced to its anchor point in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceDetection {
    pub anchor: Point2<f64>,
    pub piece: Piece,
}

impl PieceDetection {
    pub fn new(anchor: Point2<f64>, piece: Piece) -> Self {
        Self { anchor, piece }
    }

    /// Detection anchored with [`BoundingBox::anchor`].
    pub fn from_box(bbox: &BoundingBox, piece: Piece) -> Self {
        Self::new(bbox.anchor(), piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn anchor_sits_low_in_the_box() {
        let b = BoundingBox::new(100.0, 200.0, 140.0, 300.0);
        let a = b.anchor();
        assert_relative_eq!(a.x, 120.0);
        assert_relative_eq!(a.y, 280.0);
    }

    #[test]
    fn anchor_is_midpoint_of_bottom_band() {
        let b = BoundingBox::new(0.0, 10.0, 30.0, 60.0);
        let band_top = b.y2 - 0.4 * b.height();
        assert_relative_eq!(b.anchor().y, 0.5 * (band_top + b.y2));
    }

    #[test]
    fn zero_bias_is_bottom_center() {
        let b = BoundingBox::new(2.0, 4.0, 6.0, 9.0);
        assert_eq!(b.anchor_with_bias(0.0), Point2::new(4.0, 9.0));
    }
}
