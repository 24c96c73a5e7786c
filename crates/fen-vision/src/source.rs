//! Detector seam: where board corners and piece boxes come from.

use crate::io::ConfigError;
use fen_vision_board::BoundingBox;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Opaque failure reported by a detector implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// One board-corner candidate in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerCandidate {
    pub point: Point2<f64>,
    /// Detector score in `[0, 1]`, when the detector reports one.
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl CornerCandidate {
    pub fn new(point: Point2<f64>) -> Self {
        Self {
            point,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Candidate at the centre of a centre-form detector box (`x, y, w, h`).
    ///
    /// Width and height do not move the centre; they are accepted so callers
    /// can pass detector rows unchanged.
    pub fn from_xywh(x: f64, y: f64, _w: f64, _h: f64) -> Self {
        Self::new(Point2::new(x, y))
    }

    /// Candidate at the centre of a corner-form box.
    pub fn from_box(bbox: &BoundingBox) -> Self {
        Self::new(bbox.center())
    }
}

/// A classified piece box in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceBox {
    pub bbox: BoundingBox,
    /// Detector class id, resolved through a [`PieceClassMap`](fen_vision_board::PieceClassMap).
    pub class_id: usize,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl PieceBox {
    pub fn new(bbox: BoundingBox, class_id: usize) -> Self {
        Self {
            bbox,
            class_id,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Locates board-corner candidates in an image of type `I`.
pub trait CornerSource<I: ?Sized> {
    fn detect_corners(&self, image: &I) -> Result<Vec<CornerCandidate>, SourceError>;
}

/// Locates and classifies pieces in an image of type `I`.
pub trait PieceSource<I: ?Sized> {
    fn detect_pieces(&self, image: &I) -> Result<Vec<PieceBox>, SourceError>;
}

impl<I: ?Sized, S: CornerSource<I> + ?Sized> CornerSource<I> for &S {
    fn detect_corners(&self, image: &I) -> Result<Vec<CornerCandidate>, SourceError> {
        (**self).detect_corners(image)
    }
}

impl<I: ?Sized, S: PieceSource<I> + ?Sized> PieceSource<I> for &S {
    fn detect_pieces(&self, image: &I) -> Result<Vec<PieceBox>, SourceError> {
        (**self).detect_pieces(image)
    }
}

/// Recorded detector output. Answers every image with the same detections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSet {
    #[serde(default)]
    pub corners: Vec<CornerCandidate>,
    #[serde(default)]
    pub pieces: Vec<PieceBox>,
}

impl DetectionSet {
    /// Load recorded detections from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the detections to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl<I: ?Sized> CornerSource<I> for DetectionSet {
    fn detect_corners(&self, _image: &I) -> Result<Vec<CornerCandidate>, SourceError> {
        Ok(self.corners.clone())
    }
}

impl<I: ?Sized> PieceSource<I> for DetectionSet {
    fn detect_pieces(&self, _image: &I) -> Result<Vec<PieceBox>, SourceError> {
        Ok(self.pieces.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xywh_candidate_is_box_centre() {
        let c = CornerCandidate::from_xywh(120.0, 80.0, 14.0, 10.0);
        assert_eq!(c.point, Point2::new(120.0, 80.0));
        assert_eq!(c.confidence, None);

        let b = BoundingBox::new(113.0, 75.0, 127.0, 85.0);
        assert_eq!(CornerCandidate::from_box(&b).point, c.point);
    }

    #[test]
    fn detection_set_parses_without_confidences() {
        let json = r#"{
            "corners": [{ "point": [1.0, 2.0] }],
            "pieces": [{ "bbox": { "x1": 0, "y1": 0, "x2": 10, "y2": 20 }, "class_id": 3, "confidence": 0.9 }]
        }"#;
        let set: DetectionSet = serde_json::from_str(json).expect("parse");
        assert_eq!(set.corners[0].point, Point2::new(1.0, 2.0));
        assert_eq!(set.corners[0].confidence, None);
        assert_eq!(set.pieces[0].class_id, 3);
        assert_eq!(set.pieces[0].confidence, Some(0.9));
    }

    #[test]
    fn detection_set_ignores_the_image() {
        let set = DetectionSet {
            corners: vec![CornerCandidate::new(Point2::new(3.0, 4.0))],
            pieces: Vec::new(),
        };
        let a = CornerSource::<str>::detect_corners(&set, "first").expect("corners");
        let b = CornerSource::<[u8]>::detect_corners(&set, &[1u8, 2, 3][..]).expect("corners");
        assert_eq!(a, b);
        assert!(PieceSource::<str>::detect_pieces(&set, "x")
            .expect("pieces")
            .is_empty());
    }
}
