use crate::{BoundingBox, Piece, PieceDetection, DEFAULT_ANCHOR_HEIGHT_FRAC};
use serde::{Deserialize, Serialize};

/// Parameters of the box -> board stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    /// Anchor height above the box bottom, as a fraction of the box height.
    pub anchor_height_frac: f64,
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            anchor_height_frac: DEFAULT_ANCHOR_HEIGHT_FRAC,
        }
    }
}

impl BoardParams {
    /// Reduce a classified box to a detection using these parameters.
    pub fn detection(&self, bbox: &BoundingBox, piece: Piece) -> PieceDetection {
        PieceDetection::new(bbox.anchor_with_bias(self.anchor_height_frac), piece)
    }
}
