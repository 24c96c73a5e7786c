//! Photograph -> board position, with the detectors injected.

use crate::source::{CornerCandidate, CornerSource, PieceBox, PieceSource, SourceError};
use fen_vision_board::{
    analysis_url, encode_board, place_pieces, BoardLayout, BoardParams, PieceClassMap,
    PieceDetection,
};
use fen_vision_core::{
    compute_homography, normalize_corners, CanonicalSize, CornerError, GeometryError, Quad,
};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced while reading a board.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("detector failed: {0}")]
    Source(#[source] SourceError),

    #[error(transparent)]
    Corners(#[from] CornerError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Parameters of the end-to-end reader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderParams {
    pub board: BoardParams,
    /// Corner candidates scoring below this are discarded.
    pub min_corner_confidence: f32,
    /// Piece boxes scoring below this are discarded.
    pub min_piece_confidence: f32,
    pub class_map: PieceClassMap,
}

impl Default for ReaderParams {
    fn default() -> Self {
        Self {
            board: BoardParams::default(),
            min_corner_confidence: 0.15,
            min_piece_confidence: 0.10,
            class_map: PieceClassMap::default(),
        }
    }
}

/// Result of reading one photograph.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardReading {
    /// Board corners in top-left, top-right, bottom-right, bottom-left order.
    pub quad: Quad,
    pub size: CanonicalSize,
    pub layout: BoardLayout,
    pub fen: String,
    pub analysis_url: String,
}

/// Runs a corner detector and a piece detector over an image and turns
/// their output into a board position.
pub struct BoardReader<C, P> {
    corners: C,
    pieces: P,
    params: ReaderParams,
}

impl<C, P> BoardReader<C, P> {
    pub fn new(corners: C, pieces: P, params: ReaderParams) -> Self {
        Self {
            corners,
            pieces,
            params,
        }
    }

    pub fn params(&self) -> &ReaderParams {
        &self.params
    }

    /// Detect, rectify and encode the board shown in `image`.
    pub fn read<I: ?Sized>(&self, image: &I) -> Result<BoardReading, ReadError>
    where
        C: CornerSource<I>,
        P: PieceSource<I>,
    {
        let corners = self
            .corners
            .detect_corners(image)
            .map_err(ReadError::Source)?;
        let pieces = self.pieces.detect_pieces(image).map_err(ReadError::Source)?;
        read_detections(&corners, &pieces, &self.params)
    }
}

fn passes(confidence: Option<f32>, min: f32) -> bool {
    confidence.is_none_or(|c| c >= min)
}

/// Board reading from detector output that is already in hand.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(corners, pieces, params),
        fields(corners = corners.len(), pieces = pieces.len())
    )
)]
pub fn read_detections(
    corners: &[CornerCandidate],
    pieces: &[PieceBox],
    params: &ReaderParams,
) -> Result<BoardReading, ReadError> {
    let points: Vec<Point2<f64>> = corners
        .iter()
        .filter(|c| passes(c.confidence, params.min_corner_confidence))
        .map(|c| c.point)
        .collect();
    if points.len() < corners.len() {
        log::debug!(
            "kept {} of {} corner candidates (min confidence {:.2})",
            points.len(),
            corners.len(),
            params.min_corner_confidence
        );
    }

    let quad = normalize_corners(&points)?;
    let rect = compute_homography(&quad)?;

    let mut detections = Vec::with_capacity(pieces.len());
    for b in pieces {
        if !passes(b.confidence, params.min_piece_confidence) {
            continue;
        }
        match params.class_map.get(b.class_id) {
            Some(piece) => detections.push(params.board.detection(&b.bbox, piece)),
            None => log::warn!(
                "skipping piece box with unknown class id {} ({} classes mapped)",
                b.class_id,
                params.class_map.len()
            ),
        }
    }

    let layout = place_pieces(&rect, &detections)?;
    let fen = encode_board(&layout.state);
    let url = analysis_url(&fen);
    log::info!("board read as {fen}");

    Ok(BoardReading {
        quad,
        size: rect.size,
        layout,
        fen,
        analysis_url: url,
    })
}

impl BoardReading {
    /// Detections that ended up on the board, in detector order.
    pub fn kept_detections(&self) -> impl Iterator<Item = PieceDetection> + '_ {
        self.layout
            .placements
            .iter()
            .filter(|p| p.kept)
            .map(|p| PieceDetection::new(p.anchor, p.piece))
    }
}
