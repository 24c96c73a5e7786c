//! Per-cell occupancy and the detections -> board pipeline.

use crate::{
    decode_board, encode_board, BoardGrid, CellIndex, FenError, Piece, PieceDetection, BOARD_SIZE,
};
use fen_vision_core::{compute_homography, GeometryError, Quad, Rectification};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Occupancy of the 64 cells; row 0 is the top row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BoardState {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardState {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, cell: CellIndex) -> Option<Piece> {
        self.squares[cell.row as usize][cell.col as usize]
    }

    #[inline]
    pub fn set(&mut self, cell: CellIndex, piece: Option<Piece>) {
        self.squares[cell.row as usize][cell.col as usize] = piece;
    }

    #[inline]
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (CellIndex, Piece)> + '_ {
        CellIndex::all().filter_map(|c| self.get(c).map(|p| (c, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn is_empty(&self) -> bool {
        self.piece_count() == 0
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_board(self))
    }
}

impl FromStr for BoardState {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_board(s)
    }
}

impl From<BoardState> for String {
    fn from(state: BoardState) -> String {
        encode_board(&state)
    }
}

impl TryFrom<String> for BoardState {
    type Error = FenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        decode_board(&s)
    }
}

/// Occupant of `cell` given detections whose anchors are already in
/// canonical coordinates.
///
/// The first detection (in slice order) inside the cell wins; later ones
/// are ignored. No confidence arbitration happens here.
pub fn resolve_occupancy(
    grid: &BoardGrid,
    cell: CellIndex,
    canonical: &[PieceDetection],
) -> Option<Piece> {
    let polygon = grid.cell(cell);
    canonical
        .iter()
        .find(|d| polygon.contains(d.anchor))
        .map(|d| d.piece)
}

/// Where one detection ended up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    /// Anchor in image pixels.
    pub anchor: Point2<f64>,
    /// Anchor in the canonical frame.
    pub canonical: Point2<f64>,
    /// Containing cell, `None` when the anchor falls off the board.
    pub cell: Option<CellIndex>,
    /// `false` when an earlier detection already took the cell.
    pub kept: bool,
}

/// Board state together with the geometry it was derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardLayout {
    pub rectification: Rectification,
    pub grid: BoardGrid,
    pub state: BoardState,
    pub placements: Vec<Placement>,
}

/// Map image-space detections through `rect` and fill the 8x8 occupancy.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(rect, detections), fields(n = detections.len()))
)]
pub fn place_pieces(
    rect: &Rectification,
    detections: &[PieceDetection],
) -> Result<BoardLayout, GeometryError> {
    let canonical = detections
        .iter()
        .map(|d| Ok(PieceDetection::new(rect.to_canonical(d.anchor)?, d.piece)))
        .collect::<Result<Vec<_>, GeometryError>>()?;

    let grid = BoardGrid::partition(rect.size);

    let mut state = BoardState::empty();
    for cell in CellIndex::all() {
        state.set(cell, resolve_occupancy(&grid, cell, &canonical));
    }

    let mut taken = [[false; BOARD_SIZE]; BOARD_SIZE];
    let placements: Vec<Placement> = detections
        .iter()
        .zip(&canonical)
        .map(|(src, dst)| {
            let cell = grid.assign(dst.anchor);
            let kept = match cell {
                Some(c) => {
                    let slot = &mut taken[c.row as usize][c.col as usize];
                    let first = !*slot;
                    *slot = true;
                    if !first {
                        log::debug!(
                            "dropping '{}' at {}: cell already taken by '{}'",
                            src.piece,
                            c.square_name(),
                            state.get(c).map(char::from).unwrap_or('?')
                        );
                    }
                    first
                }
                None => {
                    log::debug!(
                        "'{}' anchored off the board at ({:.1}, {:.1})",
                        src.piece,
                        dst.anchor.x,
                        dst.anchor.y
                    );
                    false
                }
            };
            Placement {
                piece: src.piece,
                anchor: src.anchor,
                canonical: dst.anchor,
                cell,
                kept,
            }
        })
        .collect();

    log::info!(
        "placed {} of {} detections on a {}x{} canonical board",
        state.piece_count(),
        detections.len(),
        rect.size.width,
        rect.size.height
    );

    Ok(BoardLayout {
        rectification: *rect,
        grid,
        state,
        placements,
    })
}

/// Rectify `quad` and assign every detection to at most one cell.
pub fn build_board_state(
    quad: &Quad,
    detections: &[PieceDetection],
) -> Result<BoardState, GeometryError> {
    let rect = compute_homography(quad)?;
    Ok(place_pieces(&rect, detections)?.state)
}
