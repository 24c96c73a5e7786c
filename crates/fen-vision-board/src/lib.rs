//! Board occupancy from detected pieces, built on top of `fen-vision-core`.
//!
//! ## Quickstart
//!
//! ```
//! use fen_vision_board::{build_board_state, encode_board, BoundingBox, Piece, PieceDetection};
//! use fen_vision_core::normalize_corners;
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let quad = normalize_corners(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(800.0, 0.0),
//!     Point2::new(800.0, 800.0),
//!     Point2::new(0.0, 800.0),
//! ])?;
//! let rook = BoundingBox::new(30.0, 10.0, 70.0, 60.0);
//! let dets = [PieceDetection::from_box(&rook, Piece::from_symbol('R')?)];
//!
//! let state = build_board_state(&quad, &dets)?;
//! assert_eq!(encode_board(&state), "R7/8/8/8/8/8/8/8");
//! # Ok(())
//! # }
//! ```
//!
//! Pipeline:
//! 1. Reduce each piece box to an anchor near its base ([`BoundingBox::anchor`]).
//! 2. Map anchors into the canonical rectangle of the board quadrilateral.
//! 3. Split the rectangle into 8x8 half-open cells ([`BoardGrid`]).
//! 4. Give each cell the first detection whose anchor it contains.
//! 5. Run-length encode the rows ([`encode_board`]).

mod anchor;
mod fen;
mod grid;
mod params;
mod piece;
mod state;

pub use anchor::{BoundingBox, PieceDetection, DEFAULT_ANCHOR_HEIGHT_FRAC};
pub use fen::{analysis_url, decode_board, encode_board, FenError, ANALYSIS_URL_BASE};
pub use grid::{point_in_polygon, BoardGrid, Cell, CellIndex, BOARD_SIZE};
pub use params::BoardParams;
pub use piece::{Color, Piece, PieceClassMap, PieceError, PieceKind, DEFAULT_CLASS_ORDER};
pub use state::{
    build_board_state, place_pieces, resolve_occupancy, BoardLayout, BoardState, Placement,
};

pub use fen_vision_core::{GeometryError, Quad};
