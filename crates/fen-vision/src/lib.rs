//! High-level facade for the `fen-vision-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometric core and the board stage
//! - the detector seam ([`CornerSource`], [`PieceSource`]) and a
//!   [`BoardReader`] that runs photograph -> FEN end to end
//! - JSON config/report helpers and logger setup used by the `fen-vision` binary
//! - (feature-gated) `image` helpers for loading photographs and writing
//!   the rectified board preview.
//!
//! ## Quickstart
//!
//! ```
//! use fen_vision::board::BoundingBox;
//! use fen_vision::{BoardReader, CornerCandidate, DetectionSet, PieceBox, ReaderParams};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Recorded detector output; a live model would implement the source traits.
//! let detections = DetectionSet {
//!     corners: vec![
//!         CornerCandidate::new(Point2::new(800.0, 800.0)),
//!         CornerCandidate::new(Point2::new(0.0, 0.0)),
//!         CornerCandidate::new(Point2::new(800.0, 0.0)),
//!         CornerCandidate::new(Point2::new(0.0, 800.0)),
//!     ],
//!     // class 11 is a white rook in the default class order
//!     pieces: vec![PieceBox::new(BoundingBox::new(30.0, 10.0, 70.0, 60.0), 11)],
//! };
//!
//! let reader = BoardReader::new(&detections, &detections, ReaderParams::default());
//! let reading = reader.read(&())?;
//! assert_eq!(reading.fen, "R7/8/8/8/8/8/8/8");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `fen_vision::core`: corner ordering, homographies, rectification.
//! - `fen_vision::board`: anchors, the 8x8 grid, occupancy and FEN.
//! - `fen_vision::detect` (feature `image`): helpers over `image::GrayImage`.

pub use fen_vision_board as board;
pub use fen_vision_core as core;

mod io;
pub mod logging;
mod reader;
mod source;

pub use io::{BoardReport, ConfigError, PlacementInfo, ReadConfig, RectifiedImageInfo};
pub use reader::{read_detections, BoardReader, BoardReading, ReadError, ReaderParams};
pub use source::{CornerCandidate, CornerSource, DetectionSet, PieceBox, PieceSource, SourceError};

#[cfg(feature = "image")]
pub mod detect;
