//! JSON configuration and report helpers for the board reader.

use crate::{BoardReading, ReaderParams};
use fen_vision_board::{CellIndex, Piece};
use fen_vision_core::CanonicalSize;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration of one offline board read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadConfig {
    /// Recorded detector output ([`DetectionSet`](crate::DetectionSet) JSON).
    pub detections_path: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub rectified_path: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: ReaderParams,
}

impl ReadConfig {
    pub fn new(detections_path: impl Into<String>) -> Self {
        Self {
            detections_path: detections_path.into(),
            image_path: None,
            rectified_path: None,
            output_path: None,
            params: ReaderParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("board_report.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectifiedImageInfo {
    pub path: Option<String>,
    pub width: usize,
    pub height: usize,
}

/// Where one piece detection landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementInfo {
    pub piece: Piece,
    pub anchor: Point2<f64>,
    pub canonical: Point2<f64>,
    /// Algebraic square name, `None` when the anchor fell off the board.
    #[serde(default)]
    pub square: Option<String>,
    pub kept: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardReport {
    pub detections_path: String,
    #[serde(default)]
    pub image_path: Option<String>,
    pub config_path: Option<String>,
    pub num_corner_candidates: usize,
    pub num_piece_boxes: usize,
    /// Ordered board corners: top-left, top-right, bottom-right, bottom-left.
    #[serde(default)]
    pub corners: Option<[Point2<f64>; 4]>,
    #[serde(default)]
    pub canonical_size: Option<CanonicalSize>,
    #[serde(default)]
    pub placements: Vec<PlacementInfo>,
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub analysis_url: Option<String>,
    #[serde(default)]
    pub rectified: Option<RectifiedImageInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BoardReport {
    /// Build a base report from the input config and detector output sizes.
    pub fn new(
        cfg: &ReadConfig,
        config_path: Option<&Path>,
        num_corner_candidates: usize,
        num_piece_boxes: usize,
    ) -> Self {
        Self {
            detections_path: cfg.detections_path.clone(),
            image_path: cfg.image_path.clone(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            num_corner_candidates,
            num_piece_boxes,
            corners: None,
            canonical_size: None,
            placements: Vec::new(),
            fen: None,
            analysis_url: None,
            rectified: None,
            error: None,
        }
    }

    /// Populate report fields from a successful read.
    pub fn set_reading(&mut self, reading: &BoardReading) {
        self.corners = Some(reading.quad.corners());
        self.canonical_size = Some(reading.size);
        self.placements = reading
            .layout
            .placements
            .iter()
            .map(|p| PlacementInfo {
                piece: p.piece,
                anchor: p.anchor,
                canonical: p.canonical,
                square: p.cell.map(|c: CellIndex| c.square_name()),
                kept: p.kept,
            })
            .collect();
        self.fen = Some(reading.fen.clone());
        self.analysis_url = Some(reading.analysis_url.clone());
        self.error = None;
    }

    /// Record a read error.
    pub fn set_error(&mut self, err: &dyn std::error::Error) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
