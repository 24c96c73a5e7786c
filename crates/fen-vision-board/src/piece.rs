//! The 12-symbol piece alphabet and the detector class-id mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase FEN letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error("'{0}' is not a piece symbol (expected one of PNBRQKpnbrqk)")]
    UnknownSymbol(char),
}

/// A piece class: kind plus side. Uppercase symbols are white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn symbol(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, PieceError> {
        let kind = PieceKind::ALL
            .into_iter()
            .find(|k| k.letter() == symbol.to_ascii_lowercase())
            .ok_or(PieceError::UnknownSymbol(symbol))?;
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self { color, kind })
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Piece::from_symbol(c)
    }
}

impl From<Piece> for char {
    fn from(p: Piece) -> char {
        p.symbol()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Mapping from detector class ids to pieces, written as a symbol string
/// where position `i` is the piece for class id `i`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceClassMap {
    classes: Vec<Piece>,
}

/// Class order of the piece detector the pipeline was trained with.
pub const DEFAULT_CLASS_ORDER: &str = "bknpqrBKNPQR";

impl PieceClassMap {
    pub fn parse(symbols: &str) -> Result<Self, PieceError> {
        let classes = symbols
            .chars()
            .map(Piece::from_symbol)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { classes })
    }

    /// Piece for a detector class id, `None` for ids outside the map.
    #[inline]
    pub fn get(&self, class_id: usize) -> Option<Piece> {
        self.classes.get(class_id).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for PieceClassMap {
    fn default() -> Self {
        let classes = DEFAULT_CLASS_ORDER
            .chars()
            .filter_map(|c| Piece::from_symbol(c).ok())
            .collect();
        Self { classes }
    }
}

impl TryFrom<String> for PieceClassMap {
    type Error = PieceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PieceClassMap> for String {
    fn from(m: PieceClassMap) -> String {
        m.classes.iter().map(|p| p.symbol()).collect()
    }
}
