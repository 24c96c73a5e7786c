//! Run-length piece-placement encoding (the first field of FEN).

use crate::{BoardState, CellIndex, Piece, BOARD_SIZE};

/// Base of the analysis-board link handed to downstream consumers.
pub const ANALYSIS_URL_BASE: &str = "https://lichess.org/analysis/";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 8 ranks separated by '/', found {found}")]
    RankCount { found: usize },
    #[error("rank {rank} covers {width} squares, expected 8")]
    RankWidth { rank: usize, width: usize },
    #[error("invalid symbol '{symbol}' in rank {rank}")]
    InvalidSymbol { rank: usize, symbol: char },
    #[error("rank {rank} splits an empty run into adjacent digits")]
    AdjacentDigits { rank: usize },
}

/// Encode the occupancy row by row, top row first.
///
/// Runs of empty cells collapse into a single digit, pieces are written as
/// their symbols, rows are joined with `/`.
pub fn encode_board(state: &BoardState) -> String {
    let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
    for (r, row) in state.rows().iter().enumerate() {
        if r > 0 {
            out.push('/');
        }
        let mut empty = 0u32;
        for cell in row {
            match cell {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.symbol());
                }
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    out
}

/// Decode a piece-placement field back into a board.
///
/// Anything after the first whitespace (side to move, castling, ...) is
/// ignored, so full FEN records are accepted too. Only the canonical form
/// [`encode_board`] produces is accepted: an empty run is a single digit.
pub fn decode_board(fen: &str) -> Result<BoardState, FenError> {
    let placement = fen.split_whitespace().next().unwrap_or_default();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut state = BoardState::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        let mut after_digit = false;
        for symbol in rank.chars() {
            match symbol {
                '1'..='8' => {
                    if after_digit {
                        return Err(FenError::AdjacentDigits { rank: row });
                    }
                    after_digit = true;
                    col += symbol as usize - '0' as usize;
                }
                _ => {
                    after_digit = false;
                    let piece = Piece::from_symbol(symbol)
                        .map_err(|_| FenError::InvalidSymbol { rank: row, symbol })?;
                    if let Some(cell) = CellIndex::new(row, col) {
                        state.set(cell, Some(piece));
                    }
                    col += 1;
                }
            }
            if col > BOARD_SIZE {
                return Err(FenError::RankWidth { rank: row, width: col });
            }
        }
        if col != BOARD_SIZE {
            return Err(FenError::RankWidth { rank: row, width: col });
        }
    }
    Ok(state)
}

/// Link to an online analysis board for the encoded position.
pub fn analysis_url(fen: &str) -> String {
    format!("{ANALYSIS_URL_BASE}{fen}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn cell(row: usize, col: usize) -> CellIndex {
        CellIndex::new(row, col).expect("on board")
    }

    fn piece(symbol: char) -> Option<Piece> {
        Some(Piece::from_symbol(symbol).expect("symbol"))
    }

    #[test]
    fn empty_board() {
        assert_eq!(encode_board(&BoardState::empty()), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn runs_merge_into_single_digits() {
        let mut state = BoardState::empty();
        state.set(cell(0, 0), piece('R'));
        state.set(cell(3, 3), piece('q'));
        state.set(cell(3, 4), piece('Q'));
        state.set(cell(7, 7), piece('k'));
        let fen = encode_board(&state);
        assert_eq!(fen, "R7/8/8/3qQ3/8/8/8/7k");
        let chars: Vec<char> = fen.chars().collect();
        assert!(chars
            .windows(2)
            .all(|w| !(w[0].is_ascii_digit() && w[1].is_ascii_digit())));
    }

    #[test]
    fn starting_position_round_trips() {
        let state = decode_board(START).expect("decode");
        assert_eq!(state.piece_count(), 32);
        assert_eq!(state.get(cell(7, 4)), piece('K'));
        assert_eq!(state.get(cell(0, 3)), piece('q'));
        assert_eq!(encode_board(&state), START);
    }

    #[test]
    fn encoding_is_idempotent() {
        let state = decode_board("r3k2r/8/8/8/8/8/8/R3K2R").expect("decode");
        assert_eq!(encode_board(&state), encode_board(&state));
    }

    #[test]
    fn full_fen_record_is_accepted() {
        let state = decode_board(&format!("{START} w KQkq - 0 1")).expect("decode");
        assert_eq!(encode_board(&state), START);
    }

    #[test]
    fn malformed_placements_are_rejected() {
        assert_eq!(
            decode_board("8/8/8"),
            Err(FenError::RankCount { found: 3 })
        );
        assert_eq!(
            decode_board("7/8/8/8/8/8/8/8"),
            Err(FenError::RankWidth { rank: 0, width: 7 })
        );
        assert_eq!(
            decode_board("8/8/8/8/8/8/8/pppppppppp"),
            Err(FenError::RankWidth { rank: 7, width: 9 })
        );
        assert_eq!(
            decode_board("8/8/8/3x4/8/8/8/8"),
            Err(FenError::InvalidSymbol { rank: 3, symbol: 'x' })
        );
        assert_eq!(
            decode_board("8/8/8/8/0/8/8/8"),
            Err(FenError::InvalidSymbol { rank: 4, symbol: '0' })
        );
        assert_eq!(decode_board(""), Err(FenError::RankCount { found: 1 }));
        assert_eq!(
            decode_board("44/8/8/8/8/8/8/8"),
            Err(FenError::AdjacentDigits { rank: 0 })
        );
        assert_eq!(
            decode_board("8/8/8/8/8/8/8/11111111"),
            Err(FenError::AdjacentDigits { rank: 7 })
        );
        assert_eq!(
            decode_board("8/8/2p14/8/8/8/8/8"),
            Err(FenError::AdjacentDigits { rank: 2 })
        );
    }

    #[test]
    fn decode_is_the_inverse_of_encode() {
        for fen in [
            "8/8/8/8/8/8/8/8",
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
            "7k/1p4p1/8/3Qq3/8/8/P6P/K7",
        ] {
            let state = decode_board(fen).expect("decode");
            assert_eq!(encode_board(&state), fen);
        }
    }

    #[test]
    fn analysis_link() {
        assert_eq!(
            analysis_url("8/8/8/8/8/8/8/8"),
            "https://lichess.org/analysis/8/8/8/8/8/8/8/8"
        );
    }
}
