//! Forsyth-Edwards Notation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::{Board, CastlingRights, Position};
use crate::error::FenError;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string.
///
/// Accepts the full six fields, or the four-field EPD form with the clocks
/// defaulting to `0 1`. Nothing is returned unless every field is valid.
pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 4 && parts.len() != 6 {
        return Err(FenError::FieldCount(parts.len()));
    }

    let board = parse_placement(parts[0])?;

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };

    let castling = parse_castling(parts[2])?;
    let en_passant = parse_en_passant(parts[3], side_to_move)?;

    let (halfmove_clock, fullmove_number) = match parts.get(4..6) {
        Some([hm, fm]) => {
            let hm = parse_clock(hm).ok_or_else(|| FenError::HalfmoveClock(hm.to_string()))?;
            let fm = match parse_clock(fm) {
                Some(n) if n > 0 => n,
                _ => return Err(FenError::FullmoveNumber(fm.to_string())),
            };
            (hm, fm)
        }
        _ => (0, 1),
    };

    let pos = Position {
        board,
        side_to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    };
    // The side that just moved cannot have left its king attacked.
    if pos.in_check(side_to_move.other()) {
        return Err(FenError::OpponentInCheck(side_to_move.other()));
    }
    Ok(pos)
}

// Plain decimal digits only; `u32::from_str` would also take a leading '+'.
fn parse_clock(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_placement(field: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    let mut kings = [0u8; 2];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
        let mut width: u32 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d == 0 {
                    return Err(FenError::UnknownPiece(ch));
                }
                width += d;
                continue;
            }
            let pc = Piece::from_fen_char(ch).ok_or(FenError::UnknownPiece(ch))?;
            if let Some(s) = sq(width as i8, rank) {
                board.set_piece(s, Some(pc));
            }
            if pc.kind == PieceKind::King {
                kings[pc.color.idx()] += 1;
                if kings[pc.color.idx()] > 1 {
                    return Err(FenError::TooManyKings(pc.color));
                }
            }
            width += 1;
        }
        if width != 8 {
            return Err(FenError::RankWidth {
                rank: rank as u8 + 1,
                width,
            });
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut castling = CastlingRights::none();
    if field == "-" {
        return Ok(castling);
    }
    for c in field.chars() {
        let flag = match c {
            'K' => &mut castling.wk,
            'Q' => &mut castling.wq,
            'k' => &mut castling.bk,
            'q' => &mut castling.bq,
            _ => return Err(FenError::Castling(field.to_string())),
        };
        if *flag {
            return Err(FenError::Castling(field.to_string()));
        }
        *flag = true;
    }
    Ok(castling)
}

fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let s = coord_to_sq(field).ok_or_else(|| FenError::EnPassant(field.to_string()))?;
    // The skipped square sits on the third rank from the mover's opponent
    let expected = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(s) != expected {
        return Err(FenError::EnPassant(field.to_string()));
    }
    Ok(Some(s))
}

pub fn to_fen(pos: &Position) -> String {
    let mut out = String::with_capacity(90);

    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match sq(file, rank).and_then(|s| pos.piece_at(s)) {
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(pc.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let c = &pos.castling;
    if !(c.wk || c.wq || c.bk || c.bq) {
        out.push('-');
    } else {
        for (set, ch) in [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')] {
            if set {
                out.push(ch);
            }
        }
    }

    out.push(' ');
    match pos.en_passant {
        Some(s) => out.push_str(&sq_to_coord(s)),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    out
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        to_fen(self)
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_fen(self))
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_fen(self))
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_fen(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
