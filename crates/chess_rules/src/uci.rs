use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;
use crate::board::Position;
use crate::error::UciError;
use crate::fen::parse_fen;
use crate::game::{apply_move, find_legal};
use crate::types::*;

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Parse `e2e4` / `e7e8q` into a position-free move.
///
/// The result has no flags; resolve it with [`find_legal`] (or
/// [`parse_uci_move`]) before playing it.
pub fn parse_uci(txt: &str) -> Result<Move, UciError> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(UciError::Length(txt.to_string()));
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(|| UciError::Square(txt[0..2].to_string()))?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(|| UciError::Square(txt[2..4].to_string()))?;
    let promo = match txt.as_bytes().get(4).map(|&b| b as char) {
        None => None,
        Some(c @ ('q' | 'r' | 'b' | 'n')) => PieceKind::from_char(c),
        Some(c) => return Err(UciError::Promotion(c)),
    };
    Ok(Move {
        promo,
        ..Move::new(from, to)
    })
}

/// Parse a UCI string and resolve it against the legal moves of `pos`, so the
/// returned move carries the correct castle / en-passant flags.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, Error> {
    let requested = parse_uci(txt)?;
    Ok(find_legal(pos, requested)?)
}

/// Build a position from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields...> [moves ...]`.
pub fn set_position_from_uci(args: &[&str]) -> Result<Position, Error> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &args[args.len()..]),
    };

    let mut pos = match setup {
        [] | ["startpos"] => Position::startpos(),
        ["fen", fields @ ..] => parse_fen(&fields.join(" "))?,
        _ => parse_fen(&setup.join(" "))?,
    };

    for txt in moves {
        let mv = parse_uci(txt)?;
        pos = apply_move(&pos, mv)?;
    }
    Ok(pos)
}

impl FromStr for Move {
    type Err = UciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_uci(*self))
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&move_to_uci(*self))
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_uci(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
