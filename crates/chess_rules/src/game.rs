//! Applying moves and classifying positions.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::IllegalMove;
use crate::movegen::legal_moves;
use crate::types::{Color, Move};
use crate::uci::move_to_uci;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    /// The side to move is in check but has a reply.
    Check,
    Checkmate,
    Stalemate,
    /// The king of this color is gone. Only rule sets whose moves can remove a
    /// king report this; the standard rules never do.
    KingLost(Color),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::KingLost(_)
        )
    }
}

/// Look `requested` up in the legal moves of `pos` and return the generated
/// move, which carries the correct flags.
pub fn find_legal(pos: &Position, requested: Move) -> Result<Move, IllegalMove> {
    legal_moves(pos)
        .into_iter()
        .find(|m| *m == requested)
        .ok_or_else(|| IllegalMove {
            uci: move_to_uci(requested),
            fen: pos.to_fen(),
        })
}

/// Play a move and return the resulting position. `pos` is left untouched.
///
/// The move is matched against the legal set first, so a move parsed from
/// UCI or received from outside is never trusted as is.
pub fn apply_move(pos: &Position, mv: Move) -> Result<Position, IllegalMove> {
    let mv = find_legal(pos, mv)?;
    let mut next = pos.clone();
    next.make_move(mv);
    Ok(next)
}

/// Classify `pos` from its legal moves and whether the side to move is in
/// check. Uses the same `legal_moves` as highlighting and move validation.
pub fn game_status(pos: &Position) -> GameStatus {
    status_from(pos, !legal_moves(pos).is_empty())
}

pub(crate) fn status_from(pos: &Position, has_moves: bool) -> GameStatus {
    let in_check = pos.in_check(pos.side_to_move);
    match (has_moves, in_check) {
        (true, false) => GameStatus::InProgress,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    }
}

impl Position {
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    pub fn apply(&self, mv: Move) -> Result<Position, IllegalMove> {
        apply_move(self, mv)
    }

    pub fn status(&self) -> GameStatus {
        game_status(self)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
