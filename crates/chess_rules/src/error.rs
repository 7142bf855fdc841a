//! Error types for the rules engine.
//!
//! Everything here is a recoverable condition returned to the caller.
//! `FenError` and `UciError` cover malformed input, `IllegalMove` covers
//! well-formed moves outside the legal set, and `RuleViolation` covers the
//! variant rule sets. Running out of legal moves is not an error; see
//! [`crate::GameStatus`].

use thiserror::Error;

use crate::game::GameStatus;
use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 or 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {width} files instead of 8")]
    RankWidth { rank: u8, width: u32 },
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("side to move must be 'w' or 'b', got '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en-passant field '{0}'")]
    EnPassant(String),
    #[error("invalid halfmove clock '{0}'")]
    HalfmoveClock(String),
    #[error("invalid fullmove number '{0}'")]
    FullmoveNumber(String),
    #[error("more than one {0:?} king on the board")]
    TooManyKings(Color),
    #[error("the {0:?} king is in check but it is not {0:?}'s move")]
    OpponentInCheck(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("UCI move must be 4 or 5 characters, got '{0}'")]
    Length(String),
    #[error("invalid square '{0}'")]
    Square(String),
    #[error("invalid promotion letter '{0}'")]
    Promotion(char),
}

/// A well-formed move that is not in the legal set of the position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move {uci} in position {fen}")]
pub struct IllegalMove {
    pub uci: String,
    pub fen: String,
}

/// Rejection reasons reported by a [`crate::RuleSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error(transparent)]
    Illegal(#[from] IllegalMove),
    #[error("no piece on {0}")]
    EmptySquare(String),
    #[error("the piece on {0} does not belong to the side to move")]
    NotYourPiece(String),
    #[error("a move must change squares")]
    NullMove,
    #[error("the king cannot teleport")]
    KingTeleport,
    #[error("a king cannot be captured")]
    KingCapture,
    #[error("teleport roll failed")]
    TeleportNotRolled,
    #[error("a pawn cannot teleport onto the first or last rank")]
    PawnTeleportToEdge,
    #[error("move leaves the {0:?} king attacked")]
    KingLeftAttacked(Color),
}

/// Why a [`crate::GameSession`] refused a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game is already over: {0:?}")]
    GameOver(GameStatus),
    #[error(transparent)]
    Uci(#[from] UciError),
    #[error(transparent)]
    Rule(#[from] RuleViolation),
}

/// Any error the engine can return, for callers that do not care which.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Uci(#[from] UciError),
    #[error(transparent)]
    Illegal(#[from] IllegalMove),
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error(transparent)]
    Session(#[from] SessionError),
}
