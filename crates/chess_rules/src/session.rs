//! One game in progress: the current position, the rule set judging it and
//! the moves played so far.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Position;
use crate::error::{FenError, SessionError};
use crate::game::GameStatus;
use crate::rules::{MoveContext, MoveKind, RuleSet, StandardRules};
use crate::types::{Move, Square};
use crate::uci::{move_to_uci, parse_uci};

/// Result of a move accepted by [`GameSession::play`].
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    pub uci: String,
    pub position: Position,
    pub status: GameStatus,
}

/// Serializable view of a session, for persistence or sending to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub rules: String,
    pub start_fen: String,
    pub fen: String,
    pub moves: Vec<String>,
    pub status: GameStatus,
}

pub struct GameSession {
    rules: Box<dyn RuleSet>,
    start: Position,
    position: Position,
    history: Vec<String>,
    status: GameStatus,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Box::new(StandardRules))
    }
}

impl GameSession {
    /// A new game from the standard starting position.
    pub fn new(rules: Box<dyn RuleSet>) -> Self {
        Self::with_position(rules, Position::startpos())
    }

    pub fn from_fen(rules: Box<dyn RuleSet>, fen: &str) -> Result<Self, FenError> {
        Ok(Self::with_position(rules, Position::from_fen(fen)?))
    }

    pub fn with_position(rules: Box<dyn RuleSet>, start: Position) -> Self {
        let status = rules.status(&start);
        Self {
            rules,
            position: start.clone(),
            start,
            history: Vec::new(),
            status,
        }
    }

    /// Back to the position the session started from.
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.history.clear();
        self.rules.new_game();
        self.status = self.rules.status(&self.position);
        info!(rules = self.rules.name(), fen = %self.position, "session reset");
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rules_name(&self) -> &str {
        self.rules.name()
    }

    /// UCI strings of the moves played since the start (or last reset).
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.rules.legal_moves(&self.position)
    }

    /// The authoritative move list offered to external move sources.
    pub fn legal_move_strings(&self) -> Vec<String> {
        self.legal_moves().into_iter().map(move_to_uci).collect()
    }

    /// Moves of the piece on `from`, for highlighting a clicked square.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = self.legal_moves();
        moves.retain(|m| m.from == from);
        moves
    }

    /// Context for the next move, drawn by the rule set.
    pub fn roll(&self, rng: &mut dyn RngCore) -> MoveContext {
        self.rules.roll(rng)
    }

    pub fn play(&mut self, uci: &str, ctx: MoveContext) -> Result<MoveOutcome, SessionError> {
        let mv = parse_uci(uci)?;
        self.play_move(mv, ctx)
    }

    /// Validate and apply `mv`. On error the session is unchanged.
    pub fn play_move(&mut self, mv: Move, ctx: MoveContext) -> Result<MoveOutcome, SessionError> {
        if self.status.is_over() {
            return Err(SessionError::GameOver(self.status));
        }
        let kind = self.rules.validate_move(&self.position, mv, ctx)?;
        self.position = self.rules.apply(&self.position, kind);
        self.status = self.rules.status(&self.position);

        let uci = move_to_uci(kind.mv());
        self.history.push(uci.clone());
        debug!(mv = %uci, kind = ?kind, status = ?self.status, "move applied");

        Ok(MoveOutcome {
            kind,
            uci,
            position: self.position.clone(),
            status: self.status,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            rules: self.rules.name().to_string(),
            start_fen: self.start.to_fen(),
            fen: self.fen(),
            moves: self.history.clone(),
            status: self.status,
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
