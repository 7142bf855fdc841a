//! Rule sets: the standard game, and variants layered on the same engine.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::RuleViolation;
use crate::game::{GameStatus, find_legal, game_status};
use crate::mad_chess::{MadChess, MadChessConfig};
use crate::movegen::legal_moves;
use crate::types::Move;

/// Caller-supplied facts a rule set may need to judge a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveContext {
    /// Whether the random roll that unlocks a teleport succeeded.
    pub teleport_roll: bool,
}

/// How a move was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Legal under the standard rules.
    Standard(Move),
    /// Captures a piece of the mover's own color.
    Betrayal(Move),
    /// Ignores the piece's movement pattern.
    Teleport(Move),
}

impl MoveKind {
    pub fn mv(&self) -> Move {
        match *self {
            MoveKind::Standard(m) | MoveKind::Betrayal(m) | MoveKind::Teleport(m) => m,
        }
    }
}

/// A rule strategy over the shared engine.
///
/// `validate_move` never changes anything; `apply` is handed a `MoveKind` that
/// `validate_move` produced for the same position.
pub trait RuleSet: Send + Sync {
    fn name(&self) -> &str;

    /// Moves that are always available, independent of any roll.
    fn legal_moves(&self, pos: &Position) -> Vec<Move>;

    fn validate_move(
        &self,
        pos: &Position,
        mv: Move,
        ctx: MoveContext,
    ) -> Result<MoveKind, RuleViolation>;

    /// Draw the context for the next move. Rule sets without random
    /// elements return the default context.
    fn roll(&self, _rng: &mut dyn RngCore) -> MoveContext {
        MoveContext::default()
    }

    fn apply(&mut self, pos: &Position, kind: MoveKind) -> Position;

    fn status(&self, pos: &Position) -> GameStatus;

    /// Restore any state the rule set accumulated during a game.
    fn new_game(&mut self) {}
}

/// Plain chess.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RuleSet for StandardRules {
    fn name(&self) -> &str {
        "standard"
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        legal_moves(pos)
    }

    fn validate_move(
        &self,
        pos: &Position,
        mv: Move,
        _ctx: MoveContext,
    ) -> Result<MoveKind, RuleViolation> {
        Ok(MoveKind::Standard(find_legal(pos, mv)?))
    }

    fn apply(&mut self, pos: &Position, kind: MoveKind) -> Position {
        let mut next = pos.clone();
        next.make_move(kind.mv());
        next
    }

    fn status(&self, pos: &Position) -> GameStatus {
        game_status(pos)
    }
}

/// Rule set selector, as written in configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Standard,
    #[serde(alias = "mad")]
    MadChess,
}

impl Variant {
    pub fn rules(self, mad: &MadChessConfig) -> Box<dyn RuleSet> {
        match self {
            Variant::Standard => Box::new(StandardRules),
            Variant::MadChess => Box::new(MadChess::new(mad.clone())),
        }
    }

    pub fn from_name(name: &str) -> Option<Variant> {
        match name.to_ascii_lowercase().as_str() {
            "standard" | "classic" => Some(Variant::Standard),
            "mad" | "mad_chess" | "madchess" => Some(Variant::MadChess),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
