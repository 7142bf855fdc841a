//! Mad Chess: standard chess plus two relaxations.
//!
//! * **Betrayal** - a piece may capture one of its own side's pieces if its
//!   movement pattern reaches it.
//! * **Teleport** - a piece may jump to a square its pattern cannot reach,
//!   but only when the caller's random roll succeeded. Each teleport lowers
//!   the chance of the next one.
//!
//! Kings never teleport and are never captured. Every accepted move, relaxed
//! or not, must leave the mover's own king unattacked.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attacks::piece_reaches;
use crate::board::Position;
use crate::error::{IllegalMove, RuleViolation};
use crate::game::{GameStatus, find_legal, status_from};
use crate::movegen::{leaves_king_safe, legal_moves, pseudo_moves};
use crate::rules::{MoveContext, MoveKind, RuleSet};
use crate::types::*;
use crate::uci::move_to_uci;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MadChessConfig {
    /// Probability that a teleport roll succeeds at the start of a game.
    pub teleport_chance: f64,
    /// Factor applied to the chance after every teleport.
    pub decay: f64,
    /// The chance never decays below this.
    pub min_chance: f64,
}

impl Default for MadChessConfig {
    fn default() -> Self {
        Self {
            teleport_chance: 0.25,
            decay: 0.5,
            min_chance: 0.02,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MadChess {
    config: MadChessConfig,
    teleport_chance: f64,
    teleports_used: u32,
}

impl Default for MadChess {
    fn default() -> Self {
        Self::new(MadChessConfig::default())
    }
}

impl MadChess {
    pub fn new(mut config: MadChessConfig) -> Self {
        let unit = |x: f64| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        config.teleport_chance = unit(config.teleport_chance);
        config.decay = unit(config.decay);
        config.min_chance = unit(config.min_chance).min(config.teleport_chance);
        Self {
            teleport_chance: config.teleport_chance,
            config,
            teleports_used: 0,
        }
    }

    pub fn teleport_chance(&self) -> f64 {
        self.teleport_chance
    }

    pub fn teleports_used(&self) -> u32 {
        self.teleports_used
    }

    /// Same-color captures the side to move can make without exposing its king.
    pub fn betrayal_moves(&self, pos: &Position) -> Vec<Move> {
        let mut tmp = pos.clone();
        let side = pos.side_to_move;
        let mut out = Vec::new();

        for (from, _) in pos.board.pieces().filter(|(_, pc)| pc.color == side) {
            for (to, target) in pos.board.pieces() {
                if target.color != side
                    || target.kind == PieceKind::King
                    || !piece_reaches(&pos.board, from, to)
                {
                    continue;
                }
                let mv = relaxed_move(pos, from, to, None);
                if leaves_king_safe(&mut tmp, mv) {
                    push_with_promotions(&mut out, pos, mv);
                }
            }
        }
        out
    }

    fn validate_relaxed(
        &self,
        pos: &Position,
        mv: Move,
        ctx: MoveContext,
    ) -> Result<MoveKind, RuleViolation> {
        let side = pos.side_to_move;
        let illegal = || IllegalMove {
            uci: move_to_uci(mv),
            fen: pos.to_fen(),
        };

        let piece = pos
            .piece_at(mv.from)
            .ok_or_else(|| RuleViolation::EmptySquare(sq_to_coord(mv.from)))?;
        let target = pos.piece_at(mv.to);

        if let Some(t) = target
            && t.color == side
            && piece_reaches(&pos.board, mv.from, mv.to)
        {
            let promotes = piece.kind == PieceKind::Pawn && rank_of(mv.to) == side.promo_rank();
            if mv.promo.is_some() != promotes {
                return Err(illegal().into());
            }
            let relaxed = relaxed_move(pos, mv.from, mv.to, mv.promo);
            return self
                .ensure_king_safe(pos, relaxed)
                .map(|_| MoveKind::Betrayal(relaxed));
        }

        // The pattern reaches the square and the standard rules still said
        // no: king safety, or a promotion without a piece letter.
        let mut pseudo = Vec::new();
        pseudo_moves(pos, &mut pseudo);
        if pseudo.iter().any(|m| m.from == mv.from && m.to == mv.to) {
            return Err(illegal().into());
        }

        if piece.kind == PieceKind::King {
            return Err(RuleViolation::KingTeleport);
        }
        if target.is_some_and(|t| t.color == side) {
            return Err(illegal().into());
        }
        if piece.kind == PieceKind::Pawn && (rank_of(mv.to) == 0 || rank_of(mv.to) == 7) {
            return Err(RuleViolation::PawnTeleportToEdge);
        }
        if mv.promo.is_some() {
            return Err(illegal().into());
        }
        if !ctx.teleport_roll {
            return Err(RuleViolation::TeleportNotRolled);
        }

        let relaxed = relaxed_move(pos, mv.from, mv.to, None);
        self.ensure_king_safe(pos, relaxed)
            .map(|_| MoveKind::Teleport(relaxed))
    }

    fn ensure_king_safe(&self, pos: &Position, mv: Move) -> Result<(), RuleViolation> {
        let mut tmp = pos.clone();
        if leaves_king_safe(&mut tmp, mv) {
            Ok(())
        } else {
            Err(RuleViolation::KingLeftAttacked(pos.side_to_move))
        }
    }
}

// A move with only the capture flag; an unexpanded promotion becomes a queen.
fn relaxed_move(pos: &Position, from: Square, to: Square, promo: Option<PieceKind>) -> Move {
    let mut mv = Move::new(from, to);
    mv.flags.capture = pos.piece_at(to).is_some();
    mv.promo = promo;
    mv
}

fn push_with_promotions(out: &mut Vec<Move>, pos: &Position, mv: Move) {
    let promotes = pos
        .piece_at(mv.from)
        .is_some_and(|pc| pc.kind == PieceKind::Pawn && rank_of(mv.to) == pc.color.promo_rank());
    if promotes {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move {
                promo: Some(pk),
                ..mv
            });
        }
    } else {
        out.push(mv);
    }
}

impl RuleSet for MadChess {
    fn name(&self) -> &str {
        "mad_chess"
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        let mut moves = legal_moves(pos);
        moves.extend(self.betrayal_moves(pos));
        moves
    }

    fn validate_move(
        &self,
        pos: &Position,
        mv: Move,
        ctx: MoveContext,
    ) -> Result<MoveKind, RuleViolation> {
        if mv.from == mv.to {
            return Err(RuleViolation::NullMove);
        }
        match pos.piece_at(mv.from) {
            None => return Err(RuleViolation::EmptySquare(sq_to_coord(mv.from))),
            Some(pc) if pc.color != pos.side_to_move => {
                return Err(RuleViolation::NotYourPiece(sq_to_coord(mv.from)));
            }
            Some(_) => {}
        }
        if pos.piece_at(mv.to).is_some_and(|t| t.kind == PieceKind::King) {
            return Err(RuleViolation::KingCapture);
        }

        match find_legal(pos, mv) {
            Ok(m) => Ok(MoveKind::Standard(m)),
            Err(_) => self.validate_relaxed(pos, mv, ctx),
        }
    }

    /// Roll for a teleport at the current chance.
    fn roll(&self, rng: &mut dyn RngCore) -> MoveContext {
        MoveContext {
            teleport_roll: rng.gen_bool(self.teleport_chance),
        }
    }

    fn apply(&mut self, pos: &Position, kind: MoveKind) -> Position {
        let mut next = pos.clone();
        next.make_move(kind.mv());

        if let MoveKind::Teleport(mv) = kind {
            self.teleports_used += 1;
            self.teleport_chance =
                (self.teleport_chance * self.config.decay).max(self.config.min_chance);
            debug!(
                teleport = %move_to_uci(mv),
                used = self.teleports_used,
                chance = self.teleport_chance,
                "teleport chance decayed"
            );
        }
        next
    }

    fn status(&self, pos: &Position) -> GameStatus {
        for c in [Color::White, Color::Black] {
            if pos.king_sq(c).is_none() {
                return GameStatus::KingLost(c);
            }
        }
        status_from(pos, !self.legal_moves(pos).is_empty())
    }

    fn new_game(&mut self) {
        self.teleport_chance = self.config.teleport_chance;
        self.teleports_used = 0;
    }
}

#[cfg(test)]
#[path = "mad_chess_tests.rs"]
mod mad_chess_tests;
