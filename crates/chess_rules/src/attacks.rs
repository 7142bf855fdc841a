//! Attack detection on the mailbox board.
//!
//! `is_square_attacked` knows nothing about whose turn it is; check
//! detection, castling safety, the legality filter and the variant rule sets
//! all call it unchanged.

use crate::board::Board;
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Whether any piece of color `by` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    let tf = file_of(target);
    let tr = rank_of(target);
    let holds = |s: Square, kind: PieceKind| {
        board
            .piece_at(s)
            .is_some_and(|pc| pc.color == by && pc.kind == kind)
    };

    // Pawns attack forward, so look one rank behind the target
    let dr = -by.forward();
    for df in [-1, 1] {
        if let Some(s) = sq(tf + df, tr + dr)
            && holds(s, PieceKind::Pawn)
        {
            return true;
        }
    }

    for (df, dr) in KNIGHT_DELTAS {
        if let Some(s) = sq(tf + df, tr + dr)
            && holds(s, PieceKind::Knight)
        {
            return true;
        }
    }

    for (df, dr) in KING_DELTAS {
        if let Some(s) = sq(tf + df, tr + dr)
            && holds(s, PieceKind::King)
        {
            return true;
        }
    }

    ray_hits(board, target, by, &DIAGONALS, PieceKind::Bishop)
        || ray_hits(board, target, by, &ORTHOGONALS, PieceKind::Rook)
}

/// Cast rays from `target`; the first blocker decides each ray.
fn ray_hits(board: &Board, target: Square, by: Color, dirs: &[(i8, i8)], slider: PieceKind) -> bool {
    for (df, dr) in dirs {
        let mut f = file_of(target) + df;
        let mut r = rank_of(target) + dr;
        while let Some(s) = sq(f, r) {
            if let Some(pc) = board.piece_at(s) {
                if pc.color == by && (pc.kind == slider || pc.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            f += df;
            r += dr;
        }
    }
    false
}

/// Whether the piece on `from` covers `to` by its capture geometry, ignoring
/// what stands on `to`. Pawns cover their two forward diagonals; castling is
/// not geometry.
pub fn piece_reaches(board: &Board, from: Square, to: Square) -> bool {
    let Some(pc) = board.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    let df = file_of(to) - file_of(from);
    let dr = rank_of(to) - rank_of(from);

    match pc.kind {
        PieceKind::Pawn => dr == pc.color.forward() && df.abs() == 1,
        PieceKind::Knight => KNIGHT_DELTAS.contains(&(df, dr)),
        PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
        PieceKind::Bishop => df.abs() == dr.abs() && path_clear(board, from, to),
        PieceKind::Rook => (df == 0 || dr == 0) && path_clear(board, from, to),
        PieceKind::Queen => {
            (df.abs() == dr.abs() || df == 0 || dr == 0) && path_clear(board, from, to)
        }
    }
}

// Squares strictly between two aligned squares are empty.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_f = (file_of(to) - file_of(from)).signum();
    let step_r = (rank_of(to) - rank_of(from)).signum();
    let mut f = file_of(from) + step_f;
    let mut r = rank_of(from) + step_r;
    while let Some(s) = sq(f, r) {
        if s == to {
            return true;
        }
        if board.piece_at(s).is_some() {
            return false;
        }
        f += step_f;
        r += step_r;
    }
    false
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
