use crate::attacks::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::board::{CastleSquares, Position};
use crate::types::*;
use crate::uci::move_to_uci;

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// The position is played on and restored; it is identical on return.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| leaves_king_safe(pos, mv));
    expand_promotions(out);
}

/// Legal moves of the piece on `from`, for click-to-highlight.
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut moves = legal_moves(pos);
    moves.retain(|m| m.from == from);
    moves
}

/// The legal moves as UCI strings, in generation order. This is the list
/// handed to anything outside the engine that proposes moves.
pub fn legal_move_strings(pos: &Position) -> Vec<String> {
    legal_moves(pos).into_iter().map(move_to_uci).collect()
}

/// Play `mv` and report whether the mover's own king is unattacked afterwards.
pub(crate) fn leaves_king_safe(pos: &mut Position, mv: Move) -> bool {
    let mover = pos.side_to_move;
    let undo = pos.make_move(mv);
    let safe = !pos.in_check(mover);
    pos.unmake_move(mv, undo);
    safe
}

// One pseudo promotion becomes four moves once it is known to be legal.
fn expand_promotions(out: &mut Vec<Move>) {
    if !out.iter().any(|m| m.flags.promotion && m.promo.is_none()) {
        return;
    }
    let moves = std::mem::take(out);
    for mv in moves {
        if mv.flags.promotion && mv.promo.is_none() {
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
}

/// Moves that follow piece movement rules, ignoring self-check.
pub(crate) fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for (sq, pc) in pos.board.pieces() {
        if pc.color != pos.side_to_move {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, pc.color, out),
            PieceKind::Knight => gen_steps(pos, sq, pc.color, out, &KNIGHT_DELTAS),
            PieceKind::Bishop => gen_slider(pos, sq, pc.color, out, &DIAGONALS),
            PieceKind::Rook => gen_slider(pos, sq, pc.color, out, &ORTHOGONALS),
            PieceKind::Queen => {
                gen_slider(pos, sq, pc.color, out, &DIAGONALS);
                gen_slider(pos, sq, pc.color, out, &ORTHOGONALS);
            }
            PieceKind::King => {
                gen_steps(pos, sq, pc.color, out, &KING_DELTAS);
                gen_castle(pos, sq, pc.color, out);
            }
        }
    }
}

fn quiet(from: Square, to: Square) -> Move {
    Move::new(from, to)
}

fn capture(from: Square, to: Square) -> Move {
    Move::flagged(
        from,
        to,
        MoveFlags {
            capture: true,
            ..Default::default()
        },
    )
}

// Kings are never captured, even in a position that was set up by hand with
// the side not to move in check.
fn capturable(target: Piece, mover: Color) -> bool {
    target.color != mover && target.kind != PieceKind::King
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();

    let mut push = |mut mv: Move| {
        if rank_of(mv.to) == c.promo_rank() {
            mv.flags.promotion = true;
        }
        out.push(mv);
    };

    // forward 1
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push(quiet(from, to));

        // forward 2 from start
        if r == c.pawn_rank()
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            push(Move::flagged(
                from,
                to2,
                MoveFlags {
                    double_pawn_push: true,
                    ..Default::default()
                },
            ));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if capturable(tpc, c) => push(capture(from, to)),
            Some(_) => {}
            None if pos.en_passant == Some(to) => push(Move::flagged(
                from,
                to,
                MoveFlags {
                    capture: true,
                    en_passant: true,
                    ..Default::default()
                },
            )),
            None => {}
        }
    }
}

// Knight and king: fixed offsets onto empty or enemy squares.
fn gen_steps(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(quiet(from, to)),
                Some(pc) if capturable(pc, c) => out.push(capture(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(quiet(from, to)),
                Some(pc) if capturable(pc, c) => {
                    out.push(capture(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling is the one pseudo move that already asks about attacks: the king
/// may not start on or cross an attacked square. Its destination is left to
/// the legality filter like every other king move.
fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let enemy = c.other();
    for kingside in [true, false] {
        if !pos.castling.has(c, kingside) {
            continue;
        }
        let cs = CastleSquares::of(c, kingside);
        if from != cs.king_from || pos.piece_at(cs.rook_from) != Some(Piece::new(c, PieceKind::Rook))
        {
            continue;
        }
        if cs.between().any(|s| pos.piece_at(s).is_some()) {
            continue;
        }
        if pos.is_square_attacked(cs.king_from, enemy) || pos.is_square_attacked(cs.transit(), enemy)
        {
            continue;
        }
        out.push(Move::flagged(
            cs.king_from,
            cs.king_to,
            MoveFlags {
                castle_kingside: kingside,
                castle_queenside: !kingside,
                ..Default::default()
            },
        ));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
