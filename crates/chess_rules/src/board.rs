use crate::attacks::is_square_attacked;
use crate::types::*;

/// 64-square mailbox. One slot per square, so two pieces can never share one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq as usize]
    }
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq as usize] = pc;
    }

    /// First king of color `c`, scanning from a1. `None` once it has been lost.
    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|p| (i as Square, p)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn has(&self, c: Color, kingside: bool) -> bool {
        match (c, kingside) {
            (Color::White, true) => self.wk,
            (Color::White, false) => self.wq,
            (Color::Black, true) => self.bk,
            (Color::Black, false) => self.bq,
        }
    }

    pub fn clear_color(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drop the right tied to a rook corner once anything leaves or lands on it.
    fn clear_corner(&mut self, s: Square) {
        match s {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

/// Fixed squares involved in one castling move.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CastleSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastleSquares {
    pub fn of(c: Color, kingside: bool) -> Self {
        let base = match c {
            Color::White => 0,
            Color::Black => 56,
        };
        if kingside {
            // e -> g, rook h -> f
            Self {
                king_from: base + 4,
                king_to: base + 6,
                rook_from: base + 7,
                rook_to: base + 5,
            }
        } else {
            // e -> c, rook a -> d
            Self {
                king_from: base + 4,
                king_to: base + 2,
                rook_from: base,
                rook_to: base + 3,
            }
        }
    }

    /// Squares strictly between king and rook; all must be empty.
    pub fn between(&self) -> impl Iterator<Item = Square> {
        let (lo, hi) = if self.king_from < self.rook_from {
            (self.king_from, self.rook_from)
        } else {
            (self.rook_from, self.king_from)
        };
        (lo + 1)..hi
    }

    /// The square the king crosses on its way to the destination.
    pub fn transit(&self) -> Square {
        self.rook_to
    }
}

/// A full game state.
///
/// Moves reach a position only through [`crate::apply_move`] or a
/// [`crate::RuleSet`], both of which check them against the legal set first.
/// The in-place `make_move` used by the generator is not part of the API:
///
/// ```compile_fail
/// let mut pos = chess_rules::Position::startpos();
/// pos.make_move(chess_rules::Move::new(12, 36));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(Square, Square)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<Square>,      // square actually captured in en-passant
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = Board::empty();

        // Pawns
        for f in 0..8 {
            board.set_piece(8 + f, Some(Piece::new(Color::White, PieceKind::Pawn)));
            board.set_piece(48 + f, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board.set_piece(f as Square, Some(Piece::new(Color::White, kind)));
            board.set_piece(56 + f as Square, Some(Piece::new(Color::Black, kind)));
        }

        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.board.king_sq(c)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board.set_piece(sq, pc);
    }

    /// Whether the king of `c` is attacked. A missing king is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        is_square_attacked(&self.board, target, by)
    }

    /// Play `mv` in place. The move must come from the generator (or a rule
    /// set), since its flags drive the castling and en-passant side effects.
    pub(crate) fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self
            .piece_at(from)
            .expect("make_move called with an empty from-square");
        let prev_castling = self.castling;
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // En-passant removes a pawn that is not on the destination square
        let mut captured = self.piece_at(to);
        let mut ep_captured_sq = None;
        if mv.flags.en_passant
            && let Some(cs) = sq(file_of(to), rank_of(from))
        {
            captured = self.piece_at(cs);
            self.set_piece(cs, None);
            ep_captured_sq = Some(cs);
        }

        self.set_piece(from, None);
        let placed = if moved.kind == PieceKind::Pawn && rank_of(to) == moved.color.promo_rank() {
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(to, Some(placed));

        let mut rook_move = None;
        if mv.is_castle() {
            let cs = CastleSquares::of(moved.color, mv.flags.castle_kingside);
            if let Some(rook) = self.piece_at(cs.rook_from) {
                self.set_piece(cs.rook_from, None);
                self.set_piece(cs.rook_to, Some(rook));
                rook_move = Some((cs.rook_from, cs.rook_to));
            }
        }

        if moved.kind == PieceKind::King {
            self.castling.clear_color(moved.color);
        }
        self.castling.clear_corner(from);
        self.castling.clear_corner(to);

        if mv.flags.double_pawn_push {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub(crate) fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was, which also reverts promotions
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}
