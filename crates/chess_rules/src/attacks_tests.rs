use super::*;
use crate::board::Position;

fn board(fen: &str) -> Board {
    Position::from_fen(fen).unwrap().board
}

fn at(c: &str) -> Square {
    coord_to_sq(c).unwrap()
}

#[test]
fn test_knight_attacks() {
    // Knight on e4 covers all 8 jumps
    let b = board("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1");
    for c in ["d6", "f6", "g5", "g3", "f2", "d2", "c3", "c5"] {
        assert!(is_square_attacked(&b, at(c), Color::White), "{c}");
    }
    assert!(!is_square_attacked(&b, at("e5"), Color::White));

    // Knight in the corner only reaches two squares
    let b = board("4k3/8/8/8/8/8/8/N3K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("c2"), Color::White));
    assert!(is_square_attacked(&b, at("b3"), Color::White));
    assert!(!is_square_attacked(&b, at("b2"), Color::White));
}

#[test]
fn test_pawn_attacks_depend_on_color() {
    // White pawn e4 attacks d5 and f5, not d3
    let b = board("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("d5"), Color::White));
    assert!(is_square_attacked(&b, at("f5"), Color::White));
    assert!(!is_square_attacked(&b, at("d3"), Color::White));
    assert!(!is_square_attacked(&b, at("e5"), Color::White));

    // Black pawn e5 attacks d4 and f4
    let b = board("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("d4"), Color::Black));
    assert!(is_square_attacked(&b, at("f4"), Color::Black));
    assert!(!is_square_attacked(&b, at("d6"), Color::Black));
}

#[test]
fn test_edge_pawn_does_not_wrap() {
    // White pawn on a2 attacks b3 only, never h-file squares
    let b = board("4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("b3"), Color::White));
    assert!(!is_square_attacked(&b, at("h2"), Color::White));
    assert!(!is_square_attacked(&b, at("h3"), Color::White));
}

#[test]
fn test_rook_attacks_with_blockers() {
    // Rook on a1, own pawn on a4
    let b = board("4k3/8/8/8/P7/8/8/R3K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("a2"), Color::White));
    assert!(is_square_attacked(&b, at("a3"), Color::White));
    assert!(is_square_attacked(&b, at("a4"), Color::White));
    assert!(!is_square_attacked(&b, at("a5"), Color::White));
    assert!(is_square_attacked(&b, at("d1"), Color::White));
}

#[test]
fn test_diagonal_slider_kinds() {
    // Bishop attacks diagonally, not orthogonally; queen does both
    let b = board("4k3/8/8/8/3b4/8/8/4K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("g1"), Color::Black));
    assert!(!is_square_attacked(&b, at("d1"), Color::Black));

    let b = board("4k3/8/8/8/3q4/8/8/4K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("g1"), Color::Black));
    assert!(is_square_attacked(&b, at("d1"), Color::Black));
}

#[test]
fn test_enemy_blocker_stops_ray() {
    // Black rook on e8 is screened by a white knight on e4
    let b = board("4r2k/8/8/8/4N3/8/8/4K3 w - - 0 1");
    assert!(is_square_attacked(&b, at("e4"), Color::Black));
    assert!(!is_square_attacked(&b, at("e1"), Color::Black));
}

#[test]
fn test_king_adjacency() {
    // Touching kings cannot come out of a FEN, so place them by hand
    let mut b = Board::empty();
    b.set_piece(at("d2"), Some(Piece::new(Color::Black, PieceKind::King)));
    b.set_piece(at("e1"), Some(Piece::new(Color::White, PieceKind::King)));
    assert!(is_square_attacked(&b, at("e1"), Color::Black));
    assert!(is_square_attacked(&b, at("d2"), Color::White));
    assert!(!is_square_attacked(&b, at("g1"), Color::Black));
}

#[test]
fn test_piece_reaches_ignores_occupant() {
    // Rook on a1 reaches its own knight on a3 but not past it
    let b = board("4k3/8/8/8/8/N7/8/R3K3 w - - 0 1");
    assert!(piece_reaches(&b, at("a1"), at("a3")));
    assert!(!piece_reaches(&b, at("a1"), at("a4")));
    assert!(piece_reaches(&b, at("a1"), at("e1")));
    assert!(!piece_reaches(&b, at("a1"), at("b2")));

    // Pawns reach diagonally forward only
    let b = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    assert!(piece_reaches(&b, at("e2"), at("d3")));
    assert!(!piece_reaches(&b, at("e2"), at("e3")));
    assert!(!piece_reaches(&b, at("e2"), at("d1")));

    assert!(!piece_reaches(&b, at("h8"), at("h7")));
}
