use super::*;
use crate::movegen::legal_moves;

#[test]
fn test_parse_plain_and_promotion() {
    let mv = parse_uci("e2e4").unwrap();
    assert_eq!(mv.from, coord_to_sq("e2").unwrap());
    assert_eq!(mv.to, coord_to_sq("e4").unwrap());
    assert_eq!(mv.promo, None);

    let mv = parse_uci("e7e8n").unwrap();
    assert_eq!(mv.promo, Some(PieceKind::Knight));
    assert_eq!(move_to_uci(mv), "e7e8n");
}

#[test]
fn test_rejects_malformed_uci() {
    assert_eq!(parse_uci("e2e"), Err(UciError::Length("e2e".into())));
    assert_eq!(parse_uci("e2e4qq"), Err(UciError::Length("e2e4qq".into())));
    assert_eq!(parse_uci("i2e4"), Err(UciError::Square("i2".into())));
    assert_eq!(parse_uci("e2e9"), Err(UciError::Square("e9".into())));
    assert_eq!(parse_uci("e7e8k"), Err(UciError::Promotion('k')));
    assert_eq!(parse_uci("e7e8Q"), Err(UciError::Promotion('Q')));
    assert!(parse_uci("é2e4").is_err());
}

#[test]
fn test_uci_round_trip_over_generated_moves() {
    let positions = [
        Position::startpos(),
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap(),
        Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap(),
    ];
    for pos in positions {
        for mv in legal_moves(&pos) {
            assert_eq!(parse_uci(&move_to_uci(mv)).unwrap(), mv);
        }
    }
}

#[test]
fn test_parse_uci_move_resolves_flags() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "e1g1").unwrap();
    assert!(mv.is_castle_kingside());

    let err = parse_uci_move(&pos, "e1e3").unwrap_err();
    assert!(matches!(err, Error::Illegal(_)));

    let err = parse_uci_move(&pos, "zz").unwrap_err();
    assert!(matches!(err, Error::Uci(_)));
}

#[test]
fn test_promotion_needs_piece_letter() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    assert!(parse_uci_move(&pos, "e7e8").is_err());
    let mv = parse_uci_move(&pos, "e7e8q").unwrap();
    assert_eq!(mv.promo, Some(PieceKind::Queen));
}

#[test]
fn test_set_position_from_uci() {
    let pos = set_position_from_uci(&["startpos", "moves", "e2e4", "e7e5", "g1f3"]).unwrap();
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );

    let pos = set_position_from_uci(&[
        "fen", "4k3/8/8/8/8/8/8/4K2R", "w", "K", "-", "0", "1", "moves", "e1g1",
    ])
    .unwrap();
    assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/5RK1 b - - 1 1");

    assert_eq!(set_position_from_uci(&[]).unwrap(), Position::startpos());
    assert!(set_position_from_uci(&["startpos", "moves", "e2e5"]).is_err());
}

#[test]
fn test_move_serde_as_uci_string() {
    let mv = parse_uci("a7a8r").unwrap();
    let json = serde_json::to_string(&mv).unwrap();
    assert_eq!(json, "\"a7a8r\"");
    let back: Move = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mv);
}
