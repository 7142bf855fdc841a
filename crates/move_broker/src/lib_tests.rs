use super::*;
use chess_rules::{Position, legal_move_strings};

fn request(fen: &str, legal_moves: Vec<String>) -> MoveRequest {
    MoveRequest {
        fen: fen.to_string(),
        legal_moves,
        attempt: 1,
        rejected: Vec::new(),
    }
}

#[test]
fn test_request_json_shape() {
    let req = request(chess_rules::STARTPOS_FEN, vec!["e2e4".into(), "d2d4".into()]);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["fen"], chess_rules::STARTPOS_FEN);
    assert_eq!(json["legal_moves"][1], "d2d4");
    assert_eq!(json["attempt"], 1);
    assert!(json.get("rejected").is_none());

    let back: MoveRequest = serde_json::from_value(json).unwrap();
    assert_eq!(back, req);
}

#[tokio::test]
async fn test_random_source_picks_from_the_list() {
    let pos = Position::startpos();
    let legal = legal_move_strings(&pos);
    let req = request(&pos.to_fen(), legal.clone());
    for _ in 0..20 {
        let reply = RandomSource.propose(&req).await.unwrap();
        assert!(legal.contains(&reply));
    }
}

#[tokio::test]
async fn test_random_source_with_no_moves() {
    let req = request("k7/8/1QK5/8/8/8/8/8 b - - 0 1", Vec::new());
    assert!(matches!(
        RandomSource::new().propose(&req).await,
        Err(SourceError::Protocol(_))
    ));
}
