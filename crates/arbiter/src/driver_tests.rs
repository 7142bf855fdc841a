use async_trait::async_trait;

use super::*;
use chess_rules::MadChessConfig;
use move_broker::{MoveRequest, RandomSource, SourceError};

fn arbiter() -> Arbiter<RandomSource> {
    Arbiter::with_rng(ArbiterConfig::default(), RandomSource, StdRng::seed_from_u64(3))
}

fn out(reply: Reply) -> String {
    match reply {
        Reply::Output(text) => text,
        other => panic!("expected output, got {other:?}"),
    }
}

async fn run(a: &mut Arbiter<impl MoveSource>, line: &str) -> String {
    out(a.handle(line).await)
}

/// Always answers with the same text.
struct Fixed(&'static str);

#[async_trait]
impl MoveSource for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn propose(&self, _request: &MoveRequest) -> Result<String, SourceError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn test_blank_lines_and_quit() {
    let mut a = arbiter();
    assert_eq!(a.handle("   ").await, Reply::Silent);
    assert_eq!(a.handle("quit").await, Reply::Quit);
}

#[tokio::test]
async fn test_unknown_command() {
    let mut a = arbiter();
    assert!(run(&mut a, "castle").await.starts_with("error unknown command"));
}

#[tokio::test]
async fn test_move_and_history() {
    let mut a = arbiter();
    assert_eq!(run(&mut a, "move e2e4").await, "played e2e4 standard in_progress");
    assert_eq!(run(&mut a, "move e7e5").await, "played e7e5 standard in_progress");
    assert_eq!(run(&mut a, "history").await, "e2e4 e7e5");
    assert_eq!(
        run(&mut a, "fen").await,
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );
}

#[tokio::test]
async fn test_illegal_move_changes_nothing() {
    let mut a = arbiter();
    let before = run(&mut a, "fen").await;
    assert!(run(&mut a, "move e2e5").await.starts_with("error illegal move e2e5"));
    assert!(run(&mut a, "move e2").await.starts_with("error"));
    assert!(run(&mut a, "move").await.starts_with("error usage"));
    assert_eq!(run(&mut a, "fen").await, before);
}

#[tokio::test]
async fn test_position_with_moves() {
    let mut a = arbiter();
    assert_eq!(
        run(&mut a, "position startpos moves f2f3 e7e5 g2g4 d8h4").await,
        "ok"
    );
    assert_eq!(run(&mut a, "status").await, "checkmate");
    assert_eq!(run(&mut a, "legal").await, "");
    assert_eq!(run(&mut a, "go").await, "bestmove 0000 checkmate");
}

#[tokio::test]
async fn test_bad_position_keeps_the_old_game() {
    let mut a = arbiter();
    run(&mut a, "move d2d4").await;
    assert!(run(&mut a, "position fen 8/8/8 w").await.starts_with("error"));
    assert!(
        run(&mut a, "position startpos moves e2e4 e2e4")
            .await
            .starts_with("error e2e4")
    );
    assert_eq!(run(&mut a, "history").await, "d2d4");
}

#[tokio::test]
async fn test_legal_from_square() {
    let mut a = arbiter();
    run(&mut a, "position fen 4k3/8/8/8/8/8/8/4K2R w K - 0 1").await;
    let moves = run(&mut a, "legal e1").await;
    assert!(moves.split(' ').any(|m| m == "e1g1"));
    assert!(run(&mut a, "legal z9").await.starts_with("error invalid square"));
    assert_eq!(run(&mut a, "legal a1").await, "");
}

#[tokio::test]
async fn test_go_plays_the_source_move() {
    let mut a = Arbiter::with_rng(
        ArbiterConfig::default(),
        Fixed(r#"{"move": "b1c3", "comment": "solid"}"#),
        StdRng::seed_from_u64(3),
    );
    assert_eq!(run(&mut a, "go").await, "bestmove b1c3 in_progress");
    assert_eq!(run(&mut a, "history").await, "b1c3");
}

#[tokio::test]
async fn test_go_falls_back_on_nonsense() {
    let mut a = Arbiter::with_rng(ArbiterConfig::default(), Fixed("resign"), StdRng::seed_from_u64(3));
    let reply = run(&mut a, "go").await;
    let uci = reply.split(' ').nth(1).unwrap().to_string();
    assert!(Position::startpos().legal_moves().iter().any(|m| move_to_uci(*m) == uci));
    assert_eq!(run(&mut a, "history").await, uci);
}

fn mad_arbiter(teleport_chance: f64) -> Arbiter<RandomSource> {
    let config = ArbiterConfig {
        variant: Variant::MadChess,
        mad_chess: MadChessConfig {
            teleport_chance,
            ..Default::default()
        },
        ..Default::default()
    };
    Arbiter::with_rng(config, RandomSource, StdRng::seed_from_u64(3))
}

#[tokio::test]
async fn test_variant_command() {
    let mut a = arbiter();
    assert_eq!(run(&mut a, "variant mad").await, "ok");
    assert!(run(&mut a, "variant crazyhouse").await.starts_with("error usage"));
    assert_eq!(run(&mut a, "move a1a2").await, "played a1a2 betrayal in_progress");
}

#[tokio::test]
async fn test_mad_chess_teleport_and_betrayal() {
    let mut a = mad_arbiter(1.0);
    assert_eq!(run(&mut a, "move b1b5").await, "played b1b5 teleport in_progress");
    assert_eq!(run(&mut a, "move e7e6").await, "played e7e6 standard in_progress");
    assert_eq!(
        run(&mut a, "move d1d2").await,
        "played d1d2 betrayal in_progress"
    );
    assert!(
        run(&mut a, "move e8e4")
            .await
            .starts_with("error the king cannot teleport")
    );
}

#[tokio::test]
async fn test_players_cannot_claim_a_teleport_roll() {
    let mut a = mad_arbiter(0.0);
    assert!(run(&mut a, "move b1b5 teleport").await.starts_with("error usage"));
    assert_eq!(run(&mut a, "move b1b5").await, "error teleport roll failed");
    assert_eq!(run(&mut a, "history").await, "");
}

#[tokio::test]
async fn test_replayed_teleports_are_accepted() {
    let mut a = mad_arbiter(0.0);
    assert_eq!(run(&mut a, "position startpos moves b1b5 e7e6").await, "ok");
    assert_eq!(run(&mut a, "history").await, "b1b5 e7e6");
}

#[tokio::test]
async fn test_variant_switch_resets_to_startpos() {
    let mut a = arbiter();
    run(&mut a, "move e2e4").await;
    run(&mut a, "variant standard").await;
    assert_eq!(run(&mut a, "fen").await, chess_rules::STARTPOS_FEN);
    assert_eq!(run(&mut a, "history").await, "");
}

#[tokio::test]
async fn test_reset_returns_to_position_start() {
    let mut a = arbiter();
    run(&mut a, "position fen 4k3/8/8/8/8/8/8/4K2R w K - 0 1 moves e1g1").await;
    assert_eq!(run(&mut a, "history").await, "e1g1");
    assert_eq!(run(&mut a, "reset").await, "ok");
    assert_eq!(run(&mut a, "fen").await, "4k3/8/8/8/8/8/8/4K2R w K - 0 1");
}
