//! The line protocol. One command per line, one reply per command.
//!
//! ```text
//! position startpos|fen <fen> [moves <uci>...]
//! variant standard|mad
//! legal [square]
//! move <uci>
//! go
//! status | fen | history | reset | quit
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use chess_rules::{
    Color, GameSession, GameStatus, MoveContext, MoveKind, Position, Variant, coord_to_sq,
    move_to_uci, set_position_from_uci,
};
use move_broker::{BrokerError, MoveBroker, MoveOrigin, MoveSource};

use crate::config::ArbiterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Silent,
    Quit,
}

impl Reply {
    fn ok() -> Reply {
        Reply::Output("ok".to_string())
    }

    fn error(msg: impl std::fmt::Display) -> Reply {
        warn!(error = %msg, "command failed");
        Reply::Output(format!("error {msg}"))
    }
}

pub struct Arbiter<S> {
    config: ArbiterConfig,
    session: GameSession,
    broker: MoveBroker,
    source: S,
    rng: StdRng,
}

impl<S: MoveSource> Arbiter<S> {
    pub fn new(config: ArbiterConfig, source: S) -> Self {
        Self::with_rng(config, source, StdRng::from_entropy())
    }

    pub fn with_rng(config: ArbiterConfig, source: S, rng: StdRng) -> Self {
        let session = GameSession::new(config.variant.rules(&config.mad_chess));
        Self {
            broker: MoveBroker::new(config.broker.clone()),
            config,
            session,
            source,
            rng,
        }
    }

    pub async fn handle(&mut self, line: &str) -> Reply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Reply::Silent;
        };

        match cmd {
            "position" => self.position(args),
            "variant" => self.variant(args),
            "legal" => self.legal(args),
            "move" => self.play(args),
            "go" => self.go().await,
            "status" => Reply::Output(status_word(self.session.status())),
            "fen" => Reply::Output(self.session.fen()),
            "history" => Reply::Output(self.session.history().join(" ")),
            "reset" => {
                self.session.reset();
                Reply::ok()
            }
            "quit" => Reply::Quit,
            other => Reply::error(format!("unknown command '{other}'")),
        }
    }

    fn new_session(&self, start: Position) -> GameSession {
        let rules = self.config.variant.rules(&self.config.mad_chess);
        GameSession::with_position(rules, start)
    }

    fn position(&mut self, args: &[&str]) -> Reply {
        let split = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
        let start = match set_position_from_uci(&args[..split]) {
            Ok(pos) => pos,
            Err(e) => return Reply::error(e),
        };

        let mut session = self.new_session(start);
        // Replayed teleports already won their roll.
        let replay = MoveContext {
            teleport_roll: true,
        };
        for uci in args.iter().skip(split + 1) {
            if let Err(e) = session.play(uci, replay) {
                return Reply::error(format!("{uci}: {e}"));
            }
        }
        self.session = session;
        Reply::ok()
    }

    fn variant(&mut self, args: &[&str]) -> Reply {
        let Some(variant) = args.first().and_then(|name| Variant::from_name(name)) else {
            return Reply::error("usage: variant standard|mad");
        };
        self.config.variant = variant;
        self.session = self.new_session(Position::startpos());
        info!(variant = ?variant, "variant changed");
        Reply::ok()
    }

    fn legal(&self, args: &[&str]) -> Reply {
        let moves = match args.first() {
            None => self.session.legal_move_strings(),
            Some(square) => match coord_to_sq(square) {
                Some(from) => self
                    .session
                    .legal_moves_from(from)
                    .into_iter()
                    .map(move_to_uci)
                    .collect(),
                None => return Reply::error(format!("invalid square '{square}'")),
            },
        };
        Reply::Output(moves.join(" "))
    }

    fn play(&mut self, args: &[&str]) -> Reply {
        let [uci] = args else {
            return Reply::error("usage: move <uci>");
        };
        // Interactive moves always take the rule set's own roll.
        let ctx = self.session.roll(&mut self.rng);

        match self.session.play(uci, ctx) {
            Ok(out) => Reply::Output(format!(
                "played {} {} {}",
                out.uci,
                kind_word(&out.kind),
                status_word(out.status)
            )),
            Err(e) => Reply::error(e),
        }
    }

    async fn go(&mut self) -> Reply {
        let picked = match self.broker.next_move_for(&self.source, &self.session).await {
            Ok(picked) => picked,
            Err(BrokerError::NoLegalMoves(status)) => {
                return Reply::Output(format!("bestmove 0000 {}", status_word(status)));
            }
        };
        if picked.origin == MoveOrigin::Fallback {
            warn!(mv = %picked.uci, "using fallback move");
        }

        match self.session.play_move(picked.mv, MoveContext::default()) {
            Ok(out) => Reply::Output(format!("bestmove {} {}", out.uci, status_word(out.status))),
            Err(e) => Reply::error(e),
        }
    }
}

fn kind_word(kind: &MoveKind) -> &'static str {
    match kind {
        MoveKind::Standard(_) => "standard",
        MoveKind::Betrayal(_) => "betrayal",
        MoveKind::Teleport(_) => "teleport",
    }
}

fn status_word(status: GameStatus) -> String {
    match status {
        GameStatus::InProgress => "in_progress".to_string(),
        GameStatus::Check => "check".to_string(),
        GameStatus::Checkmate => "checkmate".to_string(),
        GameStatus::Stalemate => "stalemate".to_string(),
        GameStatus::KingLost(Color::White) => "king_lost white".to_string(),
        GameStatus::KingLost(Color::Black) => "king_lost black".to_string(),
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
