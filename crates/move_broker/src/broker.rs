//! The retry loop between a move source and the rules engine.

use std::time::Duration;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use chess_rules::{GameSession, Move, Position, game_status, legal_moves, move_to_uci, parse_uci};

use crate::proposal::Proposal;
use crate::{BrokerError, MoveRequest, MoveSource, SourceError};

/// Hard ceiling on attempts per move, whatever the configuration says.
pub const MAX_ATTEMPTS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Attempts before falling back to a random move. Clamped to `1..=4`.
    pub max_attempts: u32,
    /// Time allowed for each attempt.
    pub attempt_timeout_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout_ms: 10_000,
        }
    }
}

impl BrokerConfig {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_ATTEMPTS)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    /// The source proposed it on this attempt.
    Source { attempt: u32 },
    /// Every attempt failed and the broker picked at random.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokeredMove {
    /// The move as generated by the engine, flags included.
    pub mv: Move,
    pub uci: String,
    pub origin: MoveOrigin,
    pub comment: Option<String>,
}

/// Why one attempt did not produce a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("unreadable reply {0:?}")]
    Garbage(String),
    #[error("{0} is not a legal move")]
    NotLegal(String),
}

#[derive(Debug, Clone, Default)]
pub struct MoveBroker {
    config: BrokerConfig,
}

impl MoveBroker {
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Ask `source` for a move in `pos` under the standard rules.
    pub async fn next_move(
        &self,
        source: &dyn MoveSource,
        pos: &Position,
    ) -> Result<BrokeredMove, BrokerError> {
        let legal = legal_moves(pos);
        if legal.is_empty() {
            return Err(BrokerError::NoLegalMoves(game_status(pos)));
        }
        Ok(self.run(source, pos.to_fen(), legal).await)
    }

    /// Ask `source` for a move in the session's current position, judged by
    /// the session's rule set.
    pub async fn next_move_for(
        &self,
        source: &dyn MoveSource,
        session: &GameSession,
    ) -> Result<BrokeredMove, BrokerError> {
        let legal = session.legal_moves();
        if legal.is_empty() || session.status().is_over() {
            return Err(BrokerError::NoLegalMoves(session.status()));
        }
        Ok(self.run(source, session.fen(), legal).await)
    }

    // `legal` is never empty here.
    async fn run(&self, source: &dyn MoveSource, fen: String, legal: Vec<Move>) -> BrokeredMove {
        let mut request = MoveRequest {
            fen,
            legal_moves: legal.iter().copied().map(move_to_uci).collect(),
            attempt: 0,
            rejected: Vec::new(),
        };
        let limit = self.config.attempt_timeout();

        for attempt in 1..=self.config.attempts() {
            request.attempt = attempt;
            match self.attempt(source, &request, &legal, limit).await {
                Ok((mv, comment)) => {
                    debug!(source = source.name(), attempt, mv = %mv, "move accepted");
                    return BrokeredMove {
                        mv,
                        uci: move_to_uci(mv),
                        origin: MoveOrigin::Source { attempt },
                        comment,
                    };
                }
                Err(rejection) => {
                    warn!(
                        source = source.name(),
                        attempt,
                        fen = %request.fen,
                        reason = %rejection,
                        "rejected proposed move"
                    );
                    if let Rejection::NotLegal(uci) | Rejection::Garbage(uci) = rejection {
                        request.rejected.push(uci);
                    }
                }
            }
        }

        let mv = legal
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(legal[0]);
        warn!(
            source = source.name(),
            attempts = self.config.attempts(),
            mv = %mv,
            "move source gave up, playing a random legal move"
        );
        BrokeredMove {
            mv,
            uci: move_to_uci(mv),
            origin: MoveOrigin::Fallback,
            comment: None,
        }
    }

    async fn attempt(
        &self,
        source: &dyn MoveSource,
        request: &MoveRequest,
        legal: &[Move],
        limit: Duration,
    ) -> Result<(Move, Option<String>), Rejection> {
        let raw = timeout(limit, source.propose(request))
            .await
            .map_err(|_| Rejection::Timeout(limit))??;

        let proposal = Proposal::parse(&raw).ok_or_else(|| Rejection::Garbage(raw.clone()))?;
        let requested =
            parse_uci(&proposal.uci).map_err(|_| Rejection::Garbage(proposal.uci.clone()))?;
        let mv = legal
            .iter()
            .copied()
            .find(|m| *m == requested)
            .ok_or_else(|| Rejection::NotLegal(proposal.uci.clone()))?;
        Ok((mv, proposal.comment))
    }
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod broker_tests;
