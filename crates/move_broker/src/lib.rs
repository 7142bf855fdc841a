//! External move sources and the broker that keeps them honest.
//!
//! A [`MoveSource`] (a language model, a remote engine, a human over the
//! network) is handed the position and the authoritative list of legal moves
//! and answers with a string. Nothing it says is trusted: the [`MoveBroker`]
//! parses each reply, checks it against the legal list it derived itself,
//! retries a bounded number of times and finally falls back to a uniformly
//! random legal move so a game never stalls on a misbehaving source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use chess_rules::GameStatus;

pub mod broker;
pub mod proposal;
pub mod random;

pub use broker::{BrokerConfig, BrokeredMove, MoveBroker, MoveOrigin, Rejection};
pub use proposal::Proposal;
pub use random::RandomSource;

/// What a source is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub fen: String,
    /// Every legal move in UCI notation. The answer must be one of these.
    pub legal_moves: Vec<String>,
    /// 1-based attempt number.
    pub attempt: u32,
    /// Replies already rejected for this position, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("move source unavailable: {0}")]
    Unavailable(String),
    #[error("move source protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    #[error("no legal moves, game is {0:?}")]
    NoLegalMoves(GameStatus),
}

/// Something that proposes moves.
///
/// The reply is either a bare UCI move (`e2e4`) or a JSON object
/// `{"move": "e2e4", "comment": "..."}`.
#[async_trait]
pub trait MoveSource: Send + Sync {
    fn name(&self) -> &str;

    async fn propose(&self, request: &MoveRequest) -> Result<String, SourceError>;
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
