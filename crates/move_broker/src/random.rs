//! A source that plays a uniformly random legal move.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::{MoveRequest, MoveSource, SourceError};

/// Baseline opponent, and the default source for the driver's `go`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSource;

impl RandomSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MoveSource for RandomSource {
    fn name(&self) -> &str {
        "random"
    }

    async fn propose(&self, request: &MoveRequest) -> Result<String, SourceError> {
        request
            .legal_moves
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| SourceError::Protocol("empty legal move list".to_string()))
    }
}
