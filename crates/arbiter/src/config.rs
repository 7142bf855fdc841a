//! Arbiter configuration, read from a TOML file.
//!
//! ```toml
//! variant = "mad_chess"
//! log_level = "debug"
//!
//! [mad_chess]
//! teleport_chance = 0.3
//!
//! [broker]
//! max_attempts = 4
//! attempt_timeout_ms = 2000
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chess_rules::{MadChessConfig, Variant};
use move_broker::BrokerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    pub variant: Variant,
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
    pub mad_chess: MadChessConfig,
    pub broker: BrokerConfig,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Standard,
            log_level: "info".to_string(),
            mad_chess: MadChessConfig::default(),
            broker: BrokerConfig::default(),
        }
    }
}

impl ArbiterConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid arbiter configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// The file named by the first argument, or defaults.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        match args.nth(1) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
