//! Decoding what a move source replied.

use serde::Deserialize;

/// A reply with the move text separated from any commentary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Proposal {
    #[serde(rename = "move")]
    pub uci: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Proposal {
    /// Accepts a bare move or a JSON object, optionally wrapped in a code
    /// fence. Returns `None` for anything else. The move text itself is not
    /// checked here.
    pub fn parse(raw: &str) -> Option<Proposal> {
        let text = strip_fence(raw.trim());

        if text.starts_with('{') {
            let mut p: Proposal = serde_json::from_str(text).ok()?;
            p.uci = p.uci.trim().to_string();
            p.comment = p.comment.filter(|c| !c.trim().is_empty());
            return (!p.uci.is_empty()).then_some(p);
        }

        let mut words = text.split_whitespace();
        let uci = words.next()?;
        // A bare reply is one token; prose is not a move.
        if words.next().is_some() {
            return None;
        }
        Some(Proposal {
            uci: uci.to_string(),
            comment: None,
        })
    }
}

fn strip_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop an info string such as ```json.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

#[cfg(test)]
#[path = "proposal_tests.rs"]
mod proposal_tests;
