//! The core data type shared across all joke sources.
//!
//! Every source converts whatever its API returns into a `JokeItem` so the
//! rest of the application (the bounded list, persistence, rendering) stays
//! source-agnostic.  The type is serializable because the host snapshots the
//! list to disk between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single joke, normalised from any source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeItem {
    /// The joke text itself.
    pub text: String,

    /// When this process received the joke.  Display-only; the list keeps
    /// arrival order regardless.
    pub received_at: DateTime<Utc>,

    /// Name of the source this came from (e.g. "GeekJokes").
    pub source_name: String,
}

impl JokeItem {
    /// Stamp `text` with the current time and the producing source's label.
    pub fn now(text: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            received_at: Utc::now(),
            source_name: source_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_stamps_text_and_label() {
        let joke = JokeItem::now("why did the chicken", "test");
        assert_eq!(joke.text, "why did the chicken");
        assert_eq!(joke.source_name, "test");
    }

    #[test]
    fn serde_round_trip() {
        let joke = JokeItem::now("a joke", "test");
        let json = serde_json::to_string(&joke).unwrap();
        let back: JokeItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, joke);
    }
}
