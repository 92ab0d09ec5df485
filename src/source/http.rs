//! HTTP joke API source.
//!
//! This module shows how to implement the [`Source`] trait for a concrete
//! remote API.  Use it as a template when wiring up a different joke
//! provider.
//!
//! The default endpoint is the Geek Jokes API, which answers a plain GET
//! with either a bare JSON string (`"a joke"`) or, with `?format=json`, an
//! object (`{"joke": "a joke"}`).  [`parse_body`](HttpJokeSource::parse_body)
//! accepts both shapes so the URL can be swapped freely on the command line.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::{JokeItem, Source};

/// Endpoint polled when no URL is given on the command line.
pub const DEFAULT_JOKE_API: &str = "https://geek-jokes.sahilm.me/api";

/// A joke source backed by an HTTP API returning JSON.
pub struct HttpJokeSource {
    /// The endpoint to poll.
    pub url: String,
    /// Human-readable label shown in the UI next to each joke.
    pub label: String,
    client: reqwest::Client,
}

impl HttpJokeSource {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Parse a response body into a [`JokeItem`].
    ///
    /// Pure (no I/O) so tests can exercise the parsing without a network.
    /// Accepts either a bare JSON string or an object with a string `joke`
    /// field.
    pub fn parse_body(body: &str, label: &str) -> Result<JokeItem> {
        let value: Value =
            serde_json::from_str(body).context("joke API returned invalid JSON")?;

        let text = match &value {
            Value::String(s) => s.as_str(),
            Value::Object(map) => match map.get("joke") {
                Some(Value::String(s)) => s.as_str(),
                _ => bail!("joke API object has no string \"joke\" field"),
            },
            _ => bail!("unrecognised joke payload shape"),
        };

        let text = text.trim();
        if text.is_empty() {
            bail!("joke API returned an empty joke");
        }

        Ok(JokeItem::now(text, label))
    }
}

#[async_trait]
impl Source<JokeItem> for HttpJokeSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<JokeItem> {
        let body = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_body(&body, &self.label)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json_string() {
        let item = HttpJokeSource::parse_body(r#""Why do programmers prefer dark mode?""#, "t")
            .unwrap();
        assert_eq!(item.text, "Why do programmers prefer dark mode?");
        assert_eq!(item.source_name, "t");
    }

    #[test]
    fn parses_object_with_joke_field() {
        let item =
            HttpJokeSource::parse_body(r#"{"joke": "Because light attracts bugs."}"#, "t")
                .unwrap();
        assert_eq!(item.text, "Because light attracts bugs.");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let item = HttpJokeSource::parse_body("\"  spaced out  \"", "t").unwrap();
        assert_eq!(item.text, "spaced out");
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(HttpJokeSource::parse_body("not json at all", "t").is_err());
    }

    #[test]
    fn rejects_object_without_joke_field() {
        assert!(HttpJokeSource::parse_body(r#"{"pun": "nope"}"#, "t").is_err());
    }

    #[test]
    fn rejects_non_string_payloads() {
        assert!(HttpJokeSource::parse_body("42", "t").is_err());
        assert!(HttpJokeSource::parse_body("[\"a\"]", "t").is_err());
    }

    #[test]
    fn rejects_empty_joke() {
        assert!(HttpJokeSource::parse_body("\"   \"", "t").is_err());
    }

    #[test]
    fn name_returns_label() {
        let src = HttpJokeSource::new("http://example.com/api", "My Jokes");
        assert_eq!(src.name(), "My Jokes");
    }
}
