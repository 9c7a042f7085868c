// Type definitions shared by the search client, pipeline and output sinks

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One item from the search API.
///
/// Only `title`, `snippet` and `link` are interpreted; every other field of
/// the item object is carried through untouched so the saved file matches
/// what the provider returned. `None` means the key was absent; an explicit
/// `null` is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub link: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// Only called when the key exists, so `null` becomes `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SearchResult {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            snippet: Some(Value::String(snippet.into())),
            link: Some(Value::String(link.into())),
            extra: serde_json::Map::new(),
        }
    }
}

pub type ResultBatch = Vec<SearchResult>;

/// Why a page could not be fetched at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("connection error: could not reach the search host ({0})")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("failed to parse JSON response: {0}")]
    Parse(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Result of a single page request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The provider answered; the batch may be empty when there are no more results.
    Success(ResultBatch),
    /// The provider answered with an application-level error.
    SoftFailure { reason: String },
    /// No interpretable response.
    HardFailure(FetchError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passthrough_fields_survive() {
        let raw = json!({
            "kind": "customsearch#result",
            "title": "dump.sql",
            "link": "http://example.com/dump.sql",
            "snippet": "-- MySQL dump 10.13",
            "pagemap": { "metatags": [{ "og:title": "x" }] }
        });

        let result: SearchResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.title, Some(json!("dump.sql")));
        assert_eq!(result.extra.len(), 2);
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn test_missing_fields_stay_missing() {
        let raw = json!({ "link": "http://example.com/a.sql" });
        let result: SearchResult = serde_json::from_value(raw.clone()).unwrap();
        assert!(result.title.is_none());
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn test_null_fields_are_kept() {
        let raw = json!({ "title": null, "snippet": "x", "link": "http://example.com/a.sql" });
        let result: SearchResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.title, Some(Value::Null));
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }
}
