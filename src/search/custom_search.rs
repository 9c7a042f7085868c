//! Google Custom Search Client
//!
//! Issues one `GET` per page against the Custom Search JSON API and sorts
//! the outcome into three buckets:
//!
//! - **Success**: the payload's `items` array (absent means no results)
//! - **SoftFailure**: a 2xx payload carrying an `error` object
//! - **HardFailure**: transport, timeout, HTTP status or JSON errors
//!
//! There are no retries; the request is bounded by the client timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{SearchProvider, SearchRequest};
use crate::config::{Config, Credentials};
use crate::types::{FetchError, ResultBatch, SearchOutcome};

/// Custom Search JSON API client
pub struct CustomSearchClient {
    client: Client,
    credentials: Credentials,
    endpoint: String,
}

impl CustomSearchClient {
    pub fn new(
        credentials: Credentials,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            credentials,
            endpoint: endpoint.into(),
        })
    }

    /// Configure client from config
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.credentials.clone(),
            config.search.endpoint.clone(),
            config.search.timeout,
        )
    }

    async fn fetch(&self, request: &SearchRequest) -> Result<Value, FetchError> {
        let start = request.start.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("cx", self.credentials.search_engine_id.as_str()),
                ("q", request.query.as_str()),
                ("start", start.as_str()),
                ("lr", request.language.as_str()),
            ])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Some(message) = serde_json::from_str::<Value>(&body)
                .ok()
                .as_ref()
                .and_then(provider_message)
            {
                debug!(status = status.as_u16(), message = %message, "Provider error body");
            }
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SearchProvider for CustomSearchClient {
    async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        debug!(start = request.start, lr = %request.language, "Requesting search page");

        let payload = match self.fetch(request).await {
            Ok(payload) => payload,
            Err(e) => {
                log_fetch_error(&e);
                return SearchOutcome::HardFailure(e);
            }
        };

        if let Some(err) = payload.get("error") {
            let reason = provider_message(&payload).unwrap_or_else(|| err.to_string());
            error!(reason = %reason, "Search API returned an error");
            return SearchOutcome::SoftFailure { reason };
        }

        match extract_items(&payload) {
            Ok(items) => {
                info!(start = request.start, count = items.len(), "Search page received");
                SearchOutcome::Success(items)
            }
            Err(e) => {
                log_fetch_error(&e);
                SearchOutcome::HardFailure(e)
            }
        }
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connection(e.to_string())
    } else if e.is_request() || e.is_builder() || e.is_redirect() || e.is_body() || e.is_decode() {
        FetchError::Request(e.to_string())
    } else {
        FetchError::Unexpected(format!("{:?}", e))
    }
}

fn log_fetch_error(e: &FetchError) {
    match e {
        FetchError::Connection(cause) => {
            error!(cause = %cause, "Connection error: could not resolve the host or no network")
        }
        FetchError::Timeout => error!("The request exceeded the timeout"),
        FetchError::Status(code) => error!(status = code, "HTTP request error: non-success status"),
        FetchError::Request(cause) => error!(cause = %cause, "HTTP request error"),
        FetchError::Parse(cause) => error!(cause = %cause, "Failed to parse the JSON response"),
        FetchError::Unexpected(detail) => error!(detail = %detail, "Unexpected error during search"),
    }
}

/// `error.message`, when the payload carries one.
fn provider_message(payload: &Value) -> Option<String> {
    payload
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(String::from)
}

fn extract_items(payload: &Value) -> Result<ResultBatch, FetchError> {
    match payload.get("items") {
        None | Some(Value::Null) => {
            warn!("Response has no items");
            Ok(Vec::new())
        }
        Some(items) => serde_json::from_value(items.clone())
            .map_err(|e| FetchError::Parse(format!("malformed items: {}", e))),
    }
}
