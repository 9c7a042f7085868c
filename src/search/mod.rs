//! Search Module
//!
//! Web search backends. The only backend is the Google Custom Search JSON
//! API; the pipeline talks to it through [`SearchProvider`] so tests can
//! substitute a stub.

pub mod custom_search;

use async_trait::async_trait;

use crate::types::SearchOutcome;

pub use custom_search::CustomSearchClient;

/// Parameters for one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// 1-based index of the first result on the page.
    pub start: u32,
    pub language: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> SearchOutcome;
}
