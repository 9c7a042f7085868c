//! Pagination driver
//!
//! Walks the configured offsets one page at a time and accumulates what the
//! provider returns. Pagination stops on the first hard failure or on the
//! first empty page; a provider-reported error only skips that page.

use tracing::{info, warn};

use crate::config::Pagination;
use crate::search::{SearchProvider, SearchRequest};
use crate::types::{FetchError, SearchOutcome, SearchResult};

#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// Every configured offset was requested.
    Completed,
    /// The provider returned an empty page; later offsets would be empty too.
    Exhausted { offset: u32 },
    /// A page could not be fetched; remaining offsets were skipped.
    Failed { offset: u32, error: FetchError },
}

#[derive(Debug, Clone)]
pub struct CollectReport {
    pub results: Vec<SearchResult>,
    /// Requests made, including the one that stopped the loop.
    pub pages_fetched: u32,
    pub stop: StopReason,
}

pub async fn collect<P>(
    provider: &P,
    query: &str,
    language: &str,
    pagination: &Pagination,
) -> CollectReport
where
    P: SearchProvider + ?Sized,
{
    let mut results = Vec::new();
    let mut pages_fetched = 0;

    for offset in pagination.offsets() {
        info!("Searching results from position {}...", offset);
        let request = SearchRequest {
            query: query.to_string(),
            start: offset,
            language: language.to_string(),
        };
        pages_fetched += 1;

        match provider.search(&request).await {
            SearchOutcome::Success(batch) if batch.is_empty() => {
                info!(offset, "No more results, stopping pagination");
                return CollectReport {
                    results,
                    pages_fetched,
                    stop: StopReason::Exhausted { offset },
                };
            }
            SearchOutcome::Success(batch) => {
                results.extend(batch);
            }
            SearchOutcome::SoftFailure { reason } => {
                warn!(offset, reason = %reason, "Page skipped after provider error");
            }
            SearchOutcome::HardFailure(error) => {
                warn!(offset, error = %error, "Page failed, stopping pagination");
                return CollectReport {
                    results,
                    pages_fetched,
                    stop: StopReason::Failed { offset, error },
                };
            }
        }
    }

    CollectReport {
        results,
        pages_fetched,
        stop: StopReason::Completed,
    }
}
