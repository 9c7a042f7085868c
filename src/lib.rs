// Dork Harvest - collects web search results for a dork query

pub mod app;
pub mod cli;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod search; // Google Custom Search JSON API
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use types::{FetchError, SearchOutcome, SearchResult};
