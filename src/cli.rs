use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "dork-harvest",
    version,
    about = "Collect Google Custom Search results for a dork query and save them as JSON"
)]
pub struct Cli {
    /// Search query (defaults to the exposed MySQL dump dork)
    #[arg(long, short)]
    pub query: Option<String>,

    /// Language restriction passed as `lr`, e.g. lang_es
    #[arg(long)]
    pub lang: Option<String>,

    /// Output file for the JSON results
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Number of pages to request
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Results per page (distance between offsets)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// 1-based offset of the first page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub start: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Flags take precedence over environment values.
    pub fn apply(&self, config: &mut Config) {
        if let Some(query) = &self.query {
            config.search.query = query.clone();
        }
        if let Some(lang) = &self.lang {
            config.search.language = lang.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(pages) = self.pages {
            config.pagination.page_count = pages;
        }
        if let Some(page_size) = self.page_size {
            config.pagination.page_size = page_size;
        }
        if let Some(start) = self.start {
            config.pagination.start_offset = start;
        }
        if let Some(timeout) = self.timeout {
            config.search.timeout = std::time::Duration::from_secs(timeout);
        }
    }
}
