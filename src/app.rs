// One end-to-end run: collect, print, save

use std::io::Write;

use tracing::{error, info};

use crate::cli::Cli;
use crate::config::{Config, ConfigError};
use crate::output;
use crate::pipeline::{self, StopReason};
use crate::search::{CustomSearchClient, SearchProvider};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub result_count: usize,
    pub pages_fetched: u32,
    pub stop: StopReason,
    pub saved: bool,
}

/// Loads the configuration and runs against the Custom Search API.
///
/// A configuration error is logged and returns `Ok(None)` before any HTTP
/// client exists.
pub async fn start<L, W>(load: L, cli: &Cli, out: &mut W) -> anyhow::Result<Option<RunSummary>>
where
    L: FnOnce() -> Result<Config, ConfigError>,
    W: Write,
{
    let mut config = match load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Ok(None);
        }
    };
    cli.apply(&mut config);
    info!(
        query = %config.search.query,
        pages = config.pagination.page_count,
        output = %config.output.path.display(),
        "Configuration loaded"
    );

    let client = CustomSearchClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let summary = run(&config, &client, out).await;
    info!(
        results = summary.result_count,
        pages = summary.pages_fetched,
        saved = summary.saved,
        stop = ?summary.stop,
        "Run finished"
    );
    Ok(Some(summary))
}

pub async fn run<P, W>(config: &Config, provider: &P, out: &mut W) -> RunSummary
where
    P: SearchProvider + ?Sized,
    W: Write,
{
    let report = pipeline::collect(
        provider,
        &config.search.query,
        &config.search.language,
        &config.pagination,
    )
    .await;

    if report.results.is_empty() {
        info!("No results found or an error occurred during the search");
        return RunSummary {
            result_count: 0,
            pages_fetched: report.pages_fetched,
            stop: report.stop,
            saved: false,
        };
    }

    if let Err(e) = output::display_results(out, &report.results) {
        error!(error = %e, "Failed to print results");
    }
    let saved = output::persist(&report.results, &config.output.path).await;

    RunSummary {
        result_count: report.results.len(),
        pages_fetched: report.pages_fetched,
        stop: report.stop,
        saved,
    }
}
