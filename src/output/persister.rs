//! JSON result file
//!
//! Results are written as a 4-space indented JSON array. `serde_json` emits
//! non-ASCII characters literally, so the file is plain UTF-8.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::fs;
use tracing::{error, info};

use crate::types::SearchResult;

const INDENT: &[u8] = b"    ";

fn to_pretty_json(results: &[SearchResult]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    results.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes `results` to `path`, replacing any existing file.
pub async fn save(results: &[SearchResult], path: &Path) -> anyhow::Result<()> {
    let content = to_pretty_json(results)?;
    fs::write(path, content).await?;
    Ok(())
}

/// Like [`save`], but failures are only logged. Returns whether the file was written.
pub async fn persist(results: &[SearchResult], path: &Path) -> bool {
    match save(results, path).await {
        Ok(()) => {
            info!("Results saved to {}", path.display());
            true
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Could not save the results");
            false
        }
    }
}
