use anyhow::{Context, Result};
use tracing::info;

use crate::fetcher;
use crate::observations::ListRequest;
use crate::snapshot::CsvSnapshotStore;

/// Handle the fetch command: one full pull, decode, and atomic snapshot
/// replace. Any failure is fatal to the run and surfaces as a non-zero
/// exit status; the previous snapshot is left untouched.
pub async fn handle_fetch(endpoint: String, snapshot_path: String) -> Result<()> {
    info!("Getting latest OdourCollect data");

    let client = fetcher::build_client().context("Failed to build HTTP client")?;
    let store = CsvSnapshotStore::new(&snapshot_path);

    let count = fetcher::fetch_and_persist(&client, &endpoint, &ListRequest::all(), &store)
        .await
        .context("Fetch run failed")?;

    info!("Snapshot {} now holds {} observations", snapshot_path, count);
    Ok(())
}
