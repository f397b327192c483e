use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::snapshot::CsvSnapshotStore;
use crate::web;

/// Handle the serve command: run the observations API until terminated.
pub async fn handle_serve(interface: String, port: u16, snapshot_path: String) -> Result<()> {
    if !Path::new(&snapshot_path).exists() {
        // Not fatal: the fetcher may populate it while we are running
        warn!(
            "Snapshot {} does not exist yet; requests will fail until a fetch completes",
            snapshot_path
        );
    }

    let store = Arc::new(CsvSnapshotStore::new(&snapshot_path));
    web::start_web_server(interface, port, store).await
}
