use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::snapshot::Snapshot;

/// `<pair>_sliding_window_<wallclock>_analysis<id>.json`
pub fn snapshot_path(dir: &Path, snapshot: &Snapshot) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!(
        "{}_sliding_window_{}_analysis{}.json",
        snapshot.metadata.trading_pair, ts, snapshot.metadata.analysis_id
    ))
}

/// Serialize one snapshot to pretty JSON. The caller decides whether a
/// failure matters; inside the pipeline it is logged and skipped.
pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create snapshot dir {}", dir.display()))?;
    let path = snapshot_path(dir, snapshot);
    let payload =
        serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
    std::fs::write(&path, payload)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
