use super::snapshot::ScoreSnapshot;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Default export file name in `dir`, stamped with the local time.
pub fn default_export_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("scores-{}.json", stamp))
}

/// Load a scores snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<ScoreSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open scores file at {}", path.display()))?;

    let snapshot: ScoreSnapshot = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse scores file at {}", path.display()))?;

    Ok(snapshot)
}

/// Save a scores snapshot to a JSON file atomically
///
/// Uses atomic-write-file so an interrupted export never leaves a partial file.
/// Creates the parent directory if it doesn't exist.
pub fn save_snapshot(path: &Path, snapshot: &ScoreSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot).context("Failed to serialize scores")?;

    file.commit()
        .with_context(|| format!("Failed to save scores to {}", path.display()))?;

    tracing::info!(path = %path.display(), "exported scores");
    Ok(())
}
