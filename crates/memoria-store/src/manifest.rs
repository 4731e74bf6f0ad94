//! Per-day archive manifest (§4.A, §6): `archived/YYYY-MM-DD-archive.md`,
//! one markdown section per archival batch, enumerating
//! `(memory_id, reason, importance)`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::StoreError;

pub fn manifest_path(archived_dir: &Path, now: DateTime<Utc>) -> std::path::PathBuf {
    archived_dir.join(format!("{}-archive.md", now.format("%Y-%m-%d")))
}

/// Append one `(memory_id, reason, importance)` entry to today's manifest,
/// creating the file (with a heading) if it doesn't exist yet.
pub fn append_entry(
    archived_dir: &Path,
    now: DateTime<Utc>,
    memory_id: &str,
    reason: &str,
    importance: f64,
) -> Result<(), StoreError> {
    std::fs::create_dir_all(archived_dir)?;
    let path = manifest_path(archived_dir, now);
    let is_new = !path.exists();

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if is_new {
        writeln!(file, "# Archive manifest — {}\n", now.format("%Y-%m-%d"))?;
    }
    writeln!(
        file,
        "- `{memory_id}` — reason: {reason}, importance: {importance:.3} ({})",
        now.to_rfc3339()
    )?;
    Ok(())
}
