//! Path safety for record ids (§4.A).

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Sanitize an `id` by stripping path separators and `..` components, then
/// verify the resolved path stays within `root`. Raises `InvalidId` on any
/// attempt to escape the project root.
pub fn safe_record_path(root: &Path, id: &str) -> Result<PathBuf, StoreError> {
    if id.is_empty() {
        return Err(StoreError::InvalidId("empty id".to_string()));
    }
    if id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(StoreError::InvalidId(id.to_string()));
    }

    let file_name = format!("{id}.md");
    let candidate = root.join(&file_name);

    // Canonicalize the root (it must already exist by the time records are
    // written) and verify the candidate's parent matches exactly — this
    // protects against any sanitizer bypass missed above.
    let root_canon = root
        .canonicalize()
        .map_err(|_| StoreError::InvalidId(id.to_string()))?;
    let candidate_parent = candidate
        .parent()
        .ok_or_else(|| StoreError::InvalidId(id.to_string()))?;
    if candidate_parent != root_canon && candidate_parent != root {
        return Err(StoreError::InvalidId(id.to_string()));
    }

    Ok(candidate)
}
