//! Health check (§4.K step 4): directory reachability, and parseable vs.
//! corrupted record counts (corrupted = missing delimiters or required
//! header fields, per `memoria_store::header::parse`).

use std::fs;

use memoria_store::header;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub root_exists: bool,
    pub root_readable: bool,
    pub parseable_count: usize,
    pub corrupted_count: usize,
    pub corrupted_paths: Vec<String>,
}

pub fn check(memory_root: &std::path::Path) -> HealthReport {
    let root_exists = memory_root.exists();
    let Ok(project_dirs) = fs::read_dir(memory_root) else {
        return HealthReport {
            root_exists,
            root_readable: false,
            parseable_count: 0,
            corrupted_count: 0,
            corrupted_paths: Vec::new(),
        };
    };

    let mut parseable_count = 0;
    let mut corrupted_paths = Vec::new();

    for project_entry in project_dirs.flatten() {
        if !project_entry.path().is_dir() {
            continue;
        }
        let active = project_entry.path().join("memories");
        scan_dir(&active, &mut parseable_count, &mut corrupted_paths);
        scan_dir(&active.join("archived"), &mut parseable_count, &mut corrupted_paths);
    }

    HealthReport {
        root_exists,
        root_readable: true,
        parseable_count,
        corrupted_count: corrupted_paths.len(),
        corrupted_paths,
    }
}

fn scan_dir(dir: &std::path::Path, parseable_count: &mut usize, corrupted_paths: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Ok(text) = fs::read_to_string(&path) else {
            corrupted_paths.push(path.to_string_lossy().to_string());
            continue;
        };
        match header::parse(&path.to_string_lossy(), &text) {
            Ok(_) => *parseable_count += 1,
            Err(_) => corrupted_paths.push(path.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoria_core::record::TagSet;
    use memoria_store::RecordStore;

    #[test]
    fn missing_root_is_not_readable() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let report = check(&missing);
        assert!(!report.root_exists);
        assert!(!report.root_readable);
    }

    #[test]
    fn counts_parseable_records() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        store.create("proj-a", "body".into(), TagSet::new(), 0.5, None).unwrap();
        store.create("proj-a", "body2".into(), TagSet::new(), 0.5, None).unwrap();

        let report = check(tmp.path());
        assert!(report.root_readable);
        assert_eq!(report.parseable_count, 2);
        assert_eq!(report.corrupted_count, 0);
    }

    #[test]
    fn detects_a_corrupted_file_missing_its_header_delimiter() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        store.create("proj-a", "body".into(), TagSet::new(), 0.5, None).unwrap();

        let corrupt_path = tmp.path().join("proj-a").join("memories").join("broken.md");
        fs::write(&corrupt_path, "not a valid header at all").unwrap();

        let report = check(tmp.path());
        assert_eq!(report.parseable_count, 1);
        assert_eq!(report.corrupted_count, 1);
        assert!(report.corrupted_paths[0].ends_with("broken.md"));
    }
}
