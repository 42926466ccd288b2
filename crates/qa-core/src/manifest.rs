use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One manifest record. Every field is optional: the publishing pipeline is
/// not fully trusted, and a malformed entry must degrade, not crash.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Entry {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }

    /// Top-level path segment of `file`, when it has one.
    pub fn top_segment(&self) -> Option<&str> {
        self.file
            .as_deref()
            .and_then(|f| f.split_once('/'))
            .map(|(segment, _)| segment)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Outcome of reading the manifest. Structural failures carry enough for a
/// report line; downstream phases run against an empty entry list.
#[derive(Debug)]
pub enum ManifestOutcome {
    /// Parsed array. Entries that fail to decode as objects become empty
    /// `Entry` values so the reported count still equals the array length.
    Loaded(Vec<Entry>),
    /// Absent or unreadable (a permissions error is treated the same).
    NotFound,
    InvalidJson(String),
    NotArray,
}

pub fn load(path: &Path) -> ManifestOutcome {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "manifest unreadable");
            return ManifestOutcome::NotFound;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => return ManifestOutcome::InvalidJson(err.to_string()),
    };

    let Some(array) = value.as_array() else {
        return ManifestOutcome::NotArray;
    };

    let entries = array
        .iter()
        .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
        .collect();
    ManifestOutcome::Loaded(entries)
}

// ---------------------------------------------------------------------------
// Status tally
// ---------------------------------------------------------------------------

/// Informational partition of entries by status. Unrecognized or missing
/// statuses land in none of the buckets.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub pass: usize,
    pub fail: usize,
    pub pending: usize,
}

pub fn tally(entries: &[Entry]) -> StatusTally {
    let mut counts = StatusTally::default();
    for entry in entries {
        match entry.status.as_deref() {
            Some("PASS") => counts.pass += 1,
            Some("FAIL") => counts.fail += 1,
            Some("PENDING") => counts.pending += 1,
            _ => {}
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// File references
// ---------------------------------------------------------------------------

/// Descriptions of entries whose `file` does not resolve under `root`.
/// Entries without a `file` field are skipped.
pub fn broken_refs(entries: &[Entry], root: &Path) -> Vec<String> {
    let mut broken = Vec::new();
    for entry in entries {
        let Some(file) = entry.file.as_deref().filter(|f| !f.is_empty()) else {
            continue;
        };
        if !root.join(file).exists() {
            broken.push(format!("entry '{}': file not found: {}", entry.label(), file));
        }
    }
    broken
}

/// Set of top-level directory names the manifest references.
pub fn indexed_dirs(entries: &[Entry]) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|e| e.top_segment())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("index.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_counts_every_array_element() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"[{"file":"test-1/index.html","status":"PASS"},"not an object",42]"#,
        );

        match load(&path) {
            ManifestOutcome::Loaded(entries) => {
                assert_eq!(entries.len(), 3);
                assert_eq!(entries[0].file.as_deref(), Some("test-1/index.html"));
                assert!(entries[1].file.is_none());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load(&dir.path().join("index.json")),
            ManifestOutcome::NotFound
        ));
    }

    #[test]
    fn load_garbage_is_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "{broken");
        assert!(matches!(load(&path), ManifestOutcome::InvalidJson(_)));
    }

    #[test]
    fn load_object_root_is_not_array() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"entries": []}"#);
        assert!(matches!(load(&path), ManifestOutcome::NotArray));
    }

    #[test]
    fn tally_ignores_unknown_statuses() {
        let entries = vec![
            Entry {
                status: Some("PASS".into()),
                ..Entry::default()
            },
            Entry {
                status: Some("PASS".into()),
                ..Entry::default()
            },
            Entry {
                status: Some("FAIL".into()),
                ..Entry::default()
            },
            Entry {
                status: Some("SKIPPED".into()),
                ..Entry::default()
            },
            Entry::default(),
        ];
        assert_eq!(
            tally(&entries),
            StatusTally {
                pass: 2,
                fail: 1,
                pending: 0
            }
        );
    }

    #[test]
    fn broken_refs_skips_entries_without_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("test-1")).unwrap();
        std::fs::write(dir.path().join("test-1/index.html"), "<html></html>").unwrap();

        let entries = vec![
            Entry {
                file: Some("test-1/index.html".into()),
                ..Entry::default()
            },
            Entry {
                name: Some("Test 2".into()),
                file: Some("test-2/index.html".into()),
                ..Entry::default()
            },
            Entry::default(),
            Entry {
                file: Some(String::new()),
                ..Entry::default()
            },
        ];

        let broken = broken_refs(&entries, dir.path());
        assert_eq!(broken.len(), 1);
        assert!(broken[0].contains("Test 2"));
        assert!(broken[0].contains("test-2/index.html"));
    }

    #[test]
    fn indexed_dirs_takes_first_segment() {
        let entries = vec![
            Entry {
                file: Some("test-1/index.html".into()),
                ..Entry::default()
            },
            Entry {
                file: Some("test-10/assets/app.js".into()),
                ..Entry::default()
            },
            Entry {
                file: Some("loose.html".into()),
                ..Entry::default()
            },
        ];
        let dirs = indexed_dirs(&entries);
        assert!(dirs.contains("test-1"));
        assert!(dirs.contains("test-10"));
        assert_eq!(dirs.len(), 2);
    }
}
