use crate::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Snapshot of the artifact directory tree. `dirs` is natural-sorted so
/// spot-check sampling and report output are deterministic.
#[derive(Debug, Default)]
pub struct Inventory {
    pub dirs: Vec<String>,
    pub missing_index: Vec<String>,
    pub empty_index: Vec<String>,
}

#[derive(Debug)]
pub enum InventoryOutcome {
    Scanned(Inventory),
    RootMissing,
}

pub fn scan(root: &Path) -> InventoryOutcome {
    if !root.is_dir() {
        return InventoryOutcome::RootMissing;
    }

    let mut inventory = Inventory::default();
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(root = %root.display(), error = %err, "artifacts root unreadable");
            return InventoryOutcome::RootMissing;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !entry.path().is_dir() || !paths::is_artifact_dir(&name) {
            continue;
        }
        inventory.dirs.push(name);
    }
    paths::natural_sort(&mut inventory.dirs);

    for name in &inventory.dirs {
        let page = root.join(name).join(paths::PRIMARY_PAGE);
        match std::fs::metadata(&page) {
            Err(_) => inventory.missing_index.push(name.clone()),
            Ok(meta) if meta.len() == 0 => inventory.empty_index.push(name.clone()),
            Ok(_) => {}
        }
    }

    InventoryOutcome::Scanned(inventory)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
