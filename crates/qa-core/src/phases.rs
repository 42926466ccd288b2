use crate::config::CheckConfig;
use crate::inventory::{self, Inventory, InventoryOutcome};
use crate::manifest::{self, Entry, ManifestOutcome};
use crate::probe::Probe;
use crate::report::{Check, Report};

// ---------------------------------------------------------------------------
// Phase 1: HTTP reachability
// ---------------------------------------------------------------------------

/// Probe the four fixed endpoints: site root, main page, listing page, and
/// the manifest itself. 200 is the only passing status.
pub fn reachability(cfg: &CheckConfig, probe: &dyn Probe) -> Vec<Check> {
    let targets = [
        ("site root", cfg.site_root_url()),
        ("main index.html", cfg.index_url()),
        ("pages listing", cfg.pages_url()),
        ("manifest endpoint", cfg.manifest_url()),
    ];

    targets
        .iter()
        .map(|(label, url)| {
            let outcome = probe.get(url);
            if outcome.is_ok() {
                Check::pass(format!("{label}: HTTP 200 from {url}"))
            } else {
                Check::fail(format!("{label}: HTTP {} from {url}", outcome.code()))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Phase 2: manifest validation
// ---------------------------------------------------------------------------

/// Structural validation, status tally, and broken-reference scan. On a
/// structural failure the entry list degrades to empty so the tally and
/// reference scan still run and report.
pub fn manifest_checks(cfg: &CheckConfig) -> (Vec<Entry>, Vec<Check>) {
    let path = cfg.manifest_path();
    let mut checks = Vec::new();

    let entries = match manifest::load(&path) {
        ManifestOutcome::Loaded(entries) => {
            checks.push(Check::pass(format!(
                "manifest parsed: valid JSON array with {} entries",
                entries.len()
            )));
            entries
        }
        ManifestOutcome::NotFound => {
            checks.push(Check::fail(format!(
                "manifest not found: {}",
                path.display()
            )));
            Vec::new()
        }
        ManifestOutcome::InvalidJson(err) => {
            checks.push(Check::fail(format!("manifest is not valid JSON: {err}")));
            Vec::new()
        }
        ManifestOutcome::NotArray => {
            checks.push(Check::fail("manifest root is not an array"));
            Vec::new()
        }
    };

    let tally = manifest::tally(&entries);
    checks.push(Check::pass(format!(
        "status tally: {} PASS, {} FAIL, {} PENDING",
        tally.pass, tally.fail, tally.pending
    )));

    let referenced = entries
        .iter()
        .filter(|e| e.file.as_deref().is_some_and(|f| !f.is_empty()))
        .count();
    let broken = manifest::broken_refs(&entries, &cfg.artifacts_root);
    if broken.is_empty() {
        checks.push(Check::pass(format!(
            "file references resolve ({referenced} checked)"
        )));
    } else {
        checks.push(
            Check::fail(format!("broken file references: {}", broken.len()))
                .with_details(broken),
        );
    }

    (entries, checks)
}

// ---------------------------------------------------------------------------
// Phase 3: directory inventory
// ---------------------------------------------------------------------------

/// Enumerate `test-*` directories and cross-check them against the manifest.
/// Missing primary pages are failures; empty pages and unindexed directories
/// are drift, reported as warnings. Both can fire in the same run.
pub fn inventory_checks(cfg: &CheckConfig, entries: &[Entry]) -> (Option<Inventory>, Vec<Check>) {
    let root = &cfg.artifacts_root;
    let mut checks = Vec::new();

    let inv = match inventory::scan(root) {
        InventoryOutcome::Scanned(inv) => inv,
        InventoryOutcome::RootMissing => {
            checks.push(Check::fail(format!(
                "projects directory not found: {}",
                root.display()
            )));
            return (None, checks);
        }
    };

    checks.push(Check::pass(format!(
        "found {} test directories",
        inv.dirs.len()
    )));

    if inv.missing_index.is_empty() && inv.empty_index.is_empty() {
        checks.push(Check::pass(
            "all test directories have a non-empty index.html",
        ));
    } else {
        if !inv.missing_index.is_empty() {
            checks.push(
                Check::fail(format!(
                    "missing index.html in {} directories",
                    inv.missing_index.len()
                ))
                .with_details(inv.missing_index.clone()),
            );
        }
        if !inv.empty_index.is_empty() {
            let details = inv
                .empty_index
                .iter()
                .map(|name| format!("{name} (empty)"))
                .collect();
            checks.push(
                Check::warn(format!(
                    "empty index.html in {} directories",
                    inv.empty_index.len()
                ))
                .with_details(details),
            );
        }
    }

    let indexed = manifest::indexed_dirs(entries);
    let unindexed: Vec<String> = inv
        .dirs
        .iter()
        .filter(|name| !indexed.contains(*name))
        .cloned()
        .collect();
    if unindexed.is_empty() {
        checks.push(Check::pass(
            "all test directories are indexed in the manifest",
        ));
    } else {
        checks.push(
            Check::warn(format!(
                "{} directories missing from the manifest",
                unindexed.len()
            ))
            .with_details(unindexed),
        );
    }

    (Some(inv), checks)
}

// ---------------------------------------------------------------------------
// Phase 4: spot checks
// ---------------------------------------------------------------------------

/// Bounded HTTP sample over the inventoried directories: the first three in
/// natural order, plus the last one when more than three exist. The `(last)`
/// label keeps the sample from reading as exhaustive coverage.
pub fn spot_checks(cfg: &CheckConfig, probe: &dyn Probe, inv: Option<&Inventory>) -> Vec<Check> {
    let Some(inv) = inv else {
        return vec![Check::fail(
            "spot checks skipped: projects directory not found",
        )];
    };

    if inv.dirs.is_empty() {
        return vec![Check::warn("no test directories to spot-check")];
    }

    let mut targets: Vec<(String, String)> = inv
        .dirs
        .iter()
        .take(3)
        .map(|name| (name.clone(), name.clone()))
        .collect();
    if inv.dirs.len() > 3 {
        if let Some(last) = inv.dirs.last() {
            targets.push((format!("{last} (last)"), last.clone()));
        }
    }

    targets
        .iter()
        .map(|(label, name)| {
            let url = cfg.page_url(name);
            let outcome = probe.get(&url);
            if outcome.is_ok() {
                Check::pass(format!("spot check {label}: HTTP 200"))
            } else {
                Check::fail(format!(
                    "spot check {label}: HTTP {} from {url}",
                    outcome.code()
                ))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Full run
// ---------------------------------------------------------------------------

/// Run all four phases in order and aggregate. Used by `--json` output and
/// tests; the CLI's human mode drives the phases itself so it can print
/// headers between them.
pub fn run_all(cfg: &CheckConfig, probe: &dyn Probe) -> Report {
    let mut report = Report::new();

    report.extend(reachability(cfg, probe));

    let (entries, checks) = manifest_checks(cfg);
    report.extend(checks);

    let (inv, checks) = inventory_checks(cfg, &entries);
    report.extend(checks);

    report.extend(spot_checks(cfg, probe, inv.as_ref()));

    report.finalize();
    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
