use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Fixed layout constants
// ---------------------------------------------------------------------------

/// The index manifest, expected directly under the artifacts root.
pub const MANIFEST_FILE: &str = "index.json";

/// The primary page expected inside every artifact directory.
pub const PRIMARY_PAGE: &str = "index.html";

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "qa-check.yaml";

/// Default listing path segment appended to the base URL.
pub const DEFAULT_PAGES_PATH: &str = "projects/";

// ---------------------------------------------------------------------------
// Artifact directory naming
// ---------------------------------------------------------------------------

static ARTIFACT_DIR_RE: OnceLock<Regex> = OnceLock::new();

/// True for directory names following the `test-<N>` publishing convention.
pub fn is_artifact_dir(name: &str) -> bool {
    let re = ARTIFACT_DIR_RE.get_or_init(|| Regex::new(r"^test-\d+$").unwrap());
    re.is_match(name)
}

// ---------------------------------------------------------------------------
// Natural ordering
// ---------------------------------------------------------------------------

/// One segment of a natural sort key: digit runs compare numerically,
/// everything else case-insensitively as text.
#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Text(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Num(a), Segment::Num(b)) => a.cmp(b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            // Numbers sort before text, matching version-style ordering.
            (Segment::Num(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Num(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn natural_key(name: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for ch in name.chars() {
        if ch.is_ascii_digit() != in_digits && !current.is_empty() {
            segments.push(flush(&current, in_digits));
            current.clear();
        }
        in_digits = ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        segments.push(flush(&current, in_digits));
    }
    segments
}

fn flush(run: &str, in_digits: bool) -> Segment {
    if in_digits {
        // Absurdly long digit runs fall back to text comparison.
        match run.parse::<u64>() {
            Ok(n) => Segment::Num(n),
            Err(_) => Segment::Text(run.to_string()),
        }
    } else {
        Segment::Text(run.to_ascii_lowercase())
    }
}

/// Sort names so that `test-2` precedes `test-9` precedes `test-10`.
pub fn natural_sort(names: &mut [String]) {
    names.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
