use serde::Serialize;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Severity / Check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Pass,
    Fail,
    Warn,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Fail => "FAIL",
            Severity::Warn => "WARN",
        }
    }
}

/// One emitted check line. Details are supplementary and do not affect
/// the counters.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl Check {
    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(Severity::Pass, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(Severity::Fail, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, message)
    }

    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Accumulator threaded through every phase. No phase aborts the run;
/// the exit code is derived only at the end.
#[derive(Debug, Serialize)]
pub struct Report {
    pub checks: Vec<Check>,
    pub passed: u32,
    pub failed: u32,
    pub warnings: u32,
    pub total: u32,
    pub elapsed_ms: Option<u64>,
    #[serde(skip)]
    started: Instant,
}

impl Report {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            passed: 0,
            failed: 0,
            warnings: 0,
            total: 0,
            elapsed_ms: None,
            started: Instant::now(),
        }
    }

    pub fn record(&mut self, check: Check) {
        match check.severity {
            Severity::Pass => self.passed += 1,
            Severity::Fail => self.failed += 1,
            Severity::Warn => self.warnings += 1,
        }
        self.total += 1;
        self.checks.push(check);
    }

    pub fn extend(&mut self, checks: Vec<Check>) {
        for check in checks {
            self.record(check);
        }
    }

    pub fn finalize(&mut self) {
        self.elapsed_ms = Some(self.started.elapsed().as_millis() as u64);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
            .unwrap_or_else(|| self.started.elapsed().as_millis() as u64)
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 0 if no check failed, 1 otherwise. Warnings never affect the code.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
