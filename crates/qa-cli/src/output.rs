use qa_core::config::CheckConfig;
use qa_core::report::{Check, Report, Severity};
use serde::Serialize;
use std::io::IsTerminal;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

// ---------------------------------------------------------------------------
// Paint
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";

/// ANSI coloring, enabled only for interactive stdout and not overridden
/// by --no-color or NO_COLOR.
pub struct Paint {
    enabled: bool,
}

impl Paint {
    pub fn detect(no_color: bool) -> Self {
        let enabled = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Self { enabled }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn tag(&self, severity: Severity) -> String {
        let code = match severity {
            Severity::Pass => GREEN,
            Severity::Fail => RED,
            Severity::Warn => YELLOW,
        };
        self.wrap(code, severity.tag())
    }

    fn bold(&self, text: &str) -> String {
        self.wrap(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.wrap(DIM, text)
    }
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

const RULE: &str = "============================================================";

pub fn banner(paint: &Paint, cfg: &CheckConfig) {
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "?".to_string());

    println!("{}", paint.bold(RULE));
    println!("{}", paint.bold("  QA Check"));
    println!("{}", paint.bold(RULE));
    println!("  {}", paint.dim(&format!("Time:      {now}")));
    println!("  {}", paint.dim(&format!("Workdir:   {cwd}")));
    println!("  {}", paint.dim(&format!("Base URL:  {}", cfg.base_url)));
    println!();
}

pub fn phase_header(paint: &Paint, n: usize, title: &str) {
    if n > 1 {
        println!();
    }
    println!("{}", paint.bold(&format!("[{n}/4] {title}...")));
}

pub fn print_checks(paint: &Paint, checks: &[Check], quiet: bool, verbose: bool) {
    for check in checks {
        if quiet && check.severity == Severity::Pass {
            continue;
        }
        println!("  {} {}", paint.tag(check.severity), check.message);
        if check.severity != Severity::Pass || verbose {
            for detail in &check.details {
                println!("      {}", paint.dim(detail));
            }
        }
    }
}

pub fn summary(paint: &Paint, report: &Report) {
    let elapsed = report.elapsed_ms() as f64 / 1000.0;

    println!();
    println!("{}", paint.bold(RULE));
    println!("{}", paint.bold("  Summary"));
    println!("{}", paint.bold(RULE));
    println!("  Total checks:  {}", report.total);
    println!("  {}", paint.wrap(GREEN, &format!("Passed:        {}", report.passed)));
    println!("  {}", paint.wrap(RED, &format!("Failed:        {}", report.failed)));
    println!("  {}", paint.wrap(YELLOW, &format!("Warnings:      {}", report.warnings)));
    println!("  Duration:      {elapsed:.3}s");
    println!();

    if report.all_passed() {
        println!("  {}", paint.wrap(GREEN, ">>> ALL CHECKS PASSED <<<"));
    } else {
        println!(
            "  {}",
            paint.wrap(RED, &format!(">>> {} CHECK(S) FAILED <<<", report.failed))
        );
        println!(
            "  {}",
            paint.dim("Tip: run qa-audit for deeper diagnostics on the failing pages")
        );
    }
    println!();
}
