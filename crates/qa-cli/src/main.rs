mod output;

use anyhow::Context;
use clap::Parser;
use qa_core::config::{CheckConfig, WarnLevel};
use qa_core::phases;
use qa_core::probe::HttpProbe;
use qa_core::report::Report;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "qa-check",
    about = "Static-site integrity checker: validates the test index against the published tree",
    version
)]
struct Cli {
    /// Config file (default: ./qa-check.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Site root URL the published pages are served under
    #[arg(long, env = "QA_BASE_URL")]
    base_url: Option<String>,

    /// Local artifacts root containing the test-<N> directories
    #[arg(long, env = "QA_ROOT")]
    root: Option<PathBuf>,

    /// Manifest path (default: <root>/index.json)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Output the full report as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Only show failures, warnings, and the summary
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Show detail lines for passing checks too
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Unusable arguments or config, distinct from check failures (1).
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cfg = build_config(cli)?;
    let probe = HttpProbe::new(cfg.connect_timeout(), cfg.timeout());

    if cli.json {
        let report = phases::run_all(&cfg, &probe);
        output::print_json(&report)?;
        return Ok(report.exit_code());
    }

    let paint = output::Paint::detect(cli.no_color);
    output::banner(&paint, &cfg);

    // Phases stream as they run: on a signal, everything printed so far
    // stands as a partial report.
    let mut report = Report::new();

    output::phase_header(&paint, 1, "Probing site reachability");
    let checks = phases::reachability(&cfg, &probe);
    output::print_checks(&paint, &checks, cli.quiet, cli.verbose);
    report.extend(checks);

    output::phase_header(&paint, 2, "Validating manifest");
    let (entries, checks) = phases::manifest_checks(&cfg);
    output::print_checks(&paint, &checks, cli.quiet, cli.verbose);
    report.extend(checks);

    output::phase_header(&paint, 3, "Checking test directories");
    let (inventory, checks) = phases::inventory_checks(&cfg, &entries);
    output::print_checks(&paint, &checks, cli.quiet, cli.verbose);
    report.extend(checks);

    output::phase_header(&paint, 4, "Spot-checking pages");
    let checks = phases::spot_checks(&cfg, &probe, inventory.as_ref());
    output::print_checks(&paint, &checks, cli.quiet, cli.verbose);
    report.extend(checks);

    report.finalize();
    output::summary(&paint, &report);
    Ok(report.exit_code())
}

fn build_config(cli: &Cli) -> anyhow::Result<CheckConfig> {
    let mut cfg = match &cli.config {
        Some(path) => CheckConfig::load(path).context("failed to load config")?,
        None => CheckConfig::load_or_default(Path::new(".")).context("failed to load config")?,
    };

    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(root) = &cli.root {
        cfg.artifacts_root = root.clone();
    }
    if let Some(manifest) = &cli.manifest {
        cfg.manifest_path = Some(manifest.clone());
    }

    let warnings = cfg.validate();
    for w in &warnings {
        let prefix = match w.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        eprintln!("[{prefix}] {}", w.message);
    }
    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(cfg)
}
