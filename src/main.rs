mod config;
mod error;
mod git;
mod reporters;
mod scan;
mod scoring;
mod types;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use types::{Report, ReportMeta};

#[derive(Parser, Debug)]
#[command(
    name = "git-bugspots",
    about = "🔥 Rank files by time-decayed bug-fix activity in git history",
    version,
    long_about = "Scans a branch's commit history, classifies fix commits by their\n\
                  subject line, and ranks the files those fixes touched with a\n\
                  recency-weighted score: a file fixed yesterday outranks one fixed\n\
                  at the dawn of the repository, even with equal fix counts."
)]
struct Args {
    /// Path to the git repository to scan. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    repo_path: Option<PathBuf>,

    /// Branch whose history is scanned [default: master]
    #[arg(short, long)]
    branch: Option<String>,

    /// Number of fixes and hotspots to keep in each ranking [default: 5]
    #[arg(short, long)]
    depth: Option<usize>,

    /// Custom fix-detection regex, matched case-insensitively against the
    /// commit subject line. Overrides --words.
    #[arg(short, long)]
    regex: Option<String>,

    /// Comma-separated words that flag a fix commit, e.g. "bug,defect,oops"
    #[arg(short, long)]
    words: Option<String>,

    /// Show each fix's commit date in terminal output
    #[arg(long)]
    timestamps: bool,

    /// Output format: terminal, json [default: terminal]
    #[arg(long)]
    format: Option<String>,

    /// Output file (json format only; stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to a .git-bugspots.yml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print an annotated config template and exit
    #[arg(long)]
    generate_config: bool,
}

fn main() {
    let args = Args::parse();

    if args.generate_config {
        if let Err(e) = config::print_template(args.output.as_deref()) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

// ── Scan pipeline ──────────────────────────────────────────────────────────────

fn run(args: &Args) -> Result<(), String> {
    let cfg = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::BugspotsConfig::default(),
    };
    let settings = resolve_settings(args, &cfg)?;

    let pattern = scan::build_pattern(settings.regex.as_deref(), &settings.words)
        .map_err(|e| e.to_string())?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!(
        "Scanning \"{}\" history in {}...",
        settings.branch,
        settings.repo_path.display()
    ));

    let started = Instant::now();
    let options = scan::ScanOptions {
        branch: settings.branch.clone(),
        depth: settings.depth,
        pattern,
        now: chrono::Utc::now().timestamp(),
    };
    let result = scan::scan(&settings.repo_path, &options).map_err(|e| e.to_string());
    pb.finish_and_clear();
    let result = result?;

    eprintln!(
        "✔ {} fix commits, {} hotspots — ⏱ {}",
        result.fixes.len(),
        result.spots.len(),
        fmt_dur(started.elapsed()),
    );

    let report = Report {
        meta: ReportMeta {
            repo_path: settings.repo_path.display().to_string(),
            branch: settings.branch.clone(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            fix_count: result.fixes.len(),
            spot_count: result.spots.len(),
        },
        fixes: result.fixes,
        spots: result.spots,
    };

    match settings.format.as_str() {
        "json" => reporters::json::report_json(&report, settings.output.as_deref())?,
        _ => reporters::terminal::report_terminal(&report, settings.timestamps),
    }

    Ok(())
}

// ── Settings resolution ────────────────────────────────────────────────────────

/// Effective settings after layering CLI flags over config-file values.
#[derive(Debug)]
struct Settings {
    repo_path: PathBuf,
    branch: String,
    depth: usize,
    regex: Option<String>,
    words: Vec<String>,
    timestamps: bool,
    format: String,
    output: Option<PathBuf>,
}

fn resolve_settings(args: &Args, cfg: &config::BugspotsConfig) -> Result<Settings, String> {
    let depth = args.depth.or(cfg.depth).unwrap_or(5);
    if depth == 0 {
        return Err("depth must be 1 or greater".to_string());
    }

    let format = args
        .format
        .clone()
        .or_else(|| cfg.format.clone())
        .unwrap_or_else(|| "terminal".to_string());
    match format.as_str() {
        "terminal" | "json" => {}
        other => {
            return Err(format!(
                "Unknown format \"{other}\". Expected \"terminal\" or \"json\""
            ))
        }
    }

    let words: Vec<String> = match (&args.words, &cfg.words) {
        (Some(list), _) => list
            .split(',')
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect(),
        (None, Some(list)) => list.clone(),
        (None, None) => Vec::new(),
    };

    Ok(Settings {
        repo_path: args.repo_path.clone().unwrap_or_else(|| PathBuf::from(".")),
        branch: args
            .branch
            .clone()
            .or_else(|| cfg.branch.clone())
            .unwrap_or_else(|| "master".to_string()),
        depth,
        regex: args.regex.clone().or_else(|| cfg.regex.clone()),
        words,
        timestamps: args.timestamps || cfg.timestamps.unwrap_or(false),
        format,
        output: args.output.clone().or_else(|| cfg.output.clone().map(PathBuf::from)),
    })
}

// ── Duration formatting ────────────────────────────────────────────────────────

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_millis();
    if ms >= 1000 { format!("{:.1}s", d.as_secs_f64()) } else { format!("{ms}ms") }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
