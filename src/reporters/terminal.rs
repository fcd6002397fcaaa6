use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};
use crate::types::Report;

pub fn report_terminal(report: &Report, timestamps: bool) {
    println!();
    println!(
        "{} — {} on \"{}\" ({} fixes, {} hotspots)",
        "🔥 git-bugspots".red().bold(),
        report.meta.repo_path.bright_black(),
        report.meta.branch.bright_black(),
        report.meta.fix_count.to_string().bright_black(),
        report.meta.spot_count.to_string().bright_black(),
    );
    println!();

    if report.fixes.is_empty() {
        println!("{}", "  No commits matched the fix pattern on this branch.".yellow());
        println!();
        return;
    }

    // ── Fixes ──────────────────────────────────────────────────────────────
    println!("{}", "Fixes:".cyan().bold());
    for fix in &report.fixes {
        let id = &fix.commit_id[..fix.commit_id.len().min(8)];
        if timestamps {
            println!(
                "  {} {} {} {}",
                "-".white(),
                format_date(fix.timestamp).bright_black(),
                fix.message,
                format!("({id})").bright_black(),
            );
        } else {
            println!(
                "  {} {} {}",
                "-".white(),
                fix.message,
                format!("({id})").bright_black(),
            );
        }
    }

    // ── Hotspots ───────────────────────────────────────────────────────────
    println!();
    println!("{}", "Hotspots:".cyan().bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["RANK", "SCORE", "FILE"]);

    let top = report.spots.first().map_or(0.0, |s| s.score);
    for (i, spot) in report.spots.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("{:3}", i + 1)),
            score_cell(spot, top),
            Cell::new(truncate_path(&spot.file, 60)),
        ]);
    }

    println!("{table}");
    println!();
}

// ─── Cell builders ────────────────────────────────────────────────────────────

/// Score cell: plain 4-digit text + color by share of the top score.
/// Plain text ensures comfy-table measures the real visible width.
fn score_cell(spot: &crate::types::Spot, top: f64) -> Cell {
    let text = spot.formatted_score();
    if top <= 0.0 {
        return Cell::new(text);
    }
    let share = spot.score / top;
    if share >= 0.75 {
        Cell::new(text).fg(Color::Red).add_attribute(Attribute::Bold)
    } else if share >= 0.40 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Green)
    }
}

// ─── Other helpers ────────────────────────────────────────────────────────────

fn format_date(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn truncate_path(s: &str, max: usize) -> String {
    if s.len() <= max { return s.to_string(); }
    format!("…{}", &s[s.len().saturating_sub(max - 1)..])
}
