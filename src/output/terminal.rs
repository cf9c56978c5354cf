// Colored terminal output for threat lists, analyses and stats.

use colored::{ColoredString, Colorize};

use crate::feeds::CollectSummary;
use crate::pipeline::{AnalysisResult, Insights, Stats, ThreatPage};
use crate::scoring::{Emergency, Maturity};

const TITLE_WIDTH: usize = 56;

/// Display a filtered threat page in the terminal.
pub fn display_threat_page(page: &ThreatPage, offset: usize) {
    if page.items.is_empty() {
        if page.total == 0 {
            println!("No matching threats. Run `threatlens collect` to fetch headlines.");
        } else {
            println!("No threats on this page ({} total).", page.total);
        }
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Threats {}-{} of {} ===",
            offset + 1,
            offset + page.items.len(),
            page.total
        )
        .bold()
    );
    println!();

    println!(
        "  {:>5}  {:<58} {:>3}  {:<7}  {:<10}  {:<22}  {}",
        "ID".dimmed(),
        "Title".dimmed(),
        "Sev".dimmed(),
        "Urgency".dimmed(),
        "Maturity".dimmed(),
        "Type".dimmed(),
        "Location".dimmed(),
    );
    println!("  {}", "-".repeat(124).dimmed());

    for item in &page.items {
        println!(
            "  {:>5}  {:<58} {:>3}  {:<7}  {:<10}  {:<22}  {} ({})",
            item.id,
            super::truncate_chars(&item.title, TITLE_WIDTH),
            item.severity,
            colorize_emergency(item.emergency),
            colorize_maturity(item.maturity),
            item.threat_type,
            item.location_name,
            item.location_scope,
        );
    }

    println!();

    let high = page
        .items
        .iter()
        .filter(|i| i.emergency == Emergency::High)
        .count();
    let critical = page
        .items
        .iter()
        .filter(|i| i.maturity == Maturity::Critical)
        .count();
    if high > 0 {
        println!("  {} {} high-urgency threats on this page", "!!".red().bold(), high);
    }
    if critical > 0 {
        println!("  {} {} critical threats on this page", "!".bright_red(), critical);
    }
}

/// Display one record's analysis.
pub fn display_analysis(analysis: &AnalysisResult) {
    println!(
        "\n{}",
        format!("=== Analysis for #{} ===", analysis.id).bold()
    );
    println!("  Type: {}", analysis.threat_type);
    println!("  Regions: {}", analysis.regions.join(", "));
    println!(
        "  Citizens affected: {}",
        format_thousands(analysis.citizens_affected)
    );

    let pct = format!("{:.2}%", analysis.political_capital_lost_pct);
    let pct = if analysis.political_capital_lost_pct >= 10.0 {
        pct.red().bold()
    } else if analysis.political_capital_lost_pct >= 5.0 {
        pct.yellow()
    } else {
        pct.normal()
    };
    println!("  Political capital lost: {}", pct);
}

/// Display aggregate counts followed by the insights line.
pub fn display_stats(stats: &Stats, insights: &Insights) {
    println!(
        "\n{}",
        format!("=== Headline Stats ({} total) ===", stats.total).bold()
    );

    println!("\n  {}", "By category:".dimmed());
    for (category, count) in &stats.categories {
        println!("    {:<20} {:>6}", category, count);
    }

    println!("\n  {}", "By bias:".dimmed());
    for (bias, count) in &stats.severity {
        println!("    {:<20} {:>6}", bias, count);
    }

    println!("\n  {}", insights.insights.italic());
}

/// One-line summary after a collection cycle.
pub fn display_collect_summary(summary: &CollectSummary) {
    let failed = if summary.feeds_failed > 0 {
        summary.feeds_failed.to_string().red()
    } else {
        summary.feeds_failed.to_string().normal()
    };
    println!(
        "Collected {} new headlines ({} already known) from {} feeds, {} failed.",
        summary.inserted.to_string().green(),
        summary.skipped,
        summary.feeds_ok,
        failed,
    );
}

fn colorize_emergency(emergency: Emergency) -> ColoredString {
    // Pad before coloring so escape codes don't break the column width
    let text = format!("{:<7}", emergency.as_str());
    match emergency {
        Emergency::High => text.red().bold(),
        Emergency::Medium => text.yellow(),
        Emergency::Low => text.green(),
    }
}

fn colorize_maturity(maturity: Maturity) -> ColoredString {
    let text = format!("{:<10}", maturity.as_str());
    match maturity {
        Maturity::Critical => text.red().bold(),
        Maturity::Escalating => text.yellow(),
        Maturity::Emerging => text.normal(),
    }
}

fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
