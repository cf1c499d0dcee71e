//! Console rendering of an [`AuditReport`].
//!
//! Kept apart from the audit pipeline so the library can be used without
//! printing anything. Every write is propagated: a report that cannot be
//! written completely is an error, not a shorter report.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{AuditOutcome, CommandResult, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    AuditReport, AuditTotals, CoverageReport, DynamicKey, LocaleSide,
    diff::{almost_done, largest_gaps},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Keys listed per report (and per section) unless verbose.
const MAX_KEYS_DISPLAY: usize = 10;

const INDENT: &str = "      ";

/// Print the result of a command to stdout.
pub fn print(result: &CommandResult, verbose: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match result {
        CommandResult::Audit(outcome) => print_audit(outcome, verbose, &mut out),
        CommandResult::Init(summary) => print_init(summary, &mut out),
    }
}

fn print_audit<W: Write>(outcome: &AuditOutcome, verbose: bool, writer: &mut W) -> io::Result<()> {
    render(&outcome.report, verbose, writer)?;
    if let Some(path) = &outcome.json_written {
        writeln!(writer, "JSON report written to {}", path.display())?;
    }
    Ok(())
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    )?;
    writeln!(
        writer,
        "Edit {} to point at your locale directories, then run `locale-audit audit`.",
        CONFIG_FILE_NAME
    )
}

/// Render the whole report: locale files, components, rankings, dynamic
/// keys, unused keys, failures and totals, in that order.
pub fn render<W: Write>(report: &AuditReport, verbose: bool, writer: &mut W) -> io::Result<()> {
    let labels = Labels {
        source: &report.source_locale,
        target: &report.target_locale,
    };

    print_locale_files(report, &labels, verbose, writer)?;
    print_components(report, &labels, verbose, writer)?;
    print_almost_done(report, writer)?;
    print_dynamic_keys(&report.dynamic_keys, verbose, writer)?;
    print_unused_keys(report, verbose, writer)?;
    print_failures(report, verbose, writer)?;
    print_summary(report, &labels, writer)
}

struct Labels<'a> {
    source: &'a str,
    target: &'a str,
}

impl Labels<'_> {
    fn side(&self, side: LocaleSide) -> &str {
        match side {
            LocaleSide::Source => self.source,
            LocaleSide::Target => self.target,
        }
    }
}

fn print_locale_files<W: Write>(
    report: &AuditReport,
    labels: &Labels,
    verbose: bool,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!("Locale files ({} \u{2192} {})", labels.source, labels.target).bold()
    )?;
    if report.locale_files.is_empty() {
        writeln!(writer, "  {}", "no locale files found".dimmed())?;
        return writeln!(writer);
    }

    let width = name_width(report.locale_files.iter());
    for file in &report.locale_files {
        print_report_line(file, labels, width, writer)?;
        print_report_details(file, labels, verbose, writer)?;
    }
    writeln!(writer)
}

fn print_components<W: Write>(
    report: &AuditReport,
    labels: &Labels,
    verbose: bool,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!(
            "Components ({} using translation keys)",
            report.components.len()
        )
        .bold()
    )?;

    let gaps = largest_gaps(&report.components);
    let others: Vec<&CoverageReport> = report
        .components
        .iter()
        .filter(|c| c.missing_count() == 0 && c.has_issues())
        .collect();

    if gaps.is_empty() && others.is_empty() {
        writeln!(
            writer,
            "  {} {}",
            SUCCESS_MARK.green(),
            format!("every used key exists in {}", labels.target).green()
        )?;
        return writeln!(writer);
    }

    if !gaps.is_empty() {
        writeln!(writer, "  {}", "largest gaps first:".dimmed())?;
    }
    let width = name_width(gaps.iter().chain(others.iter()).copied());
    for component in gaps.into_iter().chain(others) {
        print_report_line(component, labels, width, writer)?;
        print_report_details(component, labels, verbose, writer)?;
    }
    writeln!(writer)
}

fn print_almost_done<W: Write>(report: &AuditReport, writer: &mut W) -> io::Result<()> {
    let ranked = almost_done(&report.components);
    if ranked.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", "Almost done".bold())?;
    let width = name_width(ranked.iter().copied());
    for component in ranked {
        writeln!(
            writer,
            "  {}{}  {}  ({} missing)",
            component.name,
            padding(&component.name, width),
            format_coverage(component.coverage),
            component.missing_count()
        )?;
    }
    writeln!(writer)
}

fn print_dynamic_keys<W: Write>(
    dynamic_keys: &[DynamicKey],
    verbose: bool,
    writer: &mut W,
) -> io::Result<()> {
    if dynamic_keys.is_empty() {
        return Ok(());
    }

    writeln!(
        writer,
        "{}",
        format!(
            "Dynamic keys ({} call sites could not be checked)",
            dynamic_keys.len()
        )
        .bold()
    )?;
    let shown = display_count(dynamic_keys.len(), verbose);
    for key in &dynamic_keys[..shown] {
        writeln!(
            writer,
            "  {} {}:{}:{}  {}",
            "-->".blue(),
            key.file_path,
            key.line,
            key.col,
            key.reason.to_string().dimmed()
        )?;
        if verbose {
            writeln!(writer, "{}{} {}", INDENT, "|".blue(), key.source_line.trim())?;
        }
    }
    print_more(dynamic_keys.len() - shown, "  ", writer)?;
    writeln!(writer)
}

fn print_unused_keys<W: Write>(report: &AuditReport, verbose: bool, writer: &mut W) -> io::Result<()> {
    if report.unused_keys.is_empty() {
        return Ok(());
    }

    writeln!(
        writer,
        "{}",
        format!(
            "Unused keys ({} in {} not referenced by any UI file)",
            report.unused_keys.len(),
            report.source_locale
        )
        .bold()
    )?;
    print_keys(&report.unused_keys, "  - ", verbose, writer)?;
    writeln!(writer)
}

fn print_failures<W: Write>(report: &AuditReport, verbose: bool, writer: &mut W) -> io::Result<()> {
    if report.failures.is_empty() {
        return Ok(());
    }

    writeln!(
        writer,
        "{}",
        format!("Files that failed to load ({})", report.failures.len())
            .bold()
            .yellow()
    )?;
    let shown = display_count(report.failures.len(), verbose);
    for failure in &report.failures[..shown] {
        writeln!(writer, "  {} {}", "warning:".bold().yellow(), failure.file_path)?;
        writeln!(writer, "{}{}", INDENT, failure.error.dimmed())?;
    }
    print_more(report.failures.len() - shown, "  ", writer)?;
    writeln!(writer)
}

fn print_summary<W: Write>(report: &AuditReport, labels: &Labels, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", "Summary".bold())?;
    print_totals("locale files", "analyzed", &report.locale_totals, labels, writer)?;
    // UI files without keys get no report, so this is not the scanned count.
    print_totals("components", "with keys", &report.component_totals, labels, writer)?;
    writeln!(
        writer,
        "  {} UI {} scanned, {} dynamic {}",
        report.ui_files_scanned,
        plural(report.ui_files_scanned, "file", "files"),
        report.dynamic_keys.len(),
        plural(report.dynamic_keys.len(), "key", "keys")
    )?;

    let missing = report.missing_in_target_locale().len();
    if missing == 0 {
        writeln!(
            writer,
            "\n{} {}",
            SUCCESS_MARK.green(),
            format!("No keys missing in {}", labels.target).green()
        )
    } else {
        writeln!(
            writer,
            "\n{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} {} missing in {}",
                missing,
                plural(missing, "key", "keys"),
                labels.target
            )
            .red()
        )
    }
}

fn print_totals<W: Write>(
    label: &str,
    counted_as: &str,
    totals: &AuditTotals,
    labels: &Labels,
    writer: &mut W,
) -> io::Result<()> {
    write!(
        writer,
        "  {}: {} {}, {} with issues, {} missing in {}, {} missing in {}, {} structural",
        label,
        totals.files_analyzed,
        counted_as,
        totals.files_with_issues,
        totals.missing_in_target_locale,
        labels.target,
        totals.missing_in_source_locale,
        labels.source,
        totals.structural_differences
    )?;
    if totals.unverified_keys > 0 {
        write!(writer, ", {} unverified", totals.unverified_keys)?;
    }
    writeln!(writer)
}

// ============================================================
// Per-report helpers
// ============================================================

fn print_report_line<W: Write>(
    report: &CoverageReport,
    labels: &Labels,
    width: usize,
    writer: &mut W,
) -> io::Result<()> {
    let mark = if report.has_issues() {
        FAILURE_MARK.red()
    } else {
        SUCCESS_MARK.green()
    };

    write!(
        writer,
        "  {} {}{}  {}",
        mark,
        report.name,
        padding(&report.name, width),
        format_coverage(report.coverage)
    )?;
    match report.load_failure {
        Some(side) => writeln!(
            writer,
            "  {}",
            format!("failed to load in {}", labels.side(side)).yellow()
        ),
        None if report.has_issues() => writeln!(writer, "  {}", summarize(report, labels)),
        None => writeln!(writer),
    }
}

fn summarize(report: &CoverageReport, labels: &Labels) -> String {
    let mut parts = Vec::new();
    if !report.missing_in_target_locale.is_empty() {
        parts.push(format!(
            "{} missing in {}",
            report.missing_in_target_locale.len(),
            labels.target
        ));
    }
    if !report.missing_in_source_locale.is_empty() {
        parts.push(format!(
            "{} missing in {}",
            report.missing_in_source_locale.len(),
            labels.source
        ));
    }
    if !report.structural_differences.is_empty() {
        parts.push(format!(
            "{} structural",
            report.structural_differences.len()
        ));
    }
    if !report.unverified_keys.is_empty() {
        parts.push(format!("{} unverified", report.unverified_keys.len()));
    }
    parts.join(", ")
}

fn print_report_details<W: Write>(
    report: &CoverageReport,
    labels: &Labels,
    verbose: bool,
    writer: &mut W,
) -> io::Result<()> {
    let sections = [
        (
            format!("missing in {}:", labels.target),
            &report.missing_in_target_locale,
        ),
        (
            format!("missing in {}:", labels.source),
            &report.missing_in_source_locale,
        ),
        (
            "unverified (locale file failed to load):".to_string(),
            &report.unverified_keys,
        ),
    ];
    for (title, keys) in sections {
        if keys.is_empty() {
            continue;
        }
        writeln!(writer, "{}{}", INDENT, title.dimmed())?;
        print_keys(keys, "        - ", verbose, writer)?;
    }

    if !report.structural_differences.is_empty() {
        writeln!(writer, "{}{}", INDENT, "structural differences:".dimmed())?;
        let shown = display_count(report.structural_differences.len(), verbose);
        for diff in &report.structural_differences[..shown] {
            writeln!(writer, "        ~ {}", diff)?;
        }
        print_more(
            report.structural_differences.len() - shown,
            "        ",
            writer,
        )?;
    }
    Ok(())
}

fn print_keys<W: Write>(keys: &[String], prefix: &str, verbose: bool, writer: &mut W) -> io::Result<()> {
    let shown = display_count(keys.len(), verbose);
    for key in &keys[..shown] {
        writeln!(writer, "{}{}", prefix, key)?;
    }
    let indent = " ".repeat(prefix.len().saturating_sub(2));
    print_more(keys.len() - shown, &indent, writer)
}

fn print_more<W: Write>(remaining: usize, indent: &str, writer: &mut W) -> io::Result<()> {
    if remaining > 0 {
        writeln!(
            writer,
            "{}{}",
            indent,
            format!("... and {} more (use -v to list all)", remaining).dimmed()
        )?;
    }
    Ok(())
}

fn display_count(total: usize, verbose: bool) -> usize {
    if verbose {
        total
    } else {
        total.min(MAX_KEYS_DISPLAY)
    }
}

fn format_coverage(coverage: Option<u32>) -> String {
    match coverage {
        Some(percent) => format!("{:>3}%", percent),
        None => "   -".to_string(),
    }
}

fn name_width<'a>(reports: impl Iterator<Item = &'a CoverageReport>) -> usize {
    reports
        .map(|r| UnicodeWidthStr::width(r.name.as_str()))
        .max()
        .unwrap_or(0)
}

fn padding(name: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(UnicodeWidthStr::width(name)))
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// Tests
// ============================================================
