use std::cmp::Ordering;

use crate::core::CoverageReport;

/// Share of `used` keys that are not `missing`, rounded to a whole percent.
///
/// `None` when nothing is used: a component without keys has no coverage
/// to speak of, rather than 0% or 100%.
pub fn coverage_percentage(used: usize, missing: usize) -> Option<u32> {
    if used == 0 {
        return None;
    }
    let present = used.saturating_sub(missing);
    Some((present as f64 / used as f64 * 100.0).round() as u32)
}

/// Reports with missing keys, most missing first (ties by name).
pub fn largest_gaps(reports: &[CoverageReport]) -> Vec<&CoverageReport> {
    let mut ranked: Vec<&CoverageReport> =
        reports.iter().filter(|r| r.missing_count() > 0).collect();
    ranked.sort_by(|a, b| {
        b.missing_count()
            .cmp(&a.missing_count())
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

/// Incomplete reports closest to done first.
///
/// Partially translated reports come before untranslated ones, then higher
/// percentages first, then by name. Reports without a percentage are left
/// out.
pub fn almost_done(reports: &[CoverageReport]) -> Vec<&CoverageReport> {
    let mut ranked: Vec<&CoverageReport> = reports
        .iter()
        .filter(|r| r.coverage.is_some() && r.missing_count() > 0)
        .collect();
    ranked.sort_by(|a, b| compare_progress(a, b));
    ranked
}

fn is_partial(report: &CoverageReport) -> bool {
    report.total_keys > report.missing_count()
}

fn compare_progress(a: &CoverageReport, b: &CoverageReport) -> Ordering {
    is_partial(b)
        .cmp(&is_partial(a))
        .then_with(|| b.coverage.cmp(&a.coverage))
        .then_with(|| a.name.cmp(&b.name))
}
