use super::summary::{AnalysisSummary, EntrySummary};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Render a single-dataset analysis summary as the plain-text report
/// callers attach to scan results.
pub fn render_import_summary(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    out.push_str("Import Analysis Summary\n");
    out.push_str("======================\n\n");

    let _ = writeln!(out, "Total Transactions: {}", summary.transaction_count);
    let _ = writeln!(
        out,
        "Eligible Transactions: {} ({})",
        summary.eligible_count,
        format_pct(summary.eligible_pct)
    );
    let _ = writeln!(out, "Total Duty Paid: {}", format_money(summary.total_duty_paid));
    let _ = writeln!(
        out,
        "Potential Refund: {} ({} of total duty)",
        format_money(summary.total_potential_refund),
        format_pct(summary.refund_pct_of_duty)
    );

    out.push('\n');
    render_entry_breakdown(&mut out, &summary.entries);
    out
}

/// Render a two-dataset analysis summary, including the export side.
pub fn render_drawback_summary(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    out.push_str("Import-Export Analysis Summary\n");
    out.push_str("=============================\n\n");

    let _ = writeln!(
        out,
        "Total Import Transactions: {}",
        summary.transaction_count
    );
    let _ = writeln!(
        out,
        "Eligible Import Transactions: {} ({})",
        summary.eligible_count,
        format_pct(summary.eligible_pct)
    );
    let _ = writeln!(
        out,
        "Imports with Export Matches: {} ({})",
        summary.matched_count.unwrap_or(0),
        format_pct(summary.matched_pct)
    );
    let _ = writeln!(out, "Total Duty Paid: {}", format_money(summary.total_duty_paid));
    let _ = writeln!(
        out,
        "Potential Refund: {} ({} of total duty)",
        format_money(summary.total_potential_refund),
        format_pct(summary.refund_pct_of_duty)
    );

    out.push('\n');
    let _ = writeln!(
        out,
        "Total Export Transactions: {}",
        summary.export_count.unwrap_or(0)
    );
    let _ = writeln!(
        out,
        "Exports Matched to Imports: {} ({})",
        summary.matched_export_count.unwrap_or(0),
        format_pct(summary.matched_export_pct)
    );

    out.push('\n');
    render_entry_breakdown(&mut out, &summary.entries);
    out
}

fn render_entry_breakdown(out: &mut String, entries: &[EntrySummary]) {
    out.push_str("Duty and Potential Refund by Entry Number:\n");
    for entry in entries {
        let eligibility = if entry.is_eligible {
            "Eligible"
        } else {
            "Not Eligible"
        };
        let match_note = match entry.has_export_match {
            Some(true) => ", With Export Match",
            Some(false) => ", No Export Match",
            None => "",
        };
        let _ = writeln!(
            out,
            "Entry #{}: Duty {}, Potential Refund {} ({}{})",
            entry.entry_number,
            format_money(entry.duty_paid),
            format_money(entry.potential_refund),
            eligibility,
            match_note
        );
    }
}

/// `$1,234.56` rendering with thousands separators.
fn format_money(amount: Decimal) -> String {
    let text = format!("{amount:.2}");
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (offset, digit) in whole.chars().enumerate() {
        if offset > 0 && (whole.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

fn format_pct(pct: Option<Decimal>) -> String {
    match pct {
        Some(value) => format!("{value:.1}%"),
        None => "N/A".to_string(),
    }
}
