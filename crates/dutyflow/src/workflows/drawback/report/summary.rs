use super::super::records::{ExportRecord, ImportRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

/// Duty and refund totals for one customs entry. Line-item eligibility
/// and match flags are reduced with logical OR: the entry counts as
/// eligible/matched if any of its line items is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySummary {
    pub entry_number: String,
    pub duty_paid: Decimal,
    pub potential_refund: Decimal,
    pub is_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_export_match: Option<bool>,
}

/// Aggregated view of one analysis run. The export-side fields are `None`
/// in single-dataset mode; percentage fields are `None` whenever their
/// denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub transaction_count: usize,
    pub eligible_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_count: Option<usize>,
    pub total_duty_paid: Decimal,
    pub total_potential_refund: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_pct_of_duty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_export_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_export_pct: Option<Decimal>,
    pub entries: Vec<EntrySummary>,
}

impl AnalysisSummary {
    pub fn from_imports(imports: &[ImportRecord]) -> Self {
        Self::build(imports, None)
    }

    pub fn from_imports_and_exports(imports: &[ImportRecord], exports: &[ExportRecord]) -> Self {
        Self::build(imports, Some(exports))
    }

    fn build(imports: &[ImportRecord], exports: Option<&[ExportRecord]>) -> Self {
        let transaction_count = imports.len();
        let eligible_count = imports.iter().filter(|record| record.is_eligible).count();
        let total_duty_paid: Decimal = imports.iter().map(|record| record.duty_paid).sum();
        let total_potential_refund: Decimal =
            imports.iter().map(|record| record.potential_refund).sum();

        let total = Decimal::from(transaction_count as u64);
        let eligible_pct = percentage(Decimal::from(eligible_count as u64), total);
        let refund_pct_of_duty = percentage(total_potential_refund, total_duty_paid);

        let matched_count = exports.map(|_| {
            imports
                .iter()
                .filter(|record| record.has_export_match)
                .count()
        });
        let matched_pct = matched_count
            .and_then(|count| percentage(Decimal::from(count as u64), total));

        let export_count = exports.map(<[ExportRecord]>::len);
        let matched_export_count = exports.map(|records| {
            records
                .iter()
                .filter(|record| record.matched_to_import)
                .count()
        });
        let matched_export_pct = match (matched_export_count, export_count) {
            (Some(matched), Some(total_exports)) => percentage(
                Decimal::from(matched as u64),
                Decimal::from(total_exports as u64),
            ),
            _ => None,
        };

        Self {
            transaction_count,
            eligible_count,
            matched_count,
            total_duty_paid,
            total_potential_refund,
            eligible_pct,
            matched_pct,
            refund_pct_of_duty,
            export_count,
            matched_export_count,
            matched_export_pct,
            entries: entry_breakdown(imports, exports.is_some()),
        }
    }
}

fn entry_breakdown(imports: &[ImportRecord], with_exports: bool) -> Vec<EntrySummary> {
    let mut entries: BTreeMap<&str, EntrySummary> = BTreeMap::new();

    for record in imports {
        let entry = entries
            .entry(record.entry_number.as_str())
            .or_insert_with(|| EntrySummary {
                entry_number: record.entry_number.clone(),
                duty_paid: Decimal::ZERO,
                potential_refund: Decimal::ZERO,
                is_eligible: false,
                has_export_match: if with_exports { Some(false) } else { None },
            });

        entry.duty_paid += record.duty_paid;
        entry.potential_refund += record.potential_refund;
        entry.is_eligible |= record.is_eligible;
        if let Some(matched) = entry.has_export_match.as_mut() {
            *matched |= record.has_export_match;
        }
    }

    entries.into_values().collect()
}

/// One-decimal percentage, or `None` when the denominator is zero.
fn percentage(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    Some(
        (numerator / denominator * dec!(100))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
    )
}
