//! Duty drawback analysis pipeline: Parse -> Classify -> Match ->
//! Calculate -> Aggregate, in one deterministic pass.

pub mod claim;
mod eligibility;
mod matcher;
mod parser;
mod records;
mod refund;
pub mod report;

use chrono::{Local, NaiveDate};
use serde::Serialize;

pub use eligibility::is_eligible;
pub use matcher::{AllQualifyingPairs, ExportMatcher};
pub use parser::{
    read_export_rows, read_import_rows, write_import_results, Dataset, ExportRow, ImportRow,
};
pub use records::{ExportRecord, ImportRecord};
pub use refund::REFUND_RATE;
pub use report::AnalysisSummary;

#[derive(Debug, thiserror::Error)]
pub enum DrawbackError {
    #[error("failed to read transaction data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column in {dataset} data: {column}")]
    MissingColumn {
        dataset: Dataset,
        column: &'static str,
    },
    #[error("could not parse {column} value '{value}' with any accepted date format: {source}")]
    DateFormat {
        column: &'static str,
        value: String,
        source: chrono::ParseError,
    },
}

/// Single-dataset analysis output: every import flagged and priced on
/// eligibility alone.
#[derive(Debug, Clone, Serialize)]
pub struct ImportAnalysis {
    pub records: Vec<ImportRecord>,
    pub summary: AnalysisSummary,
}

impl ImportAnalysis {
    /// Count of eligible rows, for callers that refuse to build claims or
    /// reports from an empty result.
    pub fn eligible_count(&self) -> usize {
        self.summary.eligible_count
    }
}

/// Two-dataset analysis output with the full matching pipeline applied.
#[derive(Debug, Clone, Serialize)]
pub struct DrawbackAnalysis {
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
    pub summary: AnalysisSummary,
}

impl DrawbackAnalysis {
    pub fn eligible_count(&self) -> usize {
        self.summary.eligible_count
    }
}

/// Batch analyzer over one import/export dataset pair. Holds the
/// evaluation date so callers (and tests) control the eligibility window
/// instead of the pipeline reading the wall clock mid-flight.
#[derive(Debug, Clone)]
pub struct DrawbackAnalyzer<M = AllQualifyingPairs> {
    as_of: NaiveDate,
    matcher: M,
}

impl DrawbackAnalyzer {
    /// Analyzer evaluating against today's date.
    pub fn new() -> Self {
        Self::as_of(Local::now().date_naive())
    }

    /// Analyzer evaluating against an explicit reference date.
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            matcher: AllQualifyingPairs,
        }
    }
}

impl Default for DrawbackAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ExportMatcher> DrawbackAnalyzer<M> {
    /// Analyzer using a custom matching strategy.
    pub fn with_matcher(as_of: NaiveDate, matcher: M) -> Self {
        Self { as_of, matcher }
    }

    /// Single-dataset mode: no export data, so refunds are granted on
    /// eligibility alone and no matching runs.
    pub fn analyze_imports(&self, rows: Vec<ImportRow>) -> Result<ImportAnalysis, DrawbackError> {
        let mut records = parser::normalize_imports(rows)?;

        for record in &mut records {
            record.is_eligible = eligibility::is_eligible(record.import_date, self.as_of);
            record.potential_refund =
                refund::refund_for_eligible(record.duty_paid, record.is_eligible);
        }

        let summary = AnalysisSummary::from_imports(&records);
        Ok(ImportAnalysis { records, summary })
    }

    /// Two-dataset mode: refunds additionally require at least one
    /// qualifying export of the same product.
    pub fn analyze_imports_and_exports(
        &self,
        imports: Vec<ImportRow>,
        exports: Vec<ExportRow>,
    ) -> Result<DrawbackAnalysis, DrawbackError> {
        let mut import_records = parser::normalize_imports(imports)?;
        let mut export_records = parser::normalize_exports(exports)?;

        for record in &mut import_records {
            record.is_eligible = eligibility::is_eligible(record.import_date, self.as_of);
        }

        self.matcher
            .match_records(&mut import_records, &mut export_records);

        for record in &mut import_records {
            record.potential_refund = refund::refund_for_matched(
                record.duty_paid,
                record.is_eligible,
                record.has_export_match,
            );
        }

        let summary = AnalysisSummary::from_imports_and_exports(&import_records, &export_records);
        Ok(DrawbackAnalysis {
            imports: import_records,
            exports: export_records,
            summary,
        })
    }
}
