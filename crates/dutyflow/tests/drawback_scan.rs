use chrono::NaiveDate;
use dutyflow::workflows::drawback::claim::{build_claim, ClaimantInfo};
use dutyflow::workflows::drawback::{
    read_export_rows, read_import_rows, write_import_results, DrawbackAnalyzer, ExportRow,
    ImportRow,
};
use rust_decimal_macros::dec;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid evaluation date")
}

fn sample_imports() -> Vec<ImportRow> {
    read_import_rows(&include_bytes!("../sample_imports.csv")[..]).expect("sample imports parse")
}

fn sample_exports() -> Vec<ExportRow> {
    read_export_rows(&include_bytes!("../sample_exports.csv")[..]).expect("sample exports parse")
}

#[test]
fn calibration_scenario_refunds_99_dollars() {
    let imports = vec![ImportRow {
        entry_number: "E1".to_string(),
        product_id: "P1".to_string(),
        import_date: "2022-01-01".to_string(),
        quantity: 10,
        duty_paid: dec!(100.00),
    }];
    let exports = vec![ExportRow {
        export_reference: "X1".to_string(),
        product_id: "P1".to_string(),
        export_date: "2022-06-01".to_string(),
        quantity: 5,
        destination: "Canada".to_string(),
    }];

    let analysis = DrawbackAnalyzer::as_of(as_of())
        .analyze_imports_and_exports(imports, exports)
        .expect("analysis runs");

    assert!(analysis.imports[0].is_eligible);
    assert!(analysis.imports[0].has_export_match);
    assert_eq!(analysis.imports[0].potential_refund, dec!(99.00));
    assert!(analysis.exports[0].matched_to_import);
}

#[test]
fn sample_dataset_matches_and_aggregates() {
    let analysis = DrawbackAnalyzer::as_of(as_of())
        .analyze_imports_and_exports(sample_imports(), sample_exports())
        .expect("sample analysis runs");

    let summary = &analysis.summary;
    assert_eq!(summary.transaction_count, 6);
    assert_eq!(summary.eligible_count, 4);
    assert_eq!(summary.matched_count, Some(2));
    assert_eq!(summary.export_count, Some(5));
    assert_eq!(summary.matched_export_count, Some(2));
    assert_eq!(summary.total_duty_paid, dec!(2176.49));
    assert_eq!(summary.total_potential_refund, dec!(574.20));

    // The TEX-2200 export predates the import, so that line stays
    // unmatched even though the product matches.
    let tex_line = analysis
        .imports
        .iter()
        .find(|record| record.product_id == "TEX-2200" && record.is_eligible)
        .expect("eligible TEX-2200 line present");
    assert!(!tex_line.has_export_match);
    assert_eq!(tex_line.potential_refund, dec!(0.00));

    let per_entry_duty: rust_decimal::Decimal =
        summary.entries.iter().map(|entry| entry.duty_paid).sum();
    assert_eq!(per_entry_duty, summary.total_duty_paid);
}

#[test]
fn single_dataset_mode_prices_every_eligible_line() {
    let analysis = DrawbackAnalyzer::as_of(as_of())
        .analyze_imports(sample_imports())
        .expect("sample analysis runs");

    assert_eq!(analysis.eligible_count(), 4);
    assert_eq!(analysis.summary.total_potential_refund, dec!(1100.14));
    assert_eq!(analysis.summary.matched_count, None);
}

#[test]
fn analyzed_records_round_trip_to_csv_with_iso_dates() {
    let analysis = DrawbackAnalyzer::as_of(as_of())
        .analyze_imports(sample_imports())
        .expect("sample analysis runs");

    let mut buffer = Vec::new();
    write_import_results(&mut buffer, &analysis.records).expect("results write");
    let written = String::from_utf8(buffer).expect("utf-8 results");

    assert!(written.starts_with(
        "entry_number,product_id,import_date,quantity,duty_paid,is_eligible,has_export_match,potential_refund"
    ));
    assert!(written.contains("2021-03-15"));
}

#[test]
fn claim_built_from_sample_analysis_collects_eligible_entries() {
    let analysis = DrawbackAnalyzer::as_of(as_of())
        .analyze_imports_and_exports(sample_imports(), sample_exports())
        .expect("sample analysis runs");

    let claim = build_claim(&analysis.imports, ClaimantInfo::default(), as_of())
        .expect("claim builds");

    assert_eq!(claim.line_items.len(), 4);
    assert_eq!(
        claim.entry_numbers,
        vec!["E00001".to_string(), "E00003".to_string()]
    );
    assert_eq!(claim.total_claimed_refund, dec!(574.20));
}
