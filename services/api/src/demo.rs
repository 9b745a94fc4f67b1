use chrono::{Local, NaiveDate};
use clap::Args;
use dutyflow::error::AppError;
use dutyflow::workflows::drawback::report::{render_drawback_summary, render_import_summary};
use dutyflow::workflows::drawback::{
    read_export_rows, read_import_rows, write_import_results, DrawbackAnalyzer, ExportRow,
    ImportRow,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScanArgs {
    /// Import transactions CSV file
    #[arg(long)]
    pub(crate) imports: PathBuf,
    /// Export transactions CSV file; enables the matching pipeline
    #[arg(long)]
    pub(crate) exports: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Write the analyzed import records to this CSV path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_scan(args: ScanArgs) -> Result<(), AppError> {
    let ScanArgs {
        imports,
        exports,
        as_of,
        output,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let analyzer = DrawbackAnalyzer::as_of(as_of);
    let import_rows = read_import_rows(File::open(&imports)?)?;

    let records = match exports {
        Some(path) => {
            let export_rows = read_export_rows(File::open(&path)?)?;
            let analysis = analyzer.analyze_imports_and_exports(import_rows, export_rows)?;
            println!("{}", render_drawback_summary(&analysis.summary));
            analysis.imports
        }
        None => {
            let analysis = analyzer.analyze_imports(import_rows)?;
            println!("{}", render_import_summary(&analysis.summary));
            analysis.records
        }
    };

    if let Some(path) = output {
        write_import_results(File::create(&path)?, &records)?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let analyzer = DrawbackAnalyzer::as_of(as_of);

    println!("DutyFlow demo — evaluating as of {as_of}\n");

    let import_only = analyzer.analyze_imports(sample_imports(as_of))?;
    println!("{}", render_import_summary(&import_only.summary));

    let full = analyzer.analyze_imports_and_exports(sample_imports(as_of), sample_exports(as_of))?;
    println!("{}", render_drawback_summary(&full.summary));

    Ok(())
}

fn import_row(
    entry: &str,
    product: &str,
    date: NaiveDate,
    quantity: u32,
    duty: &str,
) -> ImportRow {
    ImportRow {
        entry_number: entry.to_string(),
        product_id: product.to_string(),
        import_date: date.to_string(),
        quantity,
        duty_paid: duty.parse().unwrap_or_default(),
    }
}

fn export_row(
    reference: &str,
    product: &str,
    date: NaiveDate,
    quantity: u32,
    destination: &str,
) -> ExportRow {
    ExportRow {
        export_reference: reference.to_string(),
        product_id: product.to_string(),
        export_date: date.to_string(),
        quantity,
        destination: destination.to_string(),
    }
}

/// Small synthetic batch spanning both sides of the eligibility window,
/// anchored to the demo's evaluation date.
fn sample_imports(as_of: NaiveDate) -> Vec<ImportRow> {
    let days = |count: i64| as_of - chrono::Duration::days(count);
    vec![
        import_row("E00001", "ELE-1001", days(400), 20, "450.00"),
        import_row("E00001", "TEX-2200", days(400), 35, "220.50"),
        import_row("E00002", "ELE-1001", days(6 * 365), 10, "975.25"),
        import_row("E00003", "HOM-3320", days(200), 8, "130.00"),
        import_row("E00003", "OFF-4410", days(180), 12, "310.75"),
        import_row("E00004", "TEX-2200", days(7 * 365), 40, "89.99"),
    ]
}

fn sample_exports(as_of: NaiveDate) -> Vec<ExportRow> {
    let days = |count: i64| as_of - chrono::Duration::days(count);
    vec![
        export_row("X1001", "ELE-1001", days(250), 15, "Canada"),
        export_row("X1002", "TEX-2200", days(500), 10, "Mexico"),
        export_row("X1003", "HOM-3320", days(90), 8, "Germany"),
        export_row("X1004", "ELE-1001", days(5 * 365), 5, "Japan"),
        export_row("X1005", "CHE-9999", days(30), 50, "Brazil"),
    ]
}
