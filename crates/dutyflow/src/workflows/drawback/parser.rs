use super::records::{ExportRecord, ImportRecord};
use super::DrawbackError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};

pub(crate) const IMPORT_COLUMNS: [&str; 5] = [
    "entry_number",
    "product_id",
    "import_date",
    "quantity",
    "duty_paid",
];

pub(crate) const EXPORT_COLUMNS: [&str; 5] = [
    "export_reference",
    "product_id",
    "export_date",
    "quantity",
    "destination",
];

/// Accepted date renderings, attempted in order: ISO, US, European. The
/// first format that parses an entire column is applied to every row of
/// that column; formats are never mixed within one column.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Which uploaded dataset a row belongs to, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Imports,
    Exports,
}

impl Dataset {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Imports => "import",
            Self::Exports => "export",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw import row as uploaded: the date is still a string and nothing is
/// derived yet. JSON and CSV intake share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    pub entry_number: String,
    pub product_id: String,
    pub import_date: String,
    pub quantity: u32,
    pub duty_paid: Decimal,
}

/// Raw export row as uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub export_reference: String,
    pub product_id: String,
    pub export_date: String,
    pub quantity: u32,
    pub destination: String,
}

pub fn read_import_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>, DrawbackError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    ensure_columns(csv_reader.headers()?, &IMPORT_COLUMNS, Dataset::Imports)?;

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<ImportRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn read_export_rows<R: Read>(reader: R) -> Result<Vec<ExportRow>, DrawbackError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    ensure_columns(csv_reader.headers()?, &EXPORT_COLUMNS, Dataset::Exports)?;

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<ExportRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Write analyzed import records back out as CSV. Dates round-trip as
/// `YYYY-MM-DD` strings.
pub fn write_import_results<W: Write>(
    writer: W,
    records: &[ImportRecord],
) -> Result<(), DrawbackError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub(crate) fn normalize_imports(rows: Vec<ImportRow>) -> Result<Vec<ImportRecord>, DrawbackError> {
    let raw_dates: Vec<&str> = rows.iter().map(|row| row.import_date.as_str()).collect();
    let dates = parse_date_column(&raw_dates, "import_date")?;

    Ok(rows
        .into_iter()
        .zip(dates)
        .map(|(row, import_date)| {
            ImportRecord::new(
                row.entry_number,
                row.product_id,
                import_date,
                row.quantity,
                row.duty_paid,
            )
        })
        .collect())
}

pub(crate) fn normalize_exports(rows: Vec<ExportRow>) -> Result<Vec<ExportRecord>, DrawbackError> {
    let raw_dates: Vec<&str> = rows.iter().map(|row| row.export_date.as_str()).collect();
    let dates = parse_date_column(&raw_dates, "export_date")?;

    Ok(rows
        .into_iter()
        .zip(dates)
        .map(|(row, export_date)| {
            ExportRecord::new(
                row.export_reference,
                row.product_id,
                export_date,
                row.quantity,
                row.destination,
            )
        })
        .collect())
}

fn ensure_columns(
    headers: &csv::StringRecord,
    required: &[&'static str],
    dataset: Dataset,
) -> Result<(), DrawbackError> {
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(DrawbackError::MissingColumn { dataset, column });
        }
    }
    Ok(())
}

fn parse_date_column(
    values: &[&str],
    column: &'static str,
) -> Result<Vec<NaiveDate>, DrawbackError> {
    for format in DATE_FORMATS {
        let parsed: Result<Vec<NaiveDate>, _> = values
            .iter()
            .map(|raw| NaiveDate::parse_from_str(raw.trim(), format))
            .collect();
        if let Ok(dates) = parsed {
            return Ok(dates);
        }
    }

    // No format covered the whole column; surface the first offending
    // value along with the ISO parser's complaint.
    match values.iter().find_map(|raw| {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMATS[0])
            .err()
            .map(|source| (raw.trim().to_string(), source))
    }) {
        Some((value, source)) => Err(DrawbackError::DateFormat {
            column,
            value,
            source,
        }),
        None => Ok(Vec::new()),
    }
}
