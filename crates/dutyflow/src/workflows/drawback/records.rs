use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One line item of a customs import entry, with its derived analysis
/// fields. Several line items can share an `entry_number`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRecord {
    pub entry_number: String,
    pub product_id: String,
    pub import_date: NaiveDate,
    pub quantity: u32,
    pub duty_paid: Decimal,
    pub is_eligible: bool,
    pub has_export_match: bool,
    pub potential_refund: Decimal,
}

impl ImportRecord {
    pub(crate) fn new(
        entry_number: String,
        product_id: String,
        import_date: NaiveDate,
        quantity: u32,
        duty_paid: Decimal,
    ) -> Self {
        Self {
            entry_number,
            product_id,
            import_date,
            quantity,
            duty_paid,
            is_eligible: false,
            has_export_match: false,
            potential_refund: Decimal::ZERO,
        }
    }
}

/// One outbound shipment. `export_reference` is informational and not
/// required to be unique across products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub export_reference: String,
    pub product_id: String,
    pub export_date: NaiveDate,
    pub quantity: u32,
    pub destination: String,
    pub matched_to_import: bool,
}

impl ExportRecord {
    pub(crate) fn new(
        export_reference: String,
        product_id: String,
        export_date: NaiveDate,
        quantity: u32,
        destination: String,
    ) -> Self {
        Self {
            export_reference,
            product_id,
            export_date,
            quantity,
            destination,
            matched_to_import: false,
        }
    }
}
