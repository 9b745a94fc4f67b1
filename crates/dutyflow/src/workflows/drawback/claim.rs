use super::records::ImportRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Claimant identity block carried onto the drawback entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimantInfo {
    pub name: String,
    pub address: String,
    pub city_state_zip: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub importer_number: String,
}

impl Default for ClaimantInfo {
    /// Placeholder block used when the caller supplies no claimant; a
    /// real filing replaces every field.
    fn default() -> Self {
        Self {
            name: "Your Company Name".to_string(),
            address: "123 Business St, Suite 100".to_string(),
            city_state_zip: "Anytown, ST 12345".to_string(),
            contact_name: "Contact Person".to_string(),
            phone: "(555) 555-5555".to_string(),
            email: "contact@yourcompany.com".to_string(),
            importer_number: "IMPxxxxxxxx".to_string(),
        }
    }
}

/// One eligible import line carried onto the claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimLineItem {
    pub entry_number: String,
    pub product_id: String,
    pub import_date: NaiveDate,
    pub quantity: u32,
    pub duty_paid: Decimal,
    pub claimed_refund: Decimal,
}

/// Structured drawback claim handed to the rendering layer. The core
/// emits the data only; form layout happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawbackClaim {
    pub claimant: ClaimantInfo,
    pub prepared_on: NaiveDate,
    pub entry_numbers: Vec<String>,
    pub line_items: Vec<ClaimLineItem>,
    pub total_duty_paid: Decimal,
    pub total_claimed_refund: Decimal,
}

#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error("no eligible transactions found for drawback claim")]
    NoEligibleTransactions,
}

/// Assemble a claim from analyzed import records. Only eligible records
/// become line items; zero eligible records is an error the caller turns
/// into its own empty-result response.
pub fn build_claim(
    records: &[ImportRecord],
    claimant: ClaimantInfo,
    prepared_on: NaiveDate,
) -> Result<DrawbackClaim, ClaimError> {
    let line_items: Vec<ClaimLineItem> = records
        .iter()
        .filter(|record| record.is_eligible)
        .map(|record| ClaimLineItem {
            entry_number: record.entry_number.clone(),
            product_id: record.product_id.clone(),
            import_date: record.import_date,
            quantity: record.quantity,
            duty_paid: record.duty_paid,
            claimed_refund: record.potential_refund,
        })
        .collect();

    if line_items.is_empty() {
        return Err(ClaimError::NoEligibleTransactions);
    }

    let mut entry_numbers: Vec<String> = line_items
        .iter()
        .map(|item| item.entry_number.clone())
        .collect();
    entry_numbers.sort();
    entry_numbers.dedup();

    let total_duty_paid = line_items.iter().map(|item| item.duty_paid).sum();
    let total_claimed_refund = line_items.iter().map(|item| item.claimed_refund).sum();

    Ok(DrawbackClaim {
        claimant,
        prepared_on,
        entry_numbers,
        line_items,
        total_duty_paid,
        total_claimed_refund,
    })
}
