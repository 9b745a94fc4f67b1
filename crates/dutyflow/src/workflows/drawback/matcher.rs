use super::records::{ExportRecord, ImportRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Strategy seam for pairing eligible imports against exports. The
/// shipped implementation performs no quantity reconciliation; a stricter
/// quantity-aware matcher can be substituted here without touching the
/// rest of the pipeline.
pub trait ExportMatcher {
    /// Set `has_export_match` on every import and `matched_to_import` on
    /// every export. Only imports already flagged eligible participate.
    fn match_records(&self, imports: &mut [ImportRecord], exports: &mut [ExportRecord]);
}

/// Reference matching rule: every export of the same product shipped
/// strictly after the import qualifies. The relation is many-to-many —
/// one export can satisfy any number of imports and vice versa.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllQualifyingPairs;

impl ExportMatcher for AllQualifyingPairs {
    fn match_records(&self, imports: &mut [ImportRecord], exports: &mut [ExportRecord]) {
        let mut by_product: HashMap<String, Vec<(usize, NaiveDate)>> = HashMap::new();
        for (index, export) in exports.iter().enumerate() {
            by_product
                .entry(export.product_id.clone())
                .or_default()
                .push((index, export.export_date));
        }

        for import in imports.iter_mut() {
            if !import.is_eligible {
                continue;
            }
            let Some(candidates) = by_product.get(import.product_id.as_str()) else {
                continue;
            };

            for &(index, export_date) in candidates {
                if export_date > import.import_date {
                    exports[index].matched_to_import = true;
                    import.has_export_match = true;
                }
            }
        }
    }
}
