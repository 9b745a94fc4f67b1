use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use dutyflow::error::AppError;
use dutyflow::workflows::drawback::claim::{build_claim, ClaimantInfo, DrawbackClaim};
use dutyflow::workflows::drawback::report::{render_drawback_summary, render_import_summary};
use dutyflow::workflows::drawback::{
    read_export_rows, read_import_rows, AnalysisSummary, DrawbackAnalyzer, ExportRecord,
    ImportRecord,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct ScanRequest {
    /// Raw CSV content of the uploaded import file.
    pub(crate) import_csv: String,
    /// Evaluation date for the eligibility window; defaults to today.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScanResponse {
    pub(crate) as_of: NaiveDate,
    pub(crate) summary: AnalysisSummary,
    pub(crate) summary_text: String,
    pub(crate) transactions: Vec<ImportRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanWithExportsRequest {
    pub(crate) import_csv: String,
    pub(crate) export_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScanWithExportsResponse {
    pub(crate) as_of: NaiveDate,
    pub(crate) summary: AnalysisSummary,
    pub(crate) summary_text: String,
    pub(crate) transactions: Vec<ImportRecord>,
    pub(crate) export_transactions: Vec<ExportRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClaimRequest {
    pub(crate) import_csv: String,
    #[serde(default)]
    pub(crate) export_csv: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
    /// Claimant block for the form; placeholder values when omitted.
    #[serde(default)]
    pub(crate) claimant: Option<ClaimantInfo>,
}

pub(crate) fn drawback_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/drawback/scan", axum::routing::post(scan_endpoint))
        .route(
            "/api/v1/drawback/scan-with-exports",
            axum::routing::post(scan_with_exports_endpoint),
        )
        .route(
            "/api/v1/drawback/claim",
            axum::routing::post(claim_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "DutyFlow API is running" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn scan_endpoint(
    Json(payload): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let rows = read_import_rows(Cursor::new(payload.import_csv.into_bytes()))?;
    let as_of = payload.as_of.unwrap_or_else(|| Local::now().date_naive());

    let analysis = DrawbackAnalyzer::as_of(as_of).analyze_imports(rows)?;
    let summary_text = render_import_summary(&analysis.summary);

    Ok(Json(ScanResponse {
        as_of,
        summary: analysis.summary,
        summary_text,
        transactions: analysis.records,
    }))
}

pub(crate) async fn scan_with_exports_endpoint(
    Json(payload): Json<ScanWithExportsRequest>,
) -> Result<Json<ScanWithExportsResponse>, AppError> {
    let import_rows = read_import_rows(Cursor::new(payload.import_csv.into_bytes()))?;
    let export_rows = read_export_rows(Cursor::new(payload.export_csv.into_bytes()))?;
    let as_of = payload.as_of.unwrap_or_else(|| Local::now().date_naive());

    let analysis = DrawbackAnalyzer::as_of(as_of).analyze_imports_and_exports(import_rows, export_rows)?;
    let summary_text = render_drawback_summary(&analysis.summary);

    Ok(Json(ScanWithExportsResponse {
        as_of,
        summary: analysis.summary,
        summary_text,
        transactions: analysis.imports,
        export_transactions: analysis.exports,
    }))
}

pub(crate) async fn claim_endpoint(
    Json(payload): Json<ClaimRequest>,
) -> Result<Json<DrawbackClaim>, AppError> {
    let import_rows = read_import_rows(Cursor::new(payload.import_csv.into_bytes()))?;
    let as_of = payload.as_of.unwrap_or_else(|| Local::now().date_naive());
    let analyzer = DrawbackAnalyzer::as_of(as_of);

    let records = match payload.export_csv {
        Some(export_csv) => {
            let export_rows = read_export_rows(Cursor::new(export_csv.into_bytes()))?;
            analyzer
                .analyze_imports_and_exports(import_rows, export_rows)?
                .imports
        }
        None => analyzer.analyze_imports(import_rows)?.records,
    };

    let claimant = payload.claimant.unwrap_or_default();
    let claim = build_claim(&records, claimant, as_of)?;
    Ok(Json(claim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const IMPORTS_CSV: &str = "\
entry_number,product_id,import_date,quantity,duty_paid
E1,P1,2022-01-01,10,100.00
E2,P2,2016-01-01,5,500.00
";

    const EXPORTS_CSV: &str = "\
export_reference,product_id,export_date,quantity,destination
X1,P1,2022-06-01,5,Canada
";

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date")
    }

    #[tokio::test]
    async fn scan_endpoint_flags_and_prices_imports() {
        let request = ScanRequest {
            import_csv: IMPORTS_CSV.to_string(),
            as_of: Some(as_of()),
        };

        let Json(body) = scan_endpoint(Json(request)).await.expect("scan runs");

        assert_eq!(body.summary.transaction_count, 2);
        assert_eq!(body.summary.eligible_count, 1);
        assert_eq!(body.transactions[0].potential_refund, dec!(99.00));
        assert!(body.summary_text.contains("Import Analysis Summary"));
    }

    #[tokio::test]
    async fn scan_endpoint_rejects_missing_columns() {
        let request = ScanRequest {
            import_csv: "entry_number,product_id,import_date,quantity\nE1,P1,2022-01-01,10\n"
                .to_string(),
            as_of: Some(as_of()),
        };

        let error = scan_endpoint(Json(request)).await.expect_err("schema error");
        assert!(error.to_string().contains("duty_paid"));
    }

    #[tokio::test]
    async fn scan_with_exports_endpoint_returns_both_sides() {
        let request = ScanWithExportsRequest {
            import_csv: IMPORTS_CSV.to_string(),
            export_csv: EXPORTS_CSV.to_string(),
            as_of: Some(as_of()),
        };

        let Json(body) = scan_with_exports_endpoint(Json(request))
            .await
            .expect("scan runs");

        assert_eq!(body.summary.matched_count, Some(1));
        assert!(body.transactions[0].has_export_match);
        assert!(body.export_transactions[0].matched_to_import);
        assert!(body.summary_text.contains("Import-Export Analysis Summary"));
    }

    #[tokio::test]
    async fn claim_endpoint_uses_placeholder_claimant_when_omitted() {
        let request = ClaimRequest {
            import_csv: IMPORTS_CSV.to_string(),
            export_csv: Some(EXPORTS_CSV.to_string()),
            as_of: Some(as_of()),
            claimant: None,
        };

        let Json(claim) = claim_endpoint(Json(request)).await.expect("claim builds");

        assert_eq!(claim.claimant.name, "Your Company Name");
        assert_eq!(claim.line_items.len(), 1);
        assert_eq!(claim.total_claimed_refund, dec!(99.00));
    }

    #[tokio::test]
    async fn claim_endpoint_rejects_batches_without_eligible_rows() {
        let request = ClaimRequest {
            import_csv: "entry_number,product_id,import_date,quantity,duty_paid\nE1,P1,2010-01-01,10,100.00\n"
                .to_string(),
            export_csv: None,
            as_of: Some(as_of()),
            claimant: None,
        };

        let error = claim_endpoint(Json(request)).await.expect_err("no eligible rows");
        assert!(error.to_string().contains("no eligible transactions"));
    }
}
