use axum::{
    extract::State,
    response::{Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use trimflow_models::{PivotEntry, PivotRequest};
use trimflow_utils::{export::pivot_sheet, validate_model};

use super::file_response;
use crate::error::{api_error, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResponse {
    pub pivot_data: Vec<PivotEntry>,
    pub total_entries: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PivotExportRequest {
    pub pivot_data: Vec<PivotEntry>,
}

/// POST /api/v1/pivot/generate
pub async fn generate_pivot(Json(request): Json<PivotRequest>) -> ApiResult<Json<PivotResponse>> {
    validate_model(&request).map_err(api_error)?;

    let pivot_data = request.generate_pivot();
    info!(entries = pivot_data.len(), "Pivot generated");

    Ok(Json(PivotResponse {
        total_entries: pivot_data.len(),
        pivot_data,
    }))
}

/// POST /api/v1/pivot/export
pub async fn export_pivot(
    State(state): State<AppState>,
    Json(request): Json<PivotExportRequest>,
) -> ApiResult<Response> {
    let workbook = pivot_sheet(&request.pivot_data)
        .map_err(api_error)?
        .into_workbook();
    let bytes = workbook.to_xlsx_bytes().map_err(api_error)?;

    let format = trimflow_utils::export::ExportFormat::Xlsx;
    Ok(file_response(
        &state.config.export.pivot_filename,
        format.content_type(),
        workbook.row_count(),
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_generate_pivot() {
        let request = json!({
            "trimSummary": { "buyerStyleNumbers": ["AM1234", "AM5678"] },
            "techPackData": [
                { "careLabelSupplier": "Avery", "mainLabelColor": "Black", "logo": "Sun" },
                { "logo": "Moon" }
            ]
        });
        let (status, body) = send_json(
            app(),
            json_request("POST", "/api/v1/pivot/generate", &request),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalEntries"], 4);
        let rows = body["pivotData"].as_array().unwrap();
        assert_eq!(rows[0]["supplier"], "Avery");
        assert_eq!(rows[0]["styleNumber"], "AM1234");
        assert_eq!(rows[0]["color"], "Black");
        assert_eq!(rows[0]["quantity"], 1000);
        assert_eq!(rows[0]["allowances"], "5%");
        assert_eq!(rows[1]["styleNumber"], "AM5678");
        assert_eq!(rows[2]["supplier"], "N/A");
        assert_eq!(rows[2]["color"], "N/A");
        assert_eq!(rows[2]["logo"], "Moon");
    }

    #[tokio::test]
    async fn test_generate_pivot_rejects_zero_quantity() {
        let request = json!({
            "trimSummary": { "buyerStyleNumbers": ["AM1234"] },
            "techPackData": [{}],
            "quantity": 0
        });
        let (status, body) = send_json(
            app(),
            json_request("POST", "/api/v1/pivot/generate", &request),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_pivot_without_styles() {
        let request = json!({
            "trimSummary": { "buyerStyleNumbers": [] },
            "techPackData": [{ "logo": "Columbia" }],
            "quantity": 1000
        });
        let (status, body) = send_json(
            app(),
            json_request("POST", "/api/v1/pivot/generate", &request),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalEntries"], 0);
        assert!(body["pivotData"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_pivot() {
        let request = json!({
            "pivotData": [{ "supplier": "Avery", "styleNumber": "AM1234", "quantity": 1000 }]
        });
        let response = tower::ServiceExt::oneshot(
            app(),
            json_request("POST", "/api/v1/pivot/export", &request),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"pivot_data.xlsx\""
        );
        assert_eq!(response.headers()["x-row-count"], "1");
    }

    #[tokio::test]
    async fn test_export_empty_pivot() {
        let (status, body) = send_json(
            app(),
            json_request("POST", "/api/v1/pivot/export", &json!({ "pivotData": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No pivot data to export");
    }
}
