//! Schedule upload and row filtering.

use axum::{extract::Multipart, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trimflow_utils::{filter_rows, ScheduleParser};

use super::read_upload;
use crate::error::{api_error, ApiResult};

#[derive(Debug, Serialize)]
pub struct ScheduleUploadResponse {
    pub filename: String,
    pub rows: usize,
    pub headers: Vec<String>,
    pub data: Vec<Map<String, Value>>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRequest {
    pub data: Vec<Map<String, Value>>,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    pub filtered_data: Vec<Map<String, Value>>,
    pub total: usize,
}

/// POST /api/v1/upload/schedule
pub async fn upload_schedule(mut multipart: Multipart) -> ApiResult<Json<ScheduleUploadResponse>> {
    let upload = read_upload(&mut multipart).await?;

    let schedule = ScheduleParser::new()
        .parse_bytes(&upload.filename, &upload.data)
        .map_err(api_error)?;

    Ok(Json(ScheduleUploadResponse {
        filename: schedule.filename,
        rows: schedule.rows.len(),
        headers: schedule.headers,
        data: schedule.rows,
        warnings: schedule.warnings,
    }))
}

/// POST /api/v1/data/filter
pub async fn filter_data(Json(request): Json<FilterRequest>) -> Json<FilterResponse> {
    let filtered_data = filter_rows(&request.data, &request.search_term);
    Json(FilterResponse {
        total: filtered_data.len(),
        filtered_data,
    })
}
