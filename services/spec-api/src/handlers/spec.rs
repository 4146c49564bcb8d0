//! Specification Handlers
//!
//! Parse uploaded or pasted specification text, export parsed data sets
//! as XLSX/CSV and search parsed trims.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use trimflow_models::{ExportRecord, ParseResult, ParseStats, SpecRecord};
use trimflow_utils::{
    export::{
        color_bom_sheet, combined_workbook, compact_trims_sheet, measurements_sheet, trims_sheet,
        ExportFormat, Sheet, Workbook,
    },
    parse_spec_text as parse_text,
    spec::input::{parse_spec_bytes, SpecFormat},
    ExportConfig, TrimflowError, TrimflowResult,
};
use uuid::Uuid;

use super::{file_response, read_upload};
use crate::error::{api_error, bad_request, ApiResult};
use crate::AppState;

const PASTED_FILENAME: &str = "pasted.txt";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResponse {
    pub id: Uuid,
    pub filename: String,
    pub format: String,
    pub stats: ParseStats,
    pub result: ParseResult,
}

impl From<SpecRecord> for ParseResponse {
    fn from(record: SpecRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            format: record.file_type,
            stats: record.stats,
            result: record.result,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub result: ParseResult,
    pub term: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSearchRequest {
    pub term: String,
    pub spec_id: Option<Uuid>,
}

/// A rendered export, ready to send.
struct ExportFile {
    filename: String,
    format: ExportFormat,
    rows: usize,
    bytes: Vec<u8>,
}

impl IntoResponse for ExportFile {
    fn into_response(self) -> Response {
        file_response(&self.filename, self.format.content_type(), self.rows, self.bytes)
    }
}

/// POST /api/v1/spec/parse
pub async fn parse_spec_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ParseResponse>> {
    let upload = read_upload(&mut multipart).await?;

    let (format, result) =
        parse_spec_bytes(&upload.filename, upload.content_type.as_deref(), &upload.data)
            .map_err(api_error)?;

    let record = store_parsed(&state, &upload.filename, format, upload.data.len(), result).await?;
    info!(
        spec_id = %record.id,
        filename = %record.filename,
        format = format.as_str(),
        "Specification uploaded"
    );
    Ok(Json(record.into()))
}

/// POST /api/v1/spec/parse-text
pub async fn parse_spec_text(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> ApiResult<Json<ParseResponse>> {
    let filename = request
        .filename
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| PASTED_FILENAME.to_string());
    let result = parse_text(&request.text);

    let record =
        store_parsed(&state, &filename, SpecFormat::Text, request.text.len(), result).await?;
    Ok(Json(record.into()))
}

/// POST /api/v1/spec/export/:dataset?format=xlsx|csv
pub async fn export_spec(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Query(query): Query<ExportQuery>,
    Json(result): Json<ParseResult>,
) -> ApiResult<Response> {
    let export = build_export(&state.config.export, &dataset, query.format.as_deref(), &result)?;

    info!(
        dataset = %dataset,
        rows = export.rows,
        filename = %export.filename,
        "Specification exported"
    );
    Ok(export.into_response())
}

/// POST /api/v1/spec/search
pub async fn search_trims(Json(request): Json<SearchRequest>) -> Json<Value> {
    let trims = request.result.search_trims(&request.term);
    Json(json!({
        "term": request.term,
        "total": trims.len(),
        "trims": trims,
    }))
}

/// GET /api/v1/spec/:spec_id
pub async fn get_spec(
    State(state): State<AppState>,
    Path(spec_id): Path<Uuid>,
) -> ApiResult<Json<SpecRecord>> {
    state.specs.find_by_id(spec_id).await.map(Json).map_err(api_error)
}

/// DELETE /api/v1/spec/:spec_id
pub async fn delete_spec(
    State(state): State<AppState>,
    Path(spec_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.specs.delete(spec_id).await.map_err(api_error)?;

    info!(spec_id = %spec_id, "Specification deleted");
    Ok(Json(json!({ "message": "Specification deleted successfully" })))
}

/// GET /api/v1/specs?limit=&offset=
pub async fn list_specs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Value> {
    let specifications = state.specs.list(query.limit, query.offset).await;
    Json(json!({
        "total": state.specs.count().await,
        "specifications": specifications,
    }))
}

/// POST /api/v1/specs/search
pub async fn search_stored_trims(
    State(state): State<AppState>,
    Json(request): Json<StoredSearchRequest>,
) -> ApiResult<Json<Value>> {
    let matches = state
        .specs
        .search_trims(&request.term, request.spec_id)
        .await
        .map_err(api_error)?;

    Ok(Json(json!({
        "term": request.term,
        "total": matches.len(),
        "matches": matches,
    })))
}

/// GET /api/v1/spec/:spec_id/export/:dataset?format=xlsx|csv
pub async fn export_stored_spec(
    State(state): State<AppState>,
    Path((spec_id, dataset)): Path<(Uuid, String)>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let record = state.specs.find_by_id(spec_id).await.map_err(api_error)?;
    let export = build_export(
        &state.config.export,
        &dataset,
        query.format.as_deref(),
        &record.result,
    )?;

    state
        .specs
        .record_export(
            spec_id,
            ExportRecord::new(
                dataset.as_str(),
                export.format.extension(),
                export.filename.as_str(),
                export.rows,
            ),
        )
        .await
        .map_err(api_error)?;

    info!(
        spec_id = %spec_id,
        dataset = %dataset,
        rows = export.rows,
        "Stored specification exported"
    );
    Ok(export.into_response())
}

/// GET /api/v1/spec/:spec_id/exports
pub async fn spec_export_history(
    State(state): State<AppState>,
    Path(spec_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let exports = state.specs.export_history(spec_id).await.map_err(api_error)?;
    Ok(Json(json!({
        "specId": spec_id,
        "total": exports.len(),
        "exports": exports,
    })))
}

async fn store_parsed(
    state: &AppState,
    filename: &str,
    format: SpecFormat,
    size: usize,
    result: ParseResult,
) -> ApiResult<SpecRecord> {
    let record = state.specs.create(filename, format.as_str(), size).await;
    state
        .specs
        .save_parsed(record.id, result)
        .await
        .map_err(api_error)
}

fn build_export(
    names: &ExportConfig,
    dataset: &str,
    format: Option<&str>,
    result: &ParseResult,
) -> ApiResult<ExportFile> {
    let format = match format {
        None => ExportFormat::Xlsx,
        Some(name) => ExportFormat::from_name(name)
            .ok_or_else(|| bad_request("format", format!("Unknown export format '{}'", name)))?,
    };
    if dataset == "all" && format == ExportFormat::Csv {
        return Err(bad_request("format", "The combined export is only available as xlsx"));
    }

    let (workbook, filename) = match dataset {
        "trims" => (single(trims_sheet(&result.trims)), &names.trims_filename),
        "trims-compact" => (single(compact_trims_sheet(&result.trims)), &names.trims_filename),
        "color-bom" => (single(color_bom_sheet(&result.color_bom)), &names.color_bom_filename),
        "measurements" => (
            single(measurements_sheet(&result.measurements)),
            &names.measurements_filename,
        ),
        "all" => (combined_workbook(result), &names.combined_filename),
        other => return Err(bad_request("dataset", format!("Unknown dataset '{}'", other))),
    };
    let workbook = workbook.map_err(api_error)?;
    let rows = workbook.row_count();

    let (bytes, filename) = match format {
        ExportFormat::Xlsx => (workbook.to_xlsx_bytes().map_err(api_error)?, filename.clone()),
        ExportFormat::Csv => {
            let sheet = workbook
                .sheets
                .first()
                .ok_or_else(|| api_error(TrimflowError::empty_export(dataset)))?;
            (
                sheet.to_csv_bytes().map_err(api_error)?,
                with_extension(filename, format.extension()),
            )
        }
    };

    Ok(ExportFile {
        filename,
        format,
        rows,
        bytes,
    })
}

fn single(sheet: TrimflowResult<Sheet>) -> TrimflowResult<Workbook> {
    sheet.map(Sheet::into_workbook)
}

fn with_extension(filename: &str, extension: &str) -> String {
    std::path::Path::new(filename)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}
