//! Workflow storage.
//!
//! Wizard state is saved as an opaque JSON document per workflow id.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;
use trimflow_utils::{validate_identifier, TrimflowError};

use crate::error::{api_error, ApiResult};
use crate::AppState;

/// POST /api/v1/workflow/:workflow_id
pub async fn save_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
    Json(document): Json<Value>,
) -> ApiResult<Json<Value>> {
    validate_identifier("workflow_id", &workflow_id).map_err(api_error)?;

    state
        .workflows
        .write()
        .await
        .insert(workflow_id.clone(), document);

    info!(workflow_id = %workflow_id, "Workflow saved");
    Ok(Json(json!({
        "message": "Workflow saved successfully",
        "workflowId": workflow_id,
    })))
}

/// GET /api/v1/workflow/:workflow_id
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> ApiResult<Json<Value>> {
    state
        .workflows
        .read()
        .await
        .get(&workflow_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(TrimflowError::not_found(format!("Workflow {}", workflow_id))))
}

/// DELETE /api/v1/workflow/:workflow_id
pub async fn delete_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = state.workflows.write().await.remove(&workflow_id);
    if removed.is_none() {
        return Err(api_error(TrimflowError::not_found(format!(
            "Workflow {}",
            workflow_id
        ))));
    }

    info!(workflow_id = %workflow_id, "Workflow deleted");
    Ok(Json(json!({ "message": "Workflow deleted successfully" })))
}

/// GET /api/v1/workflows
pub async fn list_workflows(State(state): State<AppState>) -> Json<Value> {
    let mut ids: Vec<String> = state.workflows.read().await.keys().cloned().collect();
    ids.sort();

    Json(json!({
        "total": ids.len(),
        "workflows": ids,
    }))
}
