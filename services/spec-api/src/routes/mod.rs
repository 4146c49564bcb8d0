use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .nest("/spec", spec_routes())
        .route(
            "/workflow/:workflow_id",
            post(save_workflow).get(get_workflow).delete(delete_workflow),
        )
        .route("/specs", get(list_specs))
        .route("/specs/search", post(search_stored_trims))
        .route("/workflows", get(list_workflows))
        .route("/upload/schedule", post(upload_schedule))
        .route("/pivot/generate", post(generate_pivot))
        .route("/pivot/export", post(export_pivot))
        .route("/data/filter", post(filter_data))
}

fn spec_routes() -> Router<AppState> {
    Router::new()
        .route("/parse", post(parse_spec_upload))
        .route("/parse-text", post(parse_spec_text))
        .route("/export/:dataset", post(export_spec))
        .route("/search", post(search_trims))
        .route("/:spec_id", get(get_spec).delete(delete_spec))
        .route("/:spec_id/exports", get(spec_export_history))
        .route("/:spec_id/export/:dataset", get(export_stored_spec))
}
