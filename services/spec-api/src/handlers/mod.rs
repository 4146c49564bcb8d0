mod data;
mod pivot;
mod spec;
mod workflow;

pub use data::*;
pub use pivot::*;
pub use spec::*;
pub use workflow::*;

use axum::{
    body::Bytes,
    extract::Multipart,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::{bad_request, ApiResult};

/// A single file pulled out of a multipart body.
pub(crate) struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Take the first part of the form that carries a file.
pub(crate) async fn read_upload(multipart: &mut Multipart) -> ApiResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("file", format!("Failed to read upload: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| bad_request("file", format!("Failed to read file data: {}", e)))?;

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(bad_request("file", "No file provided"))
}

/// File download response with a row count header.
pub(crate) fn file_response(
    filename: &str,
    content_type: &'static str,
    rows: usize,
    bytes: Vec<u8>,
) -> Response {
    (
        [
            (header::CONTENT_TYPE.as_str(), content_type.to_string()),
            (
                header::CONTENT_DISPOSITION.as_str(),
                format!("attachment; filename=\"{}\"", filename),
            ),
            ("x-row-count", rows.to_string()),
        ],
        bytes,
    )
        .into_response()
}
