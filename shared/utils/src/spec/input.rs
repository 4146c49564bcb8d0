//! Reading uploaded specification files.
//!
//! Both accepted formats are decoded as text. PDF content streams are not
//! decoded, so only PDFs with plain-text bodies yield records.

use std::path::Path;
use tracing::info;
use trimflow_models::ParseResult;

use super::parse_spec_text;
use crate::error::{TrimflowError, TrimflowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Text,
    Pdf,
}

impl SpecFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect format from content type header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "text/plain" => Some(Self::Text),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn detect(filename: &str, content_type: Option<&str>) -> TrimflowResult<Self> {
        Self::from_extension(Path::new(filename))
            .or_else(|| content_type.and_then(Self::from_content_type))
            .ok_or_else(|| TrimflowError::unsupported_format(filename))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
        }
    }
}

/// Decode file bytes as UTF-8, replacing invalid sequences.
pub fn decode_spec_bytes(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

pub async fn read_spec_file(path: impl AsRef<Path>) -> TrimflowResult<String> {
    let path = path.as_ref();
    SpecFormat::detect(&path.to_string_lossy(), None)?;

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| TrimflowError::file_read(path.display().to_string(), e.to_string()))?;

    info!(path = %path.display(), size = data.len(), "Specification file loaded");
    Ok(decode_spec_bytes(&data))
}

pub async fn parse_spec_file(path: impl AsRef<Path>) -> TrimflowResult<ParseResult> {
    let text = read_spec_file(path).await?;
    Ok(parse_spec_text(&text))
}

/// Parse an uploaded file already held in memory.
pub fn parse_spec_bytes(
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> TrimflowResult<(SpecFormat, ParseResult)> {
    let format = SpecFormat::detect(filename, content_type)?;
    let text = decode_spec_bytes(data);
    Ok((format, parse_spec_text(&text)))
}
