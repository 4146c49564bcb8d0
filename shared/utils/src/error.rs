use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TrimflowError {
    #[error("Failed to read {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("No {dataset} data to export")]
    EmptyExport { dataset: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Import error: {message}")]
    Import { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl TrimflowError {
    pub fn file_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    pub fn empty_export(dataset: impl Into<String>) -> Self {
        Self::EmptyExport {
            dataset: dataset.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::EmptyExport { .. } => "EMPTY_EXPORT",
            Self::Export { .. } => "EXPORT_ERROR",
            Self::Import { .. } => "IMPORT_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::FileRead { .. } => 422,
            Self::UnsupportedFormat { .. } => 415,
            Self::EmptyExport { .. } => 400,
            Self::Export { .. } => 500,
            Self::Import { .. } => 422,
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type TrimflowResult<T> = Result<T, TrimflowError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<TrimflowError> for ErrorResponse {
    fn from(error: TrimflowError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for TrimflowError {
    fn from(error: std::io::Error) -> Self {
        Self::file_read("<io>", error.to_string())
    }
}

impl From<serde_json::Error> for TrimflowError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<csv::Error> for TrimflowError {
    fn from(error: csv::Error) -> Self {
        Self::export(error.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for TrimflowError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::export(error.to_string())
    }
}

impl From<calamine::Error> for TrimflowError {
    fn from(error: calamine::Error) -> Self {
        Self::import(error.to_string())
    }
}

impl From<anyhow::Error> for TrimflowError {
    fn from(error: anyhow::Error) -> Self {
        Self::import(format!("{:#}", error))
    }
}
