use crate::error::{TrimflowError, TrimflowResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> TrimflowResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(TrimflowError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => format!("{}: {}", field, message),
                (None, "length") => format!("Length validation failed for field '{}'", field),
                (None, "range") => format!("Value out of range for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    // Nested structs report under their own key
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::Struct(inner) = kind {
            messages.push(format!("{}: {}", field, format_validation_errors(inner)));
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Reject blank identifiers used as storage keys.
pub fn validate_identifier(field: &str, value: &str) -> TrimflowResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TrimflowError::validation(field, "must not be empty"));
    }
    if trimmed.len() > 128 {
        return Err(TrimflowError::validation(field, "must be at most 128 characters"));
    }
    Ok(())
}
