//! Validation utilities.

use crate::FieldSyncError;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `FieldSyncError` on failure.
    fn validate_settings(&self) -> Result<(), FieldSyncError> {
        self.validate().map_err(|e| validation_errors_to_error(&e))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `FieldSyncError`.
///
/// Nested struct errors are reported with dotted paths, e.g.
/// `paging.default_page_size: range`.
#[must_use]
pub fn validation_errors_to_error(errors: &ValidationErrors) -> FieldSyncError {
    let mut messages = Vec::new();
    collect_messages("", errors, &mut messages);
    messages.sort();
    FieldSyncError::Validation(messages.join("; "))
}

const SCHEMA_KEY: &str = "__all__";

fn collect_messages(prefix: &str, errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field = field.to_string();
        // Schema-level errors are keyed `__all__` and belong to the enclosing struct.
        let path = if field == SCHEMA_KEY {
            prefix.to_string()
        } else if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    if path.is_empty() {
                        messages.push(message);
                    } else {
                        messages.push(format!("{}: {}", path, message));
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, messages),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{}[{}]", path, index), nested, messages);
                }
            }
        }
    }
}
