//! Validation utilities.

use crate::{FieldError, HospedaError};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `HospedaError` on failure.
    fn validate_request(&self) -> Result<(), HospedaError> {
        self.validate().map_err(validation_errors_to_hospeda_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `HospedaError::InvalidFields`.
///
/// Nested structs (a property's location) are flattened into dotted paths
/// such as `location.city`.
#[must_use]
pub fn validation_errors_to_hospeda_error(errors: ValidationErrors) -> HospedaError {
    let mut field_errors = Vec::new();
    collect_field_errors("", &errors, &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    HospedaError::InvalidFields(field_errors)
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|error| FieldError {
                    field: path.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                    code: error.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Minimum accepted password length.
    pub const MIN_PASSWORD_LENGTH: usize = 6;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates the password length policy.
    pub fn password_policy(password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            let mut err = ValidationError::new("password_too_short");
            err.message = Some("Password must be at least 6 characters".into());
            return Err(err);
        }
        Ok(())
    }

    /// Validates that every image entry is an absolute URL.
    pub fn image_urls(images: &[String]) -> Result<(), ValidationError> {
        for image in images {
            if url::Url::parse(image).is_err() {
                let mut err = ValidationError::new("url");
                err.message = Some(format!("Invalid image URL: {image}").into());
                return Err(err);
            }
        }
        Ok(())
    }
}
