//! Create-payload schema for libraries.
//!
//! Checks run to completion: every violated field is collected and returned
//! as one [`AppError::ValidationFailed`], never just the first failure.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::{
    error::{AppError, AppResult, FieldViolation, ValidationReport},
    models::{LibraryCandidate, NewImage, NewLibrary},
};

/// Maximum length of the `about` text, in characters
pub const ABOUT_MAX_CHARS: usize = 500;

/// Validate a candidate and turn it into a library ready for persistence
pub fn validate_library(candidate: &LibraryCandidate) -> AppResult<NewLibrary> {
    let mut violations = Vec::new();

    if let Err(errors) = candidate.validate() {
        flatten_errors("", &errors, &mut violations);
    }

    let latitude = parse_number("latitude", candidate.latitude.as_deref(), &mut violations);
    let longitude = parse_number("longitude", candidate.longitude.as_deref(), &mut violations);

    if !violations.is_empty() {
        return Err(AppError::ValidationFailed(ValidationReport::new(violations)));
    }

    // Presence of everything below was established by `validate()`
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    Ok(NewLibrary {
        name: text(&candidate.name),
        latitude: latitude.unwrap_or_default(),
        longitude: longitude.unwrap_or_default(),
        about: text(&candidate.about),
        phone: text(&candidate.phone),
        website: text(&candidate.website),
        facebook: text(&candidate.facebook),
        instagram: text(&candidate.instagram),
        opening_hours: text(&candidate.opening_hours),
        open_on_weekends: candidate.open_on_weekends.unwrap_or_default(),
        images: candidate
            .images
            .iter()
            .filter_map(|image| image.path.clone())
            .map(|path| NewImage { path })
            .collect(),
    })
}

/// Missing values are already reported by `required`; only type errors here.
fn parse_number(field: &str, raw: Option<&str>, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: format!("{} must be a `number` type, but the final value was: `{}`", field, raw),
            });
            None
        }
    }
}

/// Turn nested `validator` errors into flat `field.sub[index]` violations
fn flatten_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", path, error.code));
                    out.push(FieldViolation {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}
