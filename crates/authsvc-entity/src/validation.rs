//! Bridges `validator` derive checks into [`AppError`].

use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use validator::{Validate, ValidationErrors};

/// Run the derived validation rules of a payload.
///
/// All field messages are joined into a single validation error.
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    messages.sort();
    AppError::validation(messages.join("; "))
}
