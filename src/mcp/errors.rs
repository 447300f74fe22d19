// src/mcp/errors.rs
//! Turns failures into messages an assistant can act on.

use crate::error::{ApiErrorKind, AppError};

/// A one-paragraph explanation of `err` for the tool caller.
///
/// The full error is logged separately; this text names the category and
/// the next step, plus whatever detail BookStack gave.
pub fn user_message(operation: &str, err: &AppError) -> String {
    match err {
        AppError::Api { message, .. } => match err.kind() {
            Some(ApiErrorKind::Unauthorized) => format!(
                "Authentication failed for {}: {}. Check BOOKSTACK_TOKEN_ID and BOOKSTACK_TOKEN_SECRET.",
                operation, message
            ),
            Some(ApiErrorKind::Forbidden) => format!(
                "Permission denied for {}: {}. The API token's user lacks access to this item or to the API.",
                operation, message
            ),
            Some(ApiErrorKind::NotFound) => format!(
                "Not found: {}. Check the id, or list the parent to find valid ids.",
                message
            ),
            Some(ApiErrorKind::Validation) => match err.validation_detail() {
                Some(detail) => format!("Validation failed for {}: {}", operation, detail),
                None => format!("Validation failed for {}: {}", operation, message),
            },
            Some(ApiErrorKind::RateLimited) => format!(
                "BookStack rate limit reached during {} and retries were exhausted. Wait a minute and try again.",
                operation
            ),
            Some(ApiErrorKind::Server) => format!(
                "BookStack server error during {}: {}. Try again later.",
                operation, message
            ),
            _ => format!("{} failed: {}", operation, err),
        },
        AppError::WriteDisabled { .. } => err.to_string(),
        AppError::Timeout(_) => format!(
            "{} timed out: {}. BookStack may be slow or unreachable.",
            operation, err
        ),
        AppError::NetworkFailure(_) | AppError::Transport(_) => format!(
            "Could not reach BookStack during {}: {}. Check BOOKSTACK_BASE_URL and connectivity.",
            operation, err
        ),
        AppError::Validation(detail) => format!("Invalid request for {}: {}", operation, detail),
        AppError::ValidationError(e) => format!("Invalid request for {}: {}", operation, e),
        _ => format!("{} failed: {}", operation, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WRITE_DISABLED_MARKER;
    use std::time::Duration;

    #[test]
    fn not_found_keeps_the_api_message() {
        let err = AppError::from_response(404, r#"{"message": "Not found"}"#);
        let text = user_message("get_page", &err);
        assert!(text.starts_with("Not found: Not found"));
    }

    #[test]
    fn validation_lists_field_problems() {
        let body = r#"{"error": {"message": "The given data was invalid.",
            "validation": {"name": ["The name field is required."]}}}"#;
        let err = AppError::from_response(422, body);
        assert_eq!(
            user_message("create_book", &err),
            "Validation failed for create_book: name: The name field is required."
        );
    }

    #[test]
    fn write_disabled_keeps_the_marker() {
        let err = AppError::write_disabled("delete_page");
        assert!(user_message("delete_page", &err).contains(WRITE_DISABLED_MARKER));
    }

    #[test]
    fn timeouts_are_named() {
        let err = AppError::Timeout(Duration::from_secs(30));
        assert!(user_message("get_books", &err).contains("timed out"));
    }

    #[test]
    fn auth_failures_point_at_token_settings() {
        let err = AppError::from_response(401, r#"{"error": {"message": "No token"}}"#);
        assert!(user_message("get_books", &err).contains("BOOKSTACK_TOKEN_ID"));
    }
}
