//! Common helper functions used across API endpoints

use api_types::ErrorResponse;

/// Create a database error response with logging
pub fn database_error(operation: &str, error: impl std::fmt::Display) -> ErrorResponse {
    tracing::error!(operation = operation, error = %error, "Database operation failed");
    ErrorResponse::database_error()
}

#[cfg(test)]
mod tests {
    use super::database_error;
    use axum::http::StatusCode;

    #[test]
    fn database_error_maps_to_500() {
        let err = database_error("get bridge flows", "connection refused");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type, "database-error");
    }
}
