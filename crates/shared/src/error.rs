//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Each variant maps to exactly one HTTP status so handlers can render
/// failures uniformly. `NotFound` means the entity the caller addressed is
/// absent; `DependencyMissing` means a record the addressed entity references
/// is absent, which is a data-consistency gap on the server side rather than
/// a caller mistake.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier or request body.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A referenced record is absent.
    #[error("Missing dependency: {0}")]
    DependencyMissing(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::DependencyMissing(_) | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DependencyMissing(_) => "DEPENDENCY_MISSING",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::DependencyMissing(String::new()), 500, "DEPENDENCY_MISSING")]
    #[case(AppError::Database(String::new()), 500, "DATABASE_ERROR")]
    fn test_status_and_error_codes(
        #[case] error: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("Paid expense 7".into()).to_string(),
            "Not found: Paid expense 7"
        );
        assert_eq!(
            AppError::DependencyMissing("budget for IT/Travel/2024".into()).to_string(),
            "Missing dependency: budget for IT/Travel/2024"
        );
    }
}
